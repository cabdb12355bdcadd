//! Template store backed by a directory of `{id}.json` records.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::print_template::PrintTemplate;
use crate::repository::PrintTemplateReader;
use crate::repository::errors::{RepositoryError, RepositoryResult};

#[derive(Debug, Clone)]
pub struct DirectoryTemplateRepository {
    root: PathBuf,
}

impl DirectoryTemplateRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Identifiers map straight to file names, so only a conservative
    /// character set is accepted.
    fn record_path(&self, id: &str) -> RepositoryResult<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::ValidationError(format!(
                "invalid template id `{id}`"
            )));
        }
        Ok(self.root.join(format!("{id}.json")))
    }
}

fn read_record(path: &Path) -> RepositoryResult<PrintTemplate> {
    let source = fs::read_to_string(path)?;
    serde_json::from_str(&source).map_err(|err| {
        RepositoryError::Malformed(format!("{}: {err}", path.display()))
    })
}

impl PrintTemplateReader for DirectoryTemplateRepository {
    fn get_print_template(&self, id: &str) -> RepositoryResult<Option<PrintTemplate>> {
        let path = self.record_path(id)?;
        match read_record(&path) {
            Ok(template) => Ok(Some(template)),
            Err(RepositoryError::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn list_print_templates(&self) -> RepositoryResult<Vec<PrintTemplate>> {
        let mut templates = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                templates.push(read_record(&path)?);
            }
        }
        templates.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(templates)
    }
}
