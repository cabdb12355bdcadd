//! Read seam to the external print-template store.

use crate::domain::print_template::PrintTemplate;
use crate::repository::errors::RepositoryResult;

pub mod directory;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use directory::DirectoryTemplateRepository;

pub trait PrintTemplateReader {
    fn get_print_template(&self, id: &str) -> RepositoryResult<Option<PrintTemplate>>;
    fn list_print_templates(&self) -> RepositoryResult<Vec<PrintTemplate>>;
}
