#![cfg(feature = "print")]

use std::fs;

use tempfile::TempDir;

use surgery_notes::domain::context::{FollowupContext, TemplateContext};
use surgery_notes::domain::print_template::{PrintTemplate, TemplateType};
use surgery_notes::domain::types::TrustedHtml;
use surgery_notes::models::config::PrintConfig;
use surgery_notes::repository::errors::RepositoryError;
use surgery_notes::repository::{DirectoryTemplateRepository, PrintTemplateReader};
use surgery_notes::services::ServiceError;
use surgery_notes::services::print::{list_templates, print_template};

fn store(dir: &TempDir, template: &PrintTemplate) {
    let json = serde_json::to_string_pretty(template).expect("serializable template");
    fs::write(dir.path().join(format!("{}.json", template.id)), json).expect("write template");
}

fn config(dir: &TempDir) -> PrintConfig {
    PrintConfig {
        templates_dir: dir.path().display().to_string(),
        ..Default::default()
    }
}

#[test]
fn test_directory_repository_reads_records() {
    let dir = TempDir::new().expect("temp dir");
    let surgery = PrintTemplate::new("surgery-default", "Surgery", TemplateType::Surgery);
    let followup = PrintTemplate::new("followup-default", "Followup", TemplateType::Followup);
    store(&dir, &surgery);
    store(&dir, &followup);
    fs::write(dir.path().join("README.txt"), "not a template").expect("write file");

    let repo = DirectoryTemplateRepository::new(dir.path());

    let loaded = repo
        .get_print_template("surgery-default")
        .expect("readable")
        .expect("stored template");
    assert_eq!(loaded, surgery);
    assert!(repo.get_print_template("absent").expect("readable").is_none());

    let names: Vec<_> = repo
        .list_print_templates()
        .expect("listable")
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["Followup", "Surgery"]);
}

#[test]
fn test_directory_repository_rejects_path_like_ids() {
    let dir = TempDir::new().expect("temp dir");
    let repo = DirectoryTemplateRepository::new(dir.path());

    let result = repo.get_print_template("../secrets");

    assert!(matches!(result, Err(RepositoryError::ValidationError(_))));
}

#[test]
fn test_directory_repository_reports_malformed_records() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("broken.json"), r#"{ "id": "broken" }"#).expect("write file");
    let repo = DirectoryTemplateRepository::new(dir.path());

    let result = repo.get_print_template("broken");

    assert!(matches!(result, Err(RepositoryError::Malformed(_))));
}

#[test]
fn test_print_followup_template_end_to_end() {
    let dir = TempDir::new().expect("temp dir");
    let mut template = PrintTemplate::new("fu", "Followup Sheet", TemplateType::Followup);
    template.is_default = true;
    store(&dir, &template);
    let config = config(&dir);
    let repo = DirectoryTemplateRepository::new(&config.templates_dir);

    let mut context = TemplateContext::default();
    context.patient.name = "John".to_string();
    context.followup = Some(FollowupContext {
        date: "20/03/2024".to_string(),
        notes: Some(TrustedHtml::new("<p>Wound healing well</p>")),
        ..Default::default()
    });

    let document = print_template("fu", &context, &config, &repo).expect("should print");

    assert_eq!(document.title, "Followup Sheet - John");
    assert!(document.html.contains("Followup notes for John"));
    assert!(document.html.contains("<p>Wound healing well</p>"));
    assert!(document.html.contains("20/03/2024"));

    let summaries = list_templates(Some(TemplateType::Followup), &repo).expect("should list");
    assert_eq!(summaries.len(), 1);
    assert!(summaries[0].is_default);
}

#[test]
fn test_print_missing_template() {
    let dir = TempDir::new().expect("temp dir");
    let config = config(&dir);
    let repo = DirectoryTemplateRepository::new(dir.path());

    let result = print_template("nope", &TemplateContext::default(), &config, &repo);

    assert!(matches!(result, Err(ServiceError::NotFound)));
}
