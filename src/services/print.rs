//! Print workflow: load a stored template, render it against a context and
//! wrap the result into a printable page.

use crate::document::render_print_document;
use crate::domain::context::TemplateContext;
use crate::domain::print_template::{PrintTemplate, TemplateType};
use crate::models::config::PrintConfig;
use crate::render::{RenderOptions, render_template_with};
use crate::repository::PrintTemplateReader;
use crate::services::{ServiceError, ServiceResult};

/// Printable page produced for one template and context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    pub template_id: String,
    pub title: String,
    pub html: String,
}

/// Short description of a stored template for selection lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub template_type: TemplateType,
    pub is_default: bool,
}

impl From<&PrintTemplate> for TemplateSummary {
    fn from(template: &PrintTemplate) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            template_type: template.template_type,
            is_default: template.is_default,
        }
    }
}

fn document_title(template: &PrintTemplate, context: &TemplateContext) -> String {
    let patient = context.patient.name.trim();
    if patient.is_empty() {
        template.name.clone()
    } else {
        format!("{} - {patient}", template.name)
    }
}

/// Renders the stored template `template_id` into a printable page.
pub fn print_template<R>(
    template_id: &str,
    context: &TemplateContext,
    config: &PrintConfig,
    repo: &R,
) -> ServiceResult<PrintDocument>
where
    R: PrintTemplateReader + ?Sized,
{
    let template = repo
        .get_print_template(template_id)
        .map_err(|err| {
            log::error!("Failed to load print template {template_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;

    if template.template_type == TemplateType::Followup && context.followup.is_none() {
        log::warn!(
            "Printing followup template {} without followup data, followup fields will be empty",
            template.id
        );
    }

    let options = RenderOptions::from(config);
    let fragment =
        render_template_with(&template.structure, context, &options).map_err(|err| {
            log::error!("Failed to render print template {}: {err}", template.id);
            err
        })?;

    let title = document_title(&template, context);
    let html = render_print_document(&fragment, &title, config).map_err(|err| {
        log::error!("Failed to build print document for {}: {err}", template.id);
        err
    })?;

    Ok(PrintDocument {
        template_id: template.id,
        title,
        html,
    })
}

/// Lists stored templates, optionally restricted to one template type.
pub fn list_templates<R>(
    template_type: Option<TemplateType>,
    repo: &R,
) -> ServiceResult<Vec<TemplateSummary>>
where
    R: PrintTemplateReader + ?Sized,
{
    let templates = repo.list_print_templates().map_err(|err| {
        log::error!("Failed to list print templates: {err}");
        err
    })?;

    Ok(templates
        .iter()
        .filter(|template| template_type.is_none_or(|t| template.template_type == t))
        .map(TemplateSummary::from)
        .collect())
}
