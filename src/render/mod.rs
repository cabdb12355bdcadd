//! Recursive renderer turning a block tree and a context into an HTML fragment.
//!
//! Rendering is a pure function of its inputs. Data-level gaps (missing
//! fields, empty lists, unknown block types) render as nothing for the
//! affected block; the only failure is a context that cannot be projected
//! into a JSON tree for field lookup.

use serde_json::Value;

use crate::domain::block::Block;
use crate::domain::context::TemplateContext;
use crate::domain::structure::{CURRENT_STRUCTURE_VERSION, TemplateStructure};
use crate::errors::{TemplateError, TemplateResult};

pub mod blocks;
pub mod condition;
pub mod escape;
pub mod format;
pub mod interpolate;
pub mod resolve;

pub use blocks::render_block;

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Caller-supplied rendering preferences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// chrono format applied to native date values.
    pub date_format: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Everything a block needs while rendering: the typed context for blocks
/// that read it directly and its JSON projection for field paths.
#[derive(Debug)]
pub struct RenderScope<'a> {
    pub context: &'a TemplateContext,
    pub data: Value,
    pub options: &'a RenderOptions,
}

impl<'a> RenderScope<'a> {
    pub fn new(context: &'a TemplateContext, options: &'a RenderOptions) -> TemplateResult<Self> {
        let data = serde_json::to_value(context).map_err(TemplateError::MalformedContext)?;
        Ok(Self {
            context,
            data,
            options,
        })
    }
}

/// Callback container blocks use to render their nested lists.
pub type RenderChildren<'r> = &'r dyn Fn(&[Block], &RenderScope<'_>) -> String;

/// Renders `blocks` in order and concatenates their output.
pub fn render_blocks(blocks: &[Block], scope: &RenderScope<'_>) -> String {
    blocks
        .iter()
        .map(|block| render_block(block, scope, &render_blocks))
        .collect()
}

/// Renders a template with default options.
pub fn render_template(
    structure: &TemplateStructure,
    context: &TemplateContext,
) -> TemplateResult<String> {
    render_template_with(structure, context, &RenderOptions::default())
}

/// Renders the top-level blocks of `structure` inside a single wrapper element.
pub fn render_template_with(
    structure: &TemplateStructure,
    context: &TemplateContext,
    options: &RenderOptions,
) -> TemplateResult<String> {
    if !structure.is_supported_version() {
        log::warn!(
            "Template structure version {} is newer than supported version {}, rendering best-effort",
            structure.version,
            CURRENT_STRUCTURE_VERSION
        );
    }

    let scope = RenderScope::new(context, options)?;
    let body = render_blocks(&structure.blocks, &scope);

    Ok(format!(r#"<div class="print-template">{body}</div>"#))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::block::{BlockKind, SpacerProps};

    #[test]
    fn empty_list_renders_empty_fragment() {
        let context = TemplateContext::default();
        let options = RenderOptions::default();
        let scope = RenderScope::new(&context, &options).expect("serializable context");

        assert_eq!(render_blocks(&[], &scope), "");
    }

    #[test]
    fn blocks_concatenate_without_separators() {
        let context = TemplateContext::default();
        let options = RenderOptions::default();
        let scope = RenderScope::new(&context, &options).expect("serializable context");
        let spacer = Block::new(BlockKind::Spacer(SpacerProps { height: 5 }));

        let single = render_blocks(std::slice::from_ref(&spacer), &scope);
        let double = render_blocks(&[spacer.clone(), spacer], &scope);

        assert_eq!(double, format!("{single}{single}"));
    }

    #[test]
    fn wraps_output_in_single_container() {
        let structure = TemplateStructure::default();

        let html = render_template(&structure, &TemplateContext::default()).expect("renders");

        assert_eq!(html, r#"<div class="print-template"></div>"#);
    }

    #[test]
    fn newer_version_still_renders() {
        let mut structure =
            TemplateStructure::new(vec![Block::new(BlockKind::Spacer(SpacerProps { height: 3 }))]);
        structure.version = CURRENT_STRUCTURE_VERSION + 1;

        let html = render_template(&structure, &TemplateContext::default()).expect("renders");

        assert!(html.contains("height: 3px"));
    }
}
