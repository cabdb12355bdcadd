//! Error taxonomy of the print-template core.
//!
//! Missing data is never an error: absent fields, empty doctor lists and a
//! missing followup all degrade to rendering nothing for the affected block.
//! Only inputs that cannot describe a block tree at all end up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    /// A known block type whose props do not fit the expected shape. Logged
    /// while loading; the block itself is kept and renders to nothing.
    #[error("block `{id}` of type `{block_type}` is malformed: {source}")]
    MalformedBlock {
        id: String,
        block_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("template structure is malformed: {0}")]
    MalformedStructure(#[source] serde_json::Error),

    #[error("template context is malformed: {0}")]
    MalformedContext(#[source] serde_json::Error),

    #[cfg(feature = "print")]
    #[error("print document error: {0}")]
    Document(#[from] tera::Error),
}

pub type TemplateResult<T> = Result<T, TemplateError>;
