//! Strongly-typed value objects used by the block model and the print context.
//!
//! These wrappers enforce basic invariants (non-empty identifiers, sanitized
//! markup) so that once a value reaches the renderer it can be treated as
//! trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value is outside the accepted set.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Stable identifier of a block inside one template structure.
///
/// The identifier is only used by the builder for editing; rendering never
/// looks at it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct BlockId(String);

impl BlockId {
    /// Wraps an existing identifier, rejecting blank values.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Generates a fresh random identifier for a newly created block.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for BlockId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for BlockId {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for BlockId {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BlockId> for String {
    fn from(value: BlockId) -> Self {
        value.0
    }
}

/// HTML that passed through the sanitizer and may be emitted without escaping.
///
/// Both construction and deserialization sanitize the input, so rich-content
/// blocks insert the value verbatim. Editor formatting survives: `style`
/// attributes, `data:` image sources and links are kept as written.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Sanitizes arbitrary markup into trusted HTML.
    pub fn new<S: AsRef<str>>(value: S) -> Self {
        Self(sanitize(value.as_ref()))
    }

    /// Borrow the sanitized markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the sanitized markup is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the wrapper returning the sanitized markup.
    pub fn into_inner(self) -> String {
        self.0
    }
}

fn sanitize(value: &str) -> String {
    let mut builder = ammonia::Builder::default();
    builder
        .add_generic_attributes(&["style"])
        .add_url_schemes(&["data"])
        .link_rel(None);
    builder.clean(value).to_string()
}

impl Deref for TrustedHtml {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for TrustedHtml {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TrustedHtml {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for TrustedHtml {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<TrustedHtml> for String {
    fn from(value: TrustedHtml) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_id_rejects_blank_values() {
        assert_eq!(BlockId::new("   "), Err(TypeConstraintError::EmptyString));
        assert_eq!(BlockId::new(" abc ").expect("valid id").as_str(), "abc");
    }

    #[test]
    fn generated_block_ids_differ() {
        assert_ne!(BlockId::generate(), BlockId::generate());
    }

    #[test]
    fn trusted_html_strips_scripts_on_deserialize() {
        let html: TrustedHtml =
            serde_json::from_str("\"<p>ok</p><script>alert(1)</script>\"").expect("valid json");

        assert_eq!(html.as_str(), "<p>ok</p>");
    }

    #[test]
    fn trusted_html_keeps_basic_markup() {
        let html = TrustedHtml::new("<ul><li><strong>Stable</strong></li></ul>");

        assert_eq!(html.as_str(), "<ul><li><strong>Stable</strong></li></ul>");
    }

    #[test]
    fn trusted_html_keeps_editor_formatting() {
        let notes = r#"<p style="text-align: center">Centered</p><p><img src="data:image/png;base64,AAAA"></p><a href="https://x.org">l</a>"#;

        assert_eq!(TrustedHtml::new(notes).as_str(), notes);
    }

    #[test]
    fn trusted_html_drops_event_handlers() {
        let html = TrustedHtml::new(r#"<img src="data:image/png;base64,AAAA" onerror="x()">"#);

        assert_eq!(html.as_str(), r#"<img src="data:image/png;base64,AAAA">"#);
    }
}
