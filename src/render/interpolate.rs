//! `{{ field.path }}` substitution for text blocks.

use serde_json::Value;

use crate::render::escape::escape_html;
use crate::render::resolve::{display_value, resolve_field};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

fn is_field_path(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.')
}

/// Escapes `content` and replaces every `{{ path }}` token with the escaped
/// display form of the resolved value. Unresolved paths become empty;
/// tokens without a closing `}}` or with an invalid path stay literal.
pub fn interpolate(content: &str, data: &Value) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&escape_html(&rest[..start]));
        let after = &rest[start + OPEN.len()..];

        let Some(end) = after.find(CLOSE) else {
            out.push_str(&escape_html(&rest[start..]));
            return out;
        };

        let path = after[..end].trim();
        if is_field_path(path) {
            out.push_str(&escape_html(&display_value(resolve_field(data, path))));
            rest = &after[end + CLOSE.len()..];
        } else {
            // Retry from the next brace so `{{{a}}}` still finds `{{a}}`.
            out.push('{');
            rest = &rest[start + 1..];
        }
    }

    out.push_str(&escape_html(rest));
    out
}
