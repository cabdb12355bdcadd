//! Full printable HTML page wrapped around a rendered template fragment.

use tera::{Context, Tera};

use crate::errors::TemplateResult;
use crate::models::config::PrintConfig;

const PRINT_DOCUMENT_NAME: &str = "print.html";

const PRINT_DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
<style>
@page { size: {{ page_size }}; margin: {{ margin_mm }}mm; }
body { font-family: {{ font_family | safe }}; font-size: 14px; color: #000; margin: 0; }
.print-template img { max-width: 100%; }
.rich-content-body p { margin: 0 0 4px 0; }
@media print { .page-break { page-break-after: always; break-after: page; } }
</style>
</head>
<body>
{{ body | safe }}
</body>
</html>
"#;

/// Keeps only characters that can appear in a CSS `font-family` list.
fn css_font_family(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | ',' | '-' | '_' | '\'' | '"'))
        .collect()
}

/// Wraps `fragment` in a standalone page using the page settings of `config`.
///
/// The fragment is inserted as-is; `title` and the page size are escaped.
pub fn render_print_document(
    fragment: &str,
    title: &str,
    config: &PrintConfig,
) -> TemplateResult<String> {
    let mut tera = Tera::default();
    tera.add_raw_template(PRINT_DOCUMENT_NAME, PRINT_DOCUMENT)?;

    let mut context = Context::new();
    context.insert("title", title);
    context.insert("page_size", &config.page_size);
    context.insert("margin_mm", &config.margin_mm);
    context.insert("font_family", &css_font_family(&config.font_family));
    context.insert("body", fragment);

    Ok(tera.render(PRINT_DOCUMENT_NAME, &context)?)
}
