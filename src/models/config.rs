//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::render::{DEFAULT_DATE_FORMAT, RenderOptions};

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Settings of the print shell and the printed page.
pub struct PrintConfig {
    /// Directory holding one `{id}.json` file per stored print template.
    pub templates_dir: String,
    /// CSS `@page` size, e.g. `A4` or `A5 landscape`.
    pub page_size: String,
    pub margin_mm: u32,
    pub font_family: String,
    /// chrono format applied to native date values.
    pub date_format: String,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            templates_dir: "templates".to_string(),
            page_size: "A4".to_string(),
            margin_mm: 15,
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl From<&PrintConfig> for RenderOptions {
    fn from(config: &PrintConfig) -> Self {
        RenderOptions {
            date_format: config.date_format.clone(),
        }
    }
}
