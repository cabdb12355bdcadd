//! Value formatting for data-field blocks.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::block::FieldFormat;
use crate::render::RenderOptions;
use crate::render::resolve::stringify;

/// Formats a resolved value; missing and `null` values format to `""`.
pub fn format_value(value: Option<&Value>, format: FieldFormat, options: &RenderOptions) -> String {
    let value = match value {
        None | Some(Value::Null) => return String::new(),
        Some(value) => value,
    };

    match format {
        FieldFormat::None => stringify(value),
        FieldFormat::Date => format_date(value, &options.date_format),
        FieldFormat::Age => format!("{} years", stringify(value)),
    }
}

/// Strings are expected to be formatted by the caller and pass through.
/// Numbers are epoch milliseconds and are rendered with `date_format`.
fn format_date(value: &Value, date_format: &str) -> String {
    let millis = match value {
        Value::Number(n) => n.as_i64(),
        _ => None,
    };

    let Some(date) = millis.and_then(DateTime::<Utc>::from_timestamp_millis) else {
        return stringify(value);
    };

    let mut out = String::new();
    if write!(out, "{}", date.format(date_format)).is_err() {
        log::warn!("Invalid date format `{date_format}`, falling back to ISO date");
        return date.date_naive().to_string();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_values_format_to_empty() {
        let options = RenderOptions::default();

        assert_eq!(format_value(None, FieldFormat::Age, &options), "");
        assert_eq!(format_value(Some(&Value::Null), FieldFormat::Date, &options), "");
    }

    #[test]
    fn age_appends_unit() {
        let options = RenderOptions::default();

        assert_eq!(format_value(Some(&json!(42)), FieldFormat::Age, &options), "42 years");
    }

    #[test]
    fn date_strings_pass_through() {
        let options = RenderOptions::default();

        assert_eq!(
            format_value(Some(&json!("3 March 2024")), FieldFormat::Date, &options),
            "3 March 2024"
        );
    }

    #[test]
    fn epoch_millis_use_configured_format() {
        let options = RenderOptions {
            date_format: "%d/%m/%Y".to_string(),
        };

        // 2024-03-05T00:00:00Z
        let value = json!(1_709_596_800_000_i64);

        assert_eq!(format_value(Some(&value), FieldFormat::Date, &options), "05/03/2024");
    }

    #[test]
    fn none_format_stringifies() {
        let options = RenderOptions::default();

        assert_eq!(format_value(Some(&json!(true)), FieldFormat::None, &options), "true");
    }
}
