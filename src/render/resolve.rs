//! Dotted field-path lookup into the JSON projection of the render context.

use serde_json::Value;

/// Returns the value at `path`, or `None` when any segment is absent or the
/// walk reaches a scalar. Array elements are addressed by numeric segments.
pub fn resolve_field<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    path.split('.').try_fold(data, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// String form of a value, following the loose conversion used for
/// comparisons and display: `null` becomes `"null"`, arrays join their
/// elements with commas and objects collapse to a placeholder.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => stringify(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Display form of an optional value; missing and `null` values are empty.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(value) => stringify(value),
    }
}

/// Whether a value counts as empty for `notEmpty`/`isEmpty` checks.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> Value {
        json!({
            "patient": { "name": "Jane", "age": 42, "phn": null },
            "surgery": { "doneBy": [{ "name": "Dr. A" }] }
        })
    }

    #[test]
    fn resolves_nested_paths() {
        let data = data();

        assert_eq!(resolve_field(&data, "patient.name"), Some(&json!("Jane")));
        assert_eq!(resolve_field(&data, " patient.age "), Some(&json!(42)));
        assert_eq!(resolve_field(&data, "surgery.doneBy.0.name"), Some(&json!("Dr. A")));
    }

    #[test]
    fn missing_segments_resolve_to_none() {
        let data = data();

        assert_eq!(resolve_field(&data, "followup.date"), None);
        assert_eq!(resolve_field(&data, "patient.name.first"), None);
        assert_eq!(resolve_field(&data, "patient.phn.value"), None);
        assert_eq!(resolve_field(&data, ""), None);
    }

    #[test]
    fn null_is_resolved_but_blank() {
        let data = data();
        let phn = resolve_field(&data, "patient.phn");

        assert_eq!(phn, Some(&Value::Null));
        assert!(is_blank(phn));
        assert_eq!(display_value(phn), "");
    }

    #[test]
    fn stringifies_loosely() {
        assert_eq!(stringify(&json!(0)), "0");
        assert_eq!(stringify(&json!(2.5)), "2.5");
        assert_eq!(stringify(&json!(3.0)), "3");
        assert_eq!(stringify(&json!(null)), "null");
        assert_eq!(stringify(&json!([1, null, "x"])), "1,,x");
        assert_eq!(stringify(&json!({ "a": 1 })), "[object Object]");
    }
}
