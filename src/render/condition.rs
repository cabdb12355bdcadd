//! Evaluation of conditional-block operators.

use serde_json::Value;

use crate::domain::block::ConditionOperator;
use crate::render::resolve::{is_blank, resolve_field, stringify};

/// Evaluates `operator` for the value at `field`.
///
/// `equals` compares string forms, so `0` equals `"0"` and `null` equals
/// `"null"`; an absent field compares as `"undefined"`. Unknown operators
/// hold.
pub fn evaluate_condition(
    data: &Value,
    field: &str,
    operator: &ConditionOperator,
    compare_value: Option<&str>,
) -> bool {
    let value = resolve_field(data, field);

    match operator {
        ConditionOperator::Exists => !matches!(value, None | Some(Value::Null)),
        ConditionOperator::NotEmpty => !is_blank(value),
        ConditionOperator::IsEmpty => is_blank(value),
        ConditionOperator::Equals => {
            let Some(expected) = compare_value else {
                return false;
            };
            match value {
                Some(value) => stringify(value) == expected,
                None => expected == "undefined",
            }
        }
        ConditionOperator::Other(name) => {
            log::debug!("Unknown condition operator `{name}` on `{field}`, treating as true");
            true
        }
    }
}
