//! Read-only data snapshot a template is rendered against.
//!
//! Field paths used by blocks address this structure through its camelCase
//! JSON projection, e.g. `patient.name` or `surgery.doneByAsString`.
//!
//! Every object keeps the fields it does not model in `extra`, so paths such
//! as `surgery.inwardManagement` still resolve. Extra values are carried as
//! given: rich-content blocks bound to them insert whatever the caller sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::types::TrustedHtml;
use crate::errors::{TemplateError, TemplateResult};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContext {
    pub patient: PatientContext,
    pub surgery: SurgeryContext,
    /// Present only when rendering a followup template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followup: Option<FollowupContext>,
    pub settings: SettingsContext,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TemplateContext {
    /// Parses a context assembled by the caller as JSON.
    pub fn from_json(source: &str) -> TemplateResult<Self> {
        serde_json::from_str(source).map_err(TemplateError::MalformedContext)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientContext {
    pub name: String,
    /// Personal health number.
    pub phn: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Doctor reference as shown on printed notes.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DoctorContext {
    pub name: String,
    pub designation: Option<String>,
}

impl DoctorContext {
    #[must_use]
    pub fn new(name: impl Into<String>, designation: Option<String>) -> Self {
        Self {
            name: name.into(),
            designation: designation
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SurgeryContext {
    pub title: String,
    /// Date already formatted for display by the caller.
    pub date: String,
    /// Bed head ticket number.
    pub bht: Option<String>,
    pub ward: Option<String>,
    pub done_by: Vec<DoctorContext>,
    pub assisted_by: Vec<DoctorContext>,
    pub done_by_as_string: String,
    pub assisted_by_as_string: String,
    pub diagnosis: Option<String>,
    pub notes: Option<TrustedHtml>,
    pub post_op_notes: Option<TrustedHtml>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SurgeryContext {
    /// Fills the `*AsString` fields from the doctor lists, joining names with
    /// ", " the same way the inline doctors list does.
    #[must_use]
    pub fn with_doctor_strings(mut self) -> Self {
        self.done_by_as_string = join_names(&self.done_by);
        self.assisted_by_as_string = join_names(&self.assisted_by);
        self
    }
}

fn join_names(doctors: &[DoctorContext]) -> String {
    doctors
        .iter()
        .map(|doctor| doctor.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FollowupContext {
    pub date: String,
    pub notes: Option<TrustedHtml>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Hospital settings printed in template headers.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsContext {
    pub hospital: String,
    pub unit: String,
    pub telephone: String,
    /// Base64 data URL of the hospital logo.
    pub logo: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_context() {
        let context = TemplateContext::from_json(
            r#"{
                "patient": { "name": "Jane", "age": 42 },
                "surgery": {
                    "title": "Appendicectomy",
                    "date": "01/02/2024",
                    "doneBy": [{ "name": "Dr. Silva", "designation": "Consultant" }],
                    "notes": "<p>Uneventful</p><script>x()</script>"
                },
                "settings": { "hospital": "General Hospital" }
            }"#,
        )
        .expect("valid context");

        assert_eq!(context.patient.age, Some(42));
        assert_eq!(context.surgery.done_by[0].name, "Dr. Silva");
        assert_eq!(
            context.surgery.notes.as_ref().map(TrustedHtml::as_str),
            Some("<p>Uneventful</p>")
        );
        assert!(context.followup.is_none());
    }

    #[test]
    fn doctor_strings_join_names() {
        let surgery = SurgeryContext {
            done_by: vec![
                DoctorContext::new("A", None),
                DoctorContext::new("B", Some("Registrar".to_string())),
            ],
            ..Default::default()
        }
        .with_doctor_strings();

        assert_eq!(surgery.done_by_as_string, "A, B");
        assert_eq!(surgery.assisted_by_as_string, "");
    }

    #[test]
    fn blank_designation_is_dropped() {
        let doctor = DoctorContext::new("A", Some("  ".to_string()));

        assert_eq!(doctor.designation, None);
    }

    #[test]
    fn keeps_fields_it_does_not_model() {
        let context = TemplateContext::from_json(
            r#"{
                "patient": { "name": "Jane", "bloodGroup": "O+" },
                "surgery": { "title": "Hernia repair", "inwardManagement": "IV fluids" },
                "settings": {}
            }"#,
        )
        .expect("valid context");

        assert_eq!(context.surgery.title, "Hernia repair");
        assert_eq!(
            context.surgery.extra.get("inwardManagement"),
            Some(&Value::from("IV fluids"))
        );

        let projected = serde_json::to_value(&context).expect("serializable");
        assert_eq!(projected["patient"]["bloodGroup"], "O+");
        assert_eq!(projected["surgery"]["inwardManagement"], "IV fluids");
    }

    #[test]
    fn malformed_context_is_reported() {
        let result = TemplateContext::from_json(r#"{ "patient": [] }"#);

        assert!(matches!(result, Err(TemplateError::MalformedContext(_))));
    }
}
