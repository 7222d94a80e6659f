//! Entities served by the forms API and the request bodies sent back to it

use super::forms::Field;
use chrono::{DateTime, NaiveDateTime};
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Project information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "de_count")]
    pub forms_count: u32,
}

impl Project {
    /// Creation date formatted for cards, or an empty string when unknown
    pub fn created_date(&self) -> String {
        self.created_at
            .as_deref()
            .and_then(parse_timestamp)
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// User account as listed by the admin API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl User {
    pub fn role_label(&self) -> &'static str {
        if self.is_admin {
            "Admin"
        } else {
            "User"
        }
    }
}

/// A form and its field schema, as served by `GET /api/forms/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub project_id: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A form as listed by the collection endpoints. The schema is only counted,
/// so a field this client cannot render does not sink the whole list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FormSummary {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub project_id: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default, rename = "fields", deserialize_with = "de_len")]
    pub listed_fields: usize,
    #[serde(default)]
    pub fields_count: Option<u32>,
}

impl FormSummary {
    /// Number of fields, preferring the schema when the endpoint sent one
    pub fn field_count(&self) -> usize {
        match self.fields_count {
            Some(count) if self.listed_fields == 0 => count as usize,
            _ => self.listed_fields,
        }
    }
}

/// One submitted answer. Checkbox answers are the list of checked options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multi(Vec<String>),
}

impl FieldValue {
    /// Text shown in the submission detail table
    pub fn display(&self) -> String {
        match self {
            FieldValue::Single(value) => value.clone(),
            FieldValue::Multi(values) => values.join(", "),
        }
    }
}

/// Answers keyed by field label
pub type SubmissionFields = BTreeMap<String, FieldValue>;

/// A filled-in form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub form_id: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub form_name: Option<String>,
    #[serde(default)]
    pub patient_id: String,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub fields: SubmissionFields,
}

impl Submission {
    pub fn submitted_display(&self) -> String {
        self.submitted_at
            .as_deref()
            .and_then(parse_timestamp)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

/// Body of `POST /api/projects`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub name: String,
}

/// Body of `POST /api/users`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

/// Body of `POST /api/forms`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewForm {
    pub name: String,
    pub project_id: String,
    pub fields: Vec<Field>,
}

/// Body of `POST /api/submissions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSubmission {
    pub patient_number: String,
    pub form_id: String,
    pub fields: SubmissionFields,
}

/// Parse the timestamp formats the backend produces: RFC 3339, and the
/// naive `YYYY-MM-DD HH:MM:SS` it writes on insert.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(t) = DateTime::parse_from_rfc3339(value) {
        return Some(t.naive_local());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Identifiers arrive as strings or integers depending on the table.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
        }
    }
}

fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn de_opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

fn de_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

fn de_len<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    Ok(Option::<Vec<IgnoredAny>>::deserialize(deserializer)?.map_or(0, |v| v.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_project_accepts_integer_id_and_missing_count() {
        let project: Project = serde_json::from_value(json!({
            "id": 7,
            "name": "Trial A",
            "created_at": "2024-03-05 09:30:00",
            "camp_date": "050324"
        }))
        .unwrap();

        assert_eq!(project.id, "7");
        assert_eq!(project.forms_count, 0);
        assert_eq!(project.created_date(), "2024-03-05");
    }

    #[test]
    fn test_project_null_forms_count_is_zero() {
        let project: Project =
            serde_json::from_value(json!({ "id": "p1", "name": "X", "forms_count": null }))
                .unwrap();
        assert_eq!(project.forms_count, 0);
    }

    #[test]
    fn test_user_role_label() {
        let user: User =
            serde_json::from_value(json!({ "id": "u1", "email": "a@b.co", "is_admin": true }))
                .unwrap();
        assert_eq!(user.role_label(), "Admin");

        let user: User = serde_json::from_value(json!({ "id": "u2", "email": "c@d.co" })).unwrap();
        assert_eq!(user.role_label(), "User");
    }

    #[test]
    fn test_form_summary_field_count_prefers_schema() {
        let form: FormSummary = serde_json::from_value(json!({
            "id": 3,
            "name": "Intake",
            "project_id": 1,
            "fields": [{ "label": "Age", "type": "number" }],
            "fields_count": 9
        }))
        .unwrap();
        assert_eq!(form.project_id.as_deref(), Some("1"));
        assert_eq!(form.field_count(), 1);

        let summary: FormSummary =
            serde_json::from_value(json!({ "id": 4, "name": "Exit", "fields_count": 5 })).unwrap();
        assert_eq!(summary.field_count(), 5);
    }

    #[test]
    fn test_form_list_survives_unrenderable_field() {
        let listed = json!([
            { "id": 1, "name": "Good", "fields": [{ "label": "Age", "type": "number" }] },
            { "id": 2, "name": "Legacy", "fields": [{ "label": "When", "type": "date" }] }
        ]);

        let forms: Vec<FormSummary> = serde_json::from_value(listed.clone()).unwrap();
        let names: Vec<&str> = forms.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Good", "Legacy"]);
        assert_eq!(forms[1].field_count(), 1);

        // Opening the legacy form still rejects its schema
        assert!(serde_json::from_value::<Form>(listed[1].clone()).is_err());
    }

    #[test]
    fn test_form_summary_null_fields() {
        let form: FormSummary =
            serde_json::from_value(json!({ "id": 5, "name": "Blank", "fields": null })).unwrap();
        assert_eq!(form.field_count(), 0);
    }

    #[test]
    fn test_submission_field_values() {
        let submission: Submission = serde_json::from_value(json!({
            "id": "s1",
            "form_id": 3,
            "patient_id": "050324-12",
            "submitted_at": "2024-03-05T10:15:00+00:00",
            "fields": { "Age": "30", "Symptoms": ["Cough", "Fever"] }
        }))
        .unwrap();

        assert_eq!(submission.fields["Age"], FieldValue::Single("30".to_string()));
        assert_eq!(submission.fields["Symptoms"].display(), "Cough, Fever");
        assert_eq!(submission.submitted_display(), "2024-03-05 10:15");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-03-05T10:15:00.123456").is_some());
    }

    #[test]
    fn test_new_submission_body_shape() {
        let mut fields = SubmissionFields::new();
        fields.insert("Age".to_string(), FieldValue::Single("30".to_string()));
        fields.insert(
            "Colour".to_string(),
            FieldValue::Multi(vec!["Red".to_string(), "Blue".to_string()]),
        );
        let body = NewSubmission {
            patient_number: "12".to_string(),
            form_id: "3".to_string(),
            fields,
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "patient_number": "12",
                "form_id": "3",
                "fields": { "Age": "30", "Colour": ["Red", "Blue"] }
            })
        );
    }
}
