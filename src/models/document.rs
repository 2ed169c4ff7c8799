//! Document model
//!
//! The form-governed record under audit, with its current field values and
//! the patch against its previous revision. Field access goes through
//! fallible accessors so a mistyped value surfaces as a [`FieldError`]
//! instead of aborting the scan.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::patch::Patch;
use super::reference::{Reference, Timestamp};
use crate::error::FieldError;

/// Version marker carried by a document's first revision
pub const INITIAL_VERSION: &str = "initial";

/// A form-governed record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identity, unique across the corpus
    #[serde(default)]
    pub id: String,

    /// `"initial"` for the first revision, an opaque token afterwards
    #[serde(default, rename = "v")]
    pub version: String,

    /// The form schema governing `data`
    #[serde(default, rename = "f")]
    pub form: Reference,

    #[serde(default)]
    pub created: Timestamp,

    #[serde(default)]
    pub modified: Timestamp,

    /// Current field values
    #[serde(default, deserialize_with = "nullable_map")]
    pub data: Map<String, Value>,

    /// Prior revision details; holds `patch` on non-initial revisions
    #[serde(default, deserialize_with = "nullable_map")]
    pub previous: Map<String, Value>,
}

impl Document {
    /// Whether this is the document's first revision
    pub fn is_initial(&self) -> bool {
        self.version == INITIAL_VERSION
    }

    /// Raw last-modified timestamp
    pub fn modified_at(&self) -> &str {
        &self.modified.at
    }

    /// A non-null value from `data`
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name).filter(|value| !value.is_null())
    }

    /// Natural textual form of a `data` field
    ///
    /// Strings are returned verbatim, other scalars as their JSON text, and
    /// an absent or null field as the empty string.
    pub fn text(&self, name: &str) -> String {
        match self.field(name) {
            None => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// A boolean `data` field
    pub fn bool_field(&self, name: &str) -> Result<bool, FieldError> {
        let value = self.required(name, "a boolean")?;
        value
            .as_bool()
            .ok_or_else(|| FieldError::new(data_field(name), "a boolean", value_kind(value)))
    }

    /// A `data` field holding a reference object
    ///
    /// Missing keys inside the object read as empty strings.
    pub fn reference(&self, name: &str) -> Result<Reference, FieldError> {
        const EXPECTED: &str = "a reference object";

        let value = self.required(name, EXPECTED)?;
        if !value.is_object() {
            return Err(FieldError::new(data_field(name), EXPECTED, value_kind(value)));
        }

        Reference::deserialize(value).map_err(|_| {
            FieldError::new(data_field(name), EXPECTED, "an object with mistyped members")
        })
    }

    /// The patch against the previous revision, if one was recorded
    pub fn patch(&self) -> Result<Option<Patch<'_>>, FieldError> {
        match self.previous.get("patch") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(entries)) => Ok(Some(Patch::new(entries))),
            Some(other) => Err(FieldError::new(
                "previous.patch",
                "an object",
                value_kind(other),
            )),
        }
    }

    fn required(&self, name: &str, expected: &'static str) -> Result<&Value, FieldError> {
        self.field(name)
            .ok_or_else(|| FieldError::new(data_field(name), expected, "missing"))
    }
}

fn data_field(name: &str) -> String {
    format!("data.{}", name)
}

/// Describe the shape of a JSON value for error messages
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Accept `null` wherever a mapping is expected
fn nullable_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_wire_format() {
        let doc = document(json!({
            "id": "d1",
            "v": "initial",
            "f": {"id": "form-1", "v": "2", "text": "Patient"},
            "created": {"at": "2024-05-01T08:00:00Z"},
            "modified": {"at": "2024-05-02T09:30:00Z"},
            "data": {"name": "Jane"},
            "previous": null
        }));

        assert_eq!(doc.id, "d1");
        assert!(doc.is_initial());
        assert_eq!(doc.form.id, "form-1");
        assert_eq!(doc.form.text, "Patient");
        assert_eq!(doc.modified_at(), "2024-05-02T09:30:00Z");
        assert!(doc.previous.is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let doc = document(json!({"id": "d1"}));
        assert_eq!(doc.modified_at(), "");
        assert!(doc.data.is_empty());
        assert!(!doc.is_initial());
    }

    #[test]
    fn test_text() {
        let doc = document(json!({"data": {"name": "Jane", "age": 42, "gone": null}}));
        assert_eq!(doc.text("name"), "Jane");
        assert_eq!(doc.text("age"), "42");
        assert_eq!(doc.text("gone"), "");
        assert_eq!(doc.text("absent"), "");
    }

    #[test]
    fn test_bool_field() {
        let doc = document(json!({"data": {"success": false, "flag": "no"}}));
        assert!(!doc.bool_field("success").unwrap());

        let err = doc.bool_field("flag").unwrap_err();
        assert_eq!(err.field, "data.flag");
        assert_eq!(err.found, "a string");

        let err = doc.bool_field("missing").unwrap_err();
        assert_eq!(err.found, "missing");
    }

    #[test]
    fn test_reference() {
        let doc = document(json!({
            "data": {
                "user": {"id": "u1", "text": "Alice"},
                "bad": "u1",
                "mistyped": {"id": 7}
            }
        }));

        let user = doc.reference("user").unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.text, "Alice");

        assert_eq!(doc.reference("bad").unwrap_err().found, "a string");
        assert!(doc.reference("mistyped").is_err());
        assert_eq!(doc.reference("absent").unwrap_err().found, "missing");
    }

    #[test]
    fn test_patch() {
        let doc = document(json!({"previous": {"patch": {"locked": [false, true]}}}));
        let patch = doc.patch().unwrap().unwrap();
        assert!(patch.contains("locked"));

        let doc = document(json!({"previous": {}}));
        assert!(doc.patch().unwrap().is_none());

        let doc = document(json!({"previous": {"patch": null}}));
        assert!(doc.patch().unwrap().is_none());

        let doc = document(json!({"previous": {"patch": [1, 2]}}));
        assert_eq!(doc.patch().unwrap_err().found, "an array");
    }
}
