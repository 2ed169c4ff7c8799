//! Reference and timestamp wrappers
//!
//! Small value types embedded by value inside documents.

use serde::{Deserialize, Serialize};

/// A pointer-by-identity to another entity (a user, a form definition)
///
/// Every field defaults to the empty string when absent, so a reference whose
/// `id` is missing reads the same as one whose `id` is `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Identity of the referenced entity
    #[serde(default)]
    pub id: String,

    /// Schema version of the referenced entity
    #[serde(default, rename = "v")]
    pub version: String,

    /// Display label
    #[serde(default)]
    pub text: String,
}

impl Reference {
    /// Whether the identity is the zero value
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// Timestamp wrapper as stored by the record-management application
///
/// `at` is kept as the raw ISO-8601 string; ordering is lexical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    #[serde(default)]
    pub at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_wire_names() {
        let reference: Reference =
            serde_json::from_str(r#"{"id": "u1", "v": "3", "text": "Alice"}"#).unwrap();
        assert_eq!(reference.id, "u1");
        assert_eq!(reference.version, "3");
        assert_eq!(reference.text, "Alice");
    }

    #[test]
    fn test_missing_id_is_empty() {
        let reference: Reference = serde_json::from_str(r#"{"text": "Nobody"}"#).unwrap();
        assert!(reference.is_empty());
    }
}
