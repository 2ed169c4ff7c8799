//! Patch view over a document's previous revision
//!
//! A patch maps each changed field to a `[before, after]` pair. This module
//! reads those pairs safely and renders human-readable change summaries for
//! logging.

use serde_json::{Map, Value};

use super::document::value_kind;
use crate::error::FieldError;

/// Read-only view of `previous.patch`
#[derive(Debug, Clone, Copy)]
pub struct Patch<'a> {
    entries: &'a Map<String, Value>,
}

impl<'a> Patch<'a> {
    pub fn new(entries: &'a Map<String, Value>) -> Self {
        Self { entries }
    }

    /// Whether the patch records a change for `field`
    ///
    /// A `null` entry counts as no change.
    pub fn contains(&self, field: &str) -> bool {
        self.entries.get(field).is_some_and(|value| !value.is_null())
    }

    /// Names of all fields with a recorded change
    pub fn changed_fields(&self) -> impl Iterator<Item = &'a str> + 'a {
        let entries: &'a Map<String, Value> = self.entries;
        entries
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, _)| key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.changed_fields().next().is_none()
    }

    /// The `[before, after]` pair for `field`, if the field changed
    pub fn pair(&self, field: &str) -> Result<Option<(&'a Value, &'a Value)>, FieldError> {
        let entries: &'a Map<String, Value> = self.entries;
        let Some(value) = entries.get(field).filter(|v| !v.is_null()) else {
            return Ok(None);
        };

        match value.as_array().map(Vec::as_slice) {
            Some([before, after]) => Ok(Some((before, after))),
            Some(_) => Err(FieldError::new(
                patch_field(field),
                "a [before, after] pair",
                "an array of the wrong length",
            )),
            None => Err(FieldError::new(
                patch_field(field),
                "a [before, after] pair",
                value_kind(value),
            )),
        }
    }

    /// The boolean after-value of `field`, if the field changed
    pub fn after_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.pair(field)? {
            Some((_, after)) => after.as_bool().map(Some).ok_or_else(|| {
                FieldError::new(
                    format!("{}[1]", patch_field(field)),
                    "a boolean",
                    value_kind(after),
                )
            }),
            None => Ok(None),
        }
    }

    /// Generate a human-readable summary of every recorded change
    ///
    /// Returns `None` when nothing changed.
    pub fn summarize(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let changes: Vec<String> = self
            .changed_fields()
            .filter_map(|key| self.entries.get(key).map(|value| (key, value)))
            .map(|(key, value)| match value.as_array().map(Vec::as_slice) {
                Some([before, after]) => {
                    format!("{}: {} -> {}", key, format_value(before), format_value(after))
                }
                _ => format!("{}: {}", key, format_value(value)),
            })
            .collect();

        Some(changes.join(", "))
    }
}

fn patch_field(field: &str) -> String {
    format!("previous.patch.{}", field)
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            // Truncate long strings
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
