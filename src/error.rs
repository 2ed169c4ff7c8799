//! Custom error types for recordtrail
//!
//! This module defines the error hierarchy for the scanner using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// A document field that was absent or had an unexpected shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field '{field}' is {found}, expected {expected}")]
pub struct FieldError {
    /// Dotted field name, e.g. `data.user` or `previous.patch.locked`
    pub field: String,
    /// Shape the extraction rule needed
    pub expected: &'static str,
    /// Shape actually present
    pub found: &'static str,
}

impl FieldError {
    pub fn new(field: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        Self {
            field: field.into(),
            expected,
            found,
        }
    }
}

/// The main error type for recordtrail operations
#[derive(Error, Debug)]
pub enum TrailError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A change-event file could not be read or decoded
    #[error("Failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    /// An extraction rule could not read a field it depends on
    #[error("Failed to extract audit records from {}: {source}", path.display())]
    Extraction {
        path: PathBuf,
        #[source]
        source: FieldError,
    },

    /// Writing audit records failed
    #[error("Output error: {0}")]
    Output(String),
}

impl TrailError {
    /// Create a decode error for a change-event file
    pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this is a recoverable per-event extraction error
    pub fn is_extraction(&self) -> bool {
        matches!(self, Self::Extraction { .. })
    }

    /// Check if this is a malformed-input error
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

impl From<std::io::Error> for TrailError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrailError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for recordtrail operations
pub type TrailResult<T> = Result<T, TrailError>;
