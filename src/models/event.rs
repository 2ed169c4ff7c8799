//! Change event model
//!
//! A decoded change-event file. The payload shape is decided once at decode
//! time and never re-inferred downstream.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::document::Document;

/// Event type of a bare document payload
pub const UPDATED_EVENT: &str = "updated";

/// The two payload shapes a change-event file can take
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// Payload carried a top-level `type`
    Explicit {
        event_type: String,
        document: Document,
    },
    /// Bare document payload, implicitly an update
    ImplicitUpdate(Document),
}

/// Wire shape of an explicitly typed event
#[derive(Debug, Deserialize)]
pub(crate) struct ExplicitEventWire {
    #[serde(rename = "type")]
    pub event_type: String,

    #[serde(default)]
    pub document: Option<Document>,
}

/// One decoded change event
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    /// File the event was read from
    pub path: PathBuf,

    pub payload: EventPayload,
}

impl RawEvent {
    pub fn new(path: impl Into<PathBuf>, payload: EventPayload) -> Self {
        Self {
            path: path.into(),
            payload,
        }
    }

    /// Wrap a bare document as an implicit update
    pub fn implicit_update(path: impl Into<PathBuf>, document: Document) -> Self {
        Self::new(path, EventPayload::ImplicitUpdate(document))
    }

    /// Wrap a document in an explicitly typed event
    pub fn explicit(
        path: impl Into<PathBuf>,
        event_type: impl Into<String>,
        document: Document,
    ) -> Self {
        Self::new(
            path,
            EventPayload::Explicit {
                event_type: event_type.into(),
                document,
            },
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        match &self.payload {
            EventPayload::Explicit { document, .. } => document,
            EventPayload::ImplicitUpdate(document) => document,
        }
    }

    /// Explicit type, or `"updated"` for bare documents
    pub fn event_type(&self) -> &str {
        match &self.payload {
            EventPayload::Explicit { event_type, .. } => event_type,
            EventPayload::ImplicitUpdate(_) => UPDATED_EVENT,
        }
    }

    pub fn is_update(&self) -> bool {
        self.event_type() == UPDATED_EVENT
    }
}
