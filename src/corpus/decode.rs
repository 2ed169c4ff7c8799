//! Change-event decoding
//!
//! A file holds either an explicitly typed event (`{"type": ..., "document":
//! {...}}`) or a bare document, which is read as an implicit update. Any
//! failure here is malformed input and aborts the scan.

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{TrailError, TrailResult};
use crate::models::event::ExplicitEventWire;
use crate::models::{Document, RawEvent};

/// Read and decode one change-event file
pub fn decode_event_file(path: &Path) -> TrailResult<RawEvent> {
    let content = fs::read_to_string(path)
        .map_err(|e| TrailError::decode(path, format!("Failed to read file: {}", e)))?;

    decode_event(path, &content)
}

/// Decode change-event JSON read from `path`
pub fn decode_event(path: impl Into<PathBuf>, content: &str) -> TrailResult<RawEvent> {
    let path = path.into();

    let payload: Value = serde_json::from_str(content)
        .map_err(|e| TrailError::decode(&path, format!("Invalid JSON: {}", e)))?;

    if !payload.is_object() {
        return Err(TrailError::decode(&path, "Expected a JSON object"));
    }

    let is_typed = payload.get("type").is_some_and(|t| !t.is_null());

    if is_typed {
        let wire = ExplicitEventWire::deserialize(&payload).map_err(|e| {
            TrailError::decode(&path, format!("Invalid typed change event: {}", e))
        })?;
        let document = wire
            .document
            .ok_or_else(|| TrailError::decode(&path, "Typed change event has no document"))?;

        Ok(RawEvent::explicit(path, wire.event_type, document))
    } else {
        let document = Document::deserialize(&payload)
            .map_err(|e| TrailError::decode(&path, format!("Invalid document: {}", e)))?;

        Ok(RawEvent::implicit_update(path, document))
    }
}
