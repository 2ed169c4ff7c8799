//! JSON Lines output
//!
//! Writes each record as a single JSON object tagged with its `kind`.

use std::io::Write;

use super::RecordSink;
use crate::error::{TrailError, TrailResult};
use crate::models::AuditRecord;

/// Writes one JSON object per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn emit(&mut self, record: &AuditRecord) -> TrailResult<()> {
        let json = serde_json::to_string(record)
            .map_err(|e| TrailError::Json(format!("Failed to serialize audit record: {}", e)))?;

        writeln!(self.writer, "{}", json)
            .map_err(|e| TrailError::Output(format!("Failed to write audit record: {}", e)))
    }

    fn finish(&mut self) -> TrailResult<()> {
        self.writer
            .flush()
            .map_err(|e| TrailError::Output(format!("Failed to flush output: {}", e)))
    }
}
