//! Audit record output for recordtrail
//!
//! Sinks receive records in the order the review produces them:
//! - Lines: semicolon-delimited `timestamp;KIND;field;...;` lines
//! - JSON: one tagged JSON object per line
//! - CSV: a header row plus one fixed-width row per record

pub mod csv;
pub mod json;
pub mod lines;

pub use self::csv::CsvSink;
pub use self::json::JsonLinesSink;
pub use self::lines::{format_line, DelimitedSink};

use clap::ValueEnum;
use std::io::Write;

use crate::error::TrailResult;
use crate::models::AuditRecord;

/// Receives audit records one at a time
pub trait RecordSink {
    fn emit(&mut self, record: &AuditRecord) -> TrailResult<()>;

    /// Flush anything buffered; called once after the last record
    fn finish(&mut self) -> TrailResult<()> {
        Ok(())
    }
}

impl RecordSink for Vec<AuditRecord> {
    fn emit(&mut self, record: &AuditRecord) -> TrailResult<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Semicolon-delimited lines
    #[default]
    Lines,
    /// JSON Lines, one record per line
    Json,
    /// CSV with a header row
    Csv,
}

/// Build the sink for a format
pub fn sink_for<'a, W: Write + 'a>(format: OutputFormat, writer: W) -> Box<dyn RecordSink + 'a> {
    match format {
        OutputFormat::Lines => Box::new(DelimitedSink::new(writer)),
        OutputFormat::Json => Box::new(JsonLinesSink::new(writer)),
        OutputFormat::Csv => Box::new(CsvSink::new(writer)),
    }
}
