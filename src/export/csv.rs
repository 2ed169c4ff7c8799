//! CSV output
//!
//! Every row has the timestamp, the kind and three field columns; kinds with
//! fewer fields leave the trailing columns empty.

use std::io::Write;

use super::RecordSink;
use crate::error::{TrailError, TrailResult};
use crate::models::AuditRecord;

/// Number of kind-specific field columns
pub const FIELD_COLUMNS: usize = 3;

const HEADER: [&str; FIELD_COLUMNS + 2] = ["at", "kind", "field1", "field2", "field3"];

/// Writes records as CSV rows
pub struct CsvSink<W: Write> {
    writer: ::csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: ::csv::Writer::from_writer(writer),
            header_written: false,
        }
    }

    fn write_header(&mut self) -> TrailResult<()> {
        if !self.header_written {
            self.writer.write_record(HEADER).map_err(csv_error)?;
            self.header_written = true;
        }
        Ok(())
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn emit(&mut self, record: &AuditRecord) -> TrailResult<()> {
        self.write_header()?;

        let fields = record.fields();
        let mut row = Vec::with_capacity(FIELD_COLUMNS + 2);
        row.push(record.at());
        row.push(record.kind().as_str());
        row.extend(fields.iter().copied());
        row.resize(FIELD_COLUMNS + 2, "");

        self.writer.write_record(&row).map_err(csv_error)
    }

    fn finish(&mut self) -> TrailResult<()> {
        self.write_header()?;
        self.writer
            .flush()
            .map_err(|e| TrailError::Output(format!("Failed to flush output: {}", e)))
    }
}

fn csv_error(err: ::csv::Error) -> TrailError {
    TrailError::Output(format!("Failed to write CSV row: {}", err))
}
