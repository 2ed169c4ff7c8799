//! Semicolon-delimited audit lines
//!
//! Each record becomes `timestamp;KIND;field1;field2;...;` followed by a
//! newline. Fields are written verbatim.

use std::io::Write;

use super::RecordSink;
use crate::error::{TrailError, TrailResult};
use crate::models::AuditRecord;

/// Render one record without the trailing newline
pub fn format_line(record: &AuditRecord) -> String {
    let mut line = format!("{};{};", record.at(), record.kind());
    for field in record.fields() {
        line.push_str(field);
        line.push(';');
    }
    line
}

/// Writes one semicolon-delimited line per record
pub struct DelimitedSink<W: Write> {
    writer: W,
}

impl<W: Write> DelimitedSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for DelimitedSink<W> {
    fn emit(&mut self, record: &AuditRecord) -> TrailResult<()> {
        writeln!(self.writer, "{}", format_line(record))
            .map_err(|e| TrailError::Output(format!("Failed to write audit line: {}", e)))
    }

    fn finish(&mut self) -> TrailResult<()> {
        self.writer
            .flush()
            .map_err(|e| TrailError::Output(format!("Failed to flush output: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentChange, LockState, LoginOutcome};

    const AT: &str = "2024-06-01T10:00:00Z";

    #[test]
    fn test_login_line() {
        let record = AuditRecord::Login {
            at: AT.into(),
            user_id: "u1".into(),
            user_text: "Alice".into(),
        };
        assert_eq!(format_line(&record), "2024-06-01T10:00:00Z;LOGIN;u1;Alice;");
    }

    #[test]
    fn test_login_attempt_line() {
        let record = AuditRecord::LoginAttempt {
            at: AT.into(),
            user_id: "u1".into(),
            user_text: "Alice".into(),
            outcome: LoginOutcome::Failed,
        };
        assert_eq!(
            format_line(&record),
            "2024-06-01T10:00:00Z;LOGIN_ATTEMPT;u1;Alice;FAILED;"
        );
    }

    #[test]
    fn test_user_lock_change_line() {
        let record = AuditRecord::UserLockChange {
            at: AT.into(),
            doc_id: "u1".into(),
            name: "Alice".into(),
            new_state: LockState::Unlocked,
        };
        assert_eq!(
            format_line(&record),
            "2024-06-01T10:00:00Z;USER_LOCK_CHANGE;u1;Alice;UNLOCKED;"
        );
    }

    #[test]
    fn test_document_change_line() {
        let record = AuditRecord::NewUser(DocumentChange {
            at: AT.into(),
            name: "Alice".into(),
            doc_id: "u1".into(),
            path: "/data/users/u1.json".into(),
        });
        assert_eq!(
            format_line(&record),
            "2024-06-01T10:00:00Z;NEW_USER;Alice;u1;/data/users/u1.json;"
        );
    }

    #[test]
    fn test_trace_line() {
        let record = AuditRecord::Trace {
            at: AT.into(),
            path: "x.json".into(),
            event_type: "updated".into(),
            form_text: "Inventory".into(),
        };
        assert_eq!(
            format_line(&record),
            "2024-06-01T10:00:00Z;TRACE;x.json;updated;Inventory;"
        );
    }

    #[test]
    fn test_sink_writes_newlines() {
        let mut sink = DelimitedSink::new(Vec::new());
        sink.emit(&AuditRecord::Logout { at: AT.into() }).unwrap();
        sink.emit(&AuditRecord::Logout { at: AT.into() }).unwrap();
        sink.finish().unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            output,
            "2024-06-01T10:00:00Z;LOGOUT;\n2024-06-01T10:00:00Z;LOGOUT;\n"
        );
    }
}
