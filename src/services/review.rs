//! Audit review service
//!
//! Runs the full pipeline over a set of change events: window and importance
//! gates, a stable sort, extraction, and emission to a sink.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::audit::{is_normalized_timestamp, AuditRecordExtractor, ImportanceClassifier, TimeWindow};
use crate::config::Settings;
use crate::corpus::{decode_event_file, find_event_files};
use crate::error::TrailResult;
use crate::export::RecordSink;
use crate::models::{RawEvent, RecordKind};

/// Statistics from one review
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Inclusive lower bound of the review window
    pub threshold: String,
    /// Change-event files found on disk
    pub files_scanned: usize,
    /// Events considered
    pub events: usize,
    /// Events modified before the threshold
    pub out_of_window: usize,
    /// In-window events outside both allow-lists
    pub unimportant: usize,
    /// Important, in-window events of a type other than `updated`
    pub inert: usize,
    /// Events records were extracted from (possibly zero records each)
    pub audited: usize,
    /// Documents whose `modified.at` is not in the fixed-width UTC profile
    pub non_normalized_timestamps: usize,
    /// Events skipped because a rule could not read a field
    pub extraction_failures: Vec<PathBuf>,
    /// Records emitted per kind
    pub records_by_kind: BTreeMap<RecordKind, usize>,
}

impl ScanReport {
    fn new(threshold: impl Into<String>) -> Self {
        Self {
            threshold: threshold.into(),
            ..Self::default()
        }
    }

    /// Total records emitted
    pub fn records_emitted(&self) -> usize {
        self.records_by_kind.values().sum()
    }
}

/// Sort events by modification timestamp, then path
pub fn sort_events(events: &mut [RawEvent]) {
    events.sort_by(|a, b| {
        (a.document().modified_at(), a.path()).cmp(&(b.document().modified_at(), b.path()))
    });
}

/// Service running audit reviews
pub struct ReviewService<'a> {
    settings: &'a Settings,
}

impl<'a> ReviewService<'a> {
    /// Create a new review service
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Scan a directory tree and emit its audit trail
    ///
    /// Every `*.json` file is decoded before any record is emitted; a file
    /// that cannot be decoded aborts the scan.
    pub fn scan_directory(&self, root: &Path, sink: &mut dyn RecordSink) -> TrailResult<ScanReport> {
        let files = find_event_files(root)?;
        debug!(root = %root.display(), files = files.len(), "discovered change-event files");

        let events = files
            .iter()
            .map(|path| decode_event_file(path))
            .collect::<TrailResult<Vec<_>>>()?;

        let mut report = self.review_events(events, sink)?;
        report.files_scanned = files.len();
        Ok(report)
    }

    /// Gate, order, extract and emit a set of decoded events
    ///
    /// A rule that cannot read a field it needs skips that event with a
    /// warning; the review carries on with the next one.
    pub fn review_events<I>(&self, events: I, sink: &mut dyn RecordSink) -> TrailResult<ScanReport>
    where
        I: IntoIterator<Item = RawEvent>,
    {
        let reference = self.settings.reference_time_or_now();
        let window = TimeWindow::new(reference, self.settings.lookback_months)?;
        let classifier = ImportanceClassifier::from_settings(self.settings);
        let extractor = AuditRecordExtractor::from_settings(self.settings);

        let mut report = ScanReport::new(window.threshold());
        let mut gated = Vec::new();

        for event in events {
            report.events += 1;
            let doc = event.document();

            if !is_normalized_timestamp(doc.modified_at()) {
                warn!(
                    path = %event.path.display(),
                    modified_at = doc.modified_at(),
                    "timestamp is not fixed-width UTC; window comparison may be wrong"
                );
                report.non_normalized_timestamps += 1;
            }

            if !window.contains(doc.modified_at()) {
                debug!(path = %event.path.display(), "outside review window");
                report.out_of_window += 1;
                continue;
            }

            if !classifier.is_important(doc) {
                debug!(path = %event.path.display(), "not on an allow-list");
                report.unimportant += 1;
                continue;
            }

            gated.push(event);
        }

        sort_events(&mut gated);

        for event in &gated {
            if !event.is_update() {
                debug!(
                    path = %event.path.display(),
                    event_type = event.event_type(),
                    "ignoring non-update event"
                );
                report.inert += 1;
                continue;
            }

            match extractor.extract(event) {
                Ok(records) => {
                    report.audited += 1;
                    for record in &records {
                        sink.emit(record)?;
                        *report.records_by_kind.entry(record.kind()).or_default() += 1;
                    }
                }
                Err(err) if err.is_extraction() => {
                    warn!(path = %event.path.display(), error = %err, "skipping event");
                    report.extraction_failures.push(event.path.clone());
                }
                Err(err) => return Err(err),
            }
        }

        sink.finish()?;

        info!(
            threshold = %report.threshold,
            events = report.events,
            audited = report.audited,
            records = report.records_emitted(),
            failures = report.extraction_failures.len(),
            "review complete"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::DelimitedSink;
    use crate::models::AuditRecord;
    use chrono::{DateTime, Utc};
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::TempDir;

    const NOW: &str = "2024-06-15T12:00:00Z";

    fn settings() -> Settings {
        let now = NOW.parse::<DateTime<Utc>>().unwrap();
        Settings::default().with_overrides(None, Some(now))
    }

    fn event(path: &str, doc: Value) -> RawEvent {
        RawEvent::implicit_update(path, serde_json::from_value(doc).unwrap())
    }

    fn patient(path: &str, at: &str) -> RawEvent {
        event(
            path,
            json!({
                "id": path,
                "f": {"id": Settings::default().forms.patient},
                "modified": {"at": at},
                "data": {"name": "Jane"}
            }),
        )
    }

    fn review(settings: &Settings, events: Vec<RawEvent>) -> (Vec<AuditRecord>, ScanReport) {
        let mut sink: Vec<AuditRecord> = Vec::new();
        let report = ReviewService::new(settings)
            .review_events(events, &mut sink)
            .unwrap();
        (sink, report)
    }

    #[test]
    fn test_window_gate() {
        let (records, report) = review(
            &settings(),
            vec![
                patient("in.json", "2024-06-01T00:00:00Z"),
                patient("edge.json", "2024-05-15T12:00:00Z"),
                patient("old.json", "2024-05-15T11:59:59Z"),
            ],
        );

        assert_eq!(records.len(), 2);
        assert_eq!(report.out_of_window, 1);
        assert_eq!(report.threshold, "2024-05-15T12:00:00Z");
    }

    #[test]
    fn test_importance_gate() {
        let (records, report) = review(
            &settings(),
            vec![event(
                "x.json",
                json!({"id": "x", "f": {"id": "unknown"}, "modified": {"at": "2024-06-01T00:00:00Z"}}),
            )],
        );

        assert!(records.is_empty());
        assert_eq!(report.unimportant, 1);
    }

    #[test]
    fn test_sorted_by_timestamp_then_path() {
        let (records, _) = review(
            &settings(),
            vec![
                patient("b.json", "2024-06-02T00:00:00Z"),
                patient("c.json", "2024-06-01T00:00:00Z"),
                patient("a.json", "2024-06-02T00:00:00Z"),
            ],
        );

        let order: Vec<&str> = records.iter().map(|r| r.fields()[2]).collect();
        assert_eq!(order, vec!["c.json", "a.json", "b.json"]);
    }

    #[test]
    fn test_explicit_non_update_is_inert() {
        let doc = serde_json::from_value(json!({
            "id": "p1",
            "f": {"id": Settings::default().forms.patient},
            "modified": {"at": "2024-06-01T00:00:00Z"}
        }))
        .unwrap();

        let (records, report) = review(&settings(), vec![RawEvent::explicit("p.json", "created", doc)]);

        assert!(records.is_empty());
        assert_eq!(report.inert, 1);
        assert_eq!(report.audited, 0);
    }

    #[test]
    fn test_extraction_failure_is_skipped() {
        let forms = Settings::default().forms;
        let (records, report) = review(
            &settings(),
            vec![
                event(
                    "review.json",
                    json!({
                        "id": "r1",
                        "f": {"id": forms.review},
                        "modified": {"at": "2024-06-01T00:00:00Z"},
                        "data": {}
                    }),
                ),
                patient("p.json", "2024-06-02T00:00:00Z"),
            ],
        );

        assert_eq!(records.len(), 1);
        assert_eq!(report.extraction_failures, vec![PathBuf::from("review.json")]);
        assert_eq!(report.audited, 1);
    }

    #[test]
    fn test_loosened_configuration_produces_trace() {
        let mut settings = settings();
        settings.important_forms.insert("inventory-form".to_string());

        let (records, _) = review(
            &settings,
            vec![event(
                "inv.json",
                json!({
                    "id": "inv-1",
                    "f": {"id": "inventory-form", "text": "Inventory"},
                    "modified": {"at": "2024-06-01T00:00:00Z"}
                }),
            )],
        );

        assert_eq!(
            records,
            vec![AuditRecord::Trace {
                at: "2024-06-01T00:00:00Z".into(),
                path: "inv.json".into(),
                event_type: "updated".into(),
                form_text: "Inventory".into(),
            }]
        );
    }

    #[test]
    fn test_non_normalized_timestamps_counted() {
        let (_, report) = review(
            &settings(),
            vec![
                patient("a.json", "2024-06-01T00:00:00+02:00"),
                patient("b.json", "2024-06-01T00:00:00Z"),
            ],
        );

        assert_eq!(report.non_normalized_timestamps, 1);
    }

    #[test]
    fn test_fractional_seconds_at_threshold_are_flagged() {
        let (records, report) = review(
            &settings(),
            vec![
                patient("frac.json", "2024-05-15T12:00:00.500Z"),
                patient("whole.json", "2024-05-15T12:00:00Z"),
            ],
        );

        assert_eq!(report.non_normalized_timestamps, 1);
        assert_eq!(report.out_of_window, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fields()[2], "whole.json");
    }

    #[test]
    fn test_records_by_kind() {
        let (_, report) = review(
            &settings(),
            vec![
                patient("a.json", "2024-06-01T00:00:00Z"),
                patient("b.json", "2024-06-02T00:00:00Z"),
            ],
        );

        assert_eq!(report.records_by_kind.get(&RecordKind::Patient), Some(&2));
        assert_eq!(report.records_emitted(), 2);
    }

    fn write_corpus(root: &Path) {
        let settings = Settings::default();
        let files = [
            (
                "session/instance.json",
                json!({
                    "id": settings.documents.instance_login,
                    "modified": {"at": "2024-06-10T08:00:00Z"},
                    "data": {"currentUser": {"id": "u1", "text": "Alice"}}
                }),
            ),
            (
                "users/u1.json",
                json!({
                    "type": "updated",
                    "document": {
                        "id": "u1",
                        "v": "rev-4",
                        "f": {"id": settings.forms.user},
                        "modified": {"at": "2024-06-09T08:00:00Z"},
                        "data": {"name": "Alice"},
                        "previous": {"patch": {"password": ["a", "b"], "locked": [false, true]}}
                    }
                }),
            ),
            (
                "users/u2.json",
                json!({
                    "type": "created",
                    "document": {
                        "id": "u2",
                        "v": "initial",
                        "f": {"id": settings.forms.user},
                        "modified": {"at": "2024-06-09T09:00:00Z"}
                    }
                }),
            ),
            (
                "old/p0.json",
                json!({
                    "id": "p0",
                    "f": {"id": settings.forms.patient},
                    "modified": {"at": "2023-01-01T00:00:00Z"},
                    "data": {"name": "Old"}
                }),
            ),
        ];

        for (relative, doc) in files {
            let path = root.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
        }
        fs::write(root.join("README.txt"), "not an event").unwrap();
    }

    fn scan_to_string(settings: &Settings, root: &Path) -> (String, ScanReport) {
        let mut sink = DelimitedSink::new(Vec::new());
        let report = ReviewService::new(settings)
            .scan_directory(root, &mut sink)
            .unwrap();
        (String::from_utf8(sink.into_inner()).unwrap(), report)
    }

    #[test]
    fn test_scan_directory() {
        let temp_dir = TempDir::new().unwrap();
        write_corpus(temp_dir.path());

        let (output, report) = scan_to_string(&settings(), temp_dir.path());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(report.files_scanned, 4);
        assert_eq!(report.out_of_window, 1);
        assert_eq!(report.inert, 1);
        assert_eq!(
            lines,
            vec![
                "2024-06-09T08:00:00Z;PASSWORD_CHANGE;u1;Alice;",
                "2024-06-09T08:00:00Z;USER_LOCK_CHANGE;u1;Alice;LOCKED;",
                "2024-06-10T08:00:00Z;LOGIN;u1;Alice;",
            ]
        );
    }

    #[test]
    fn test_scan_is_repeatable() {
        let temp_dir = TempDir::new().unwrap();
        write_corpus(temp_dir.path());

        let (first, _) = scan_to_string(&settings(), temp_dir.path());
        let (second, _) = scan_to_string(&settings(), temp_dir.path());
        assert_eq!(first, second);
    }

    #[test]
    fn test_corpus_timestamps_are_normalized() {
        let temp_dir = TempDir::new().unwrap();
        write_corpus(temp_dir.path());

        for path in find_event_files(temp_dir.path()).unwrap() {
            let event = decode_event_file(&path).unwrap();
            assert!(
                is_normalized_timestamp(event.document().modified_at()),
                "{}",
                path.display()
            );
        }
    }

    #[test]
    fn test_malformed_file_aborts_scan() {
        let temp_dir = TempDir::new().unwrap();
        write_corpus(temp_dir.path());
        let broken = temp_dir.path().join("users").join("broken.json");
        fs::write(&broken, "{ nope").unwrap();

        let mut sink: Vec<AuditRecord> = Vec::new();
        let err = ReviewService::new(&settings())
            .scan_directory(temp_dir.path(), &mut sink)
            .unwrap_err();

        assert!(err.is_decode());
        assert!(err.to_string().contains("broken.json"));
        assert!(sink.is_empty());
    }
}
