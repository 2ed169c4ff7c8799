//! Audit trail engine for recordtrail
//!
//! Decides which change events matter and turns them into typed audit
//! records.
//!
//! # Architecture
//!
//! The engine consists of three pure components:
//!
//! - `TimeWindow`: gates documents on their last-modified timestamp against
//!   a trailing window of calendar months.
//! - `ImportanceClassifier`: gates documents on the configured identity and
//!   form allow-lists.
//! - `AuditRecordExtractor`: routes an event to its form-specific rule and
//!   derives zero, one or two `AuditRecord`s, reading patch pairs to detect
//!   password changes, lock flips and lockout overrides.
//!
//! # Example
//!
//! ```rust,ignore
//! use recordtrail::audit::{AuditRecordExtractor, ImportanceClassifier, TimeWindow};
//!
//! let window = TimeWindow::new(now, settings.lookback_months)?;
//! let classifier = ImportanceClassifier::from_settings(&settings);
//! let extractor = AuditRecordExtractor::from_settings(&settings);
//!
//! let doc = event.document();
//! if window.contains(doc.modified_at()) && classifier.is_important(doc) {
//!     for record in extractor.extract(&event)? {
//!         sink.emit(&record)?;
//!     }
//! }
//! ```

mod classify;
mod extract;
mod window;

pub use classify::ImportanceClassifier;
pub use extract::{AuditRecordExtractor, Rule};
pub use window::{
    format_timestamp, in_window, is_normalized_timestamp, timestamp_at_or_after, TimeWindow,
};
