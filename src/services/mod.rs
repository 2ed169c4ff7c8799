//! Service layer for recordtrail
//!
//! The service layer runs the audit pipeline on top of the corpus and audit
//! engine modules.

pub mod review;

pub use review::{sort_events, ReviewService, ScanReport};
