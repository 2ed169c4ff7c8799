//! recordtrail - Audit trails from form-based record-management change events
//!
//! This library scans a directory of change-event files written by a
//! form-based record-management application and derives a compact audit
//! trail for a trailing review window: logins and logouts, failed login
//! attempts and lockout overrides, new users, password and lock changes,
//! and changes to patients, procedures, reviews, images and videos.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Settings and path management
//! - `error`: Custom error types
//! - `models`: Documents, change events and audit records
//! - `corpus`: Change-event file discovery and decoding
//! - `audit`: Window and importance gates, record extraction
//! - `services`: The review pipeline
//! - `export`: Audit record sinks (delimited lines, JSON Lines, CSV)
//! - `display`: Terminal formatting of scan summaries
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use recordtrail::config::Settings;
//! use recordtrail::export::DelimitedSink;
//! use recordtrail::services::ReviewService;
//!
//! let settings = Settings::default();
//! let mut sink = DelimitedSink::new(std::io::stdout());
//! let report = ReviewService::new(&settings).scan_directory(root, &mut sink)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;

pub use error::{FieldError, TrailError, TrailResult};
