//! Core data models for recordtrail
//!
//! This module contains the decoded change events (documents, references,
//! patches) and the typed audit records derived from them.

pub mod document;
pub mod event;
pub mod patch;
pub mod record;
pub mod reference;

pub use document::{Document, INITIAL_VERSION};
pub use event::{EventPayload, RawEvent, UPDATED_EVENT};
pub use patch::Patch;
pub use record::{AuditRecord, DocumentChange, LockState, LoginOutcome, RecordKind};
pub use reference::{Reference, Timestamp};
