//! Change-event corpus access
//!
//! Finds change-event files under a directory tree and decodes them into
//! [`RawEvent`](crate::models::RawEvent)s.

pub mod decode;
pub mod walk;

pub use decode::{decode_event, decode_event_file};
pub use walk::{find_event_files, is_event_file};
