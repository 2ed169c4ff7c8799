//! Display formatting for terminal output
//!
//! Provides utilities for formatting scan results for terminal display.

pub mod summary;

pub use summary::format_scan_summary;
