//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod config;
pub mod scan;

pub use config::{handle_config_command, load_settings};
pub use scan::{handle_scan_command, ScanArgs};
