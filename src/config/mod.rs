//! Configuration module for recordtrail
//!
//! This module provides configuration management including:
//! - XDG-compliant settings path resolution
//! - Review window and allow-list settings

pub mod paths;
pub mod settings;

pub use paths::TrailPaths;
pub use settings::{DocumentIds, FormIds, Settings};
