//! Path management for recordtrail
//!
//! Resolves where the settings file lives.
//!
//! ## Path Resolution Order
//!
//! 1. `RECORDTRAIL_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/recordtrail` or `~/.config/recordtrail`
//! 3. Windows: `%APPDATA%\recordtrail`

use std::path::PathBuf;

use crate::error::TrailError;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "RECORDTRAIL_CONFIG_DIR";

/// Manages the paths used by recordtrail
#[derive(Debug, Clone)]
pub struct TrailPaths {
    /// Base directory for recordtrail configuration
    base_dir: PathBuf,
}

impl TrailPaths {
    /// Create a new TrailPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or application-data directory can be
    /// determined.
    pub fn new() -> Result<Self, TrailError> {
        let base_dir = if let Ok(custom) = std::env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create TrailPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), TrailError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TrailError::Io(format!("Failed to create config directory: {}", e)))
    }
}

/// Resolve the default configuration directory based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, TrailError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                TrailError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("recordtrail"))
}

/// Resolve the default configuration directory based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, TrailError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| TrailError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("recordtrail"))
}
