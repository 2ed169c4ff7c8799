//! Config CLI command
//!
//! Shows the effective settings and optionally writes them to the default
//! settings file.

use std::path::{Path, PathBuf};

use crate::config::{Settings, TrailPaths};
use crate::error::{TrailError, TrailResult};

/// Resolve settings from an explicit file or the default location
///
/// Returns the settings and the file they were (or would be) read from.
pub fn load_settings(explicit: Option<&Path>) -> TrailResult<(Settings, PathBuf)> {
    match explicit {
        Some(path) => Ok((Settings::load(path)?, path.to_path_buf())),
        None => {
            let paths = TrailPaths::new()?;
            let settings = Settings::load_or_default(&paths)?;
            Ok((settings, paths.settings_file()))
        }
    }
}

/// Handle the config command
pub fn handle_config_command(settings: &Settings, source: &Path, init: bool) -> TrailResult<()> {
    if init {
        let paths = TrailPaths::new()?;
        let target = paths.settings_file();
        if target.exists() {
            return Err(TrailError::Config(format!(
                "Settings file already exists: {}",
                target.display()
            )));
        }
        settings.save(&paths)?;
        println!("Settings written to {}", target.display());
        return Ok(());
    }

    let exists = source.exists();
    println!("recordtrail Configuration");
    println!("=========================");
    println!(
        "Settings file: {}{}",
        source.display(),
        if exists { "" } else { " (not found, using defaults)" }
    );
    println!();

    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| TrailError::Json(format!("Failed to serialize settings: {}", e)))?;
    println!("{}", json);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_explicit_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.json");
        std::fs::write(&path, r#"{"lookback_months": 4}"#).unwrap();

        let (settings, source) = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.lookback_months, 4);
        assert_eq!(source, path);
    }

    #[test]
    fn test_load_missing_explicit_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        assert!(load_settings(Some(&path)).is_err());
    }
}
