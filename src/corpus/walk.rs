//! Recursive discovery of change-event files

use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{TrailError, TrailResult};

/// File-name suffix every change-event file carries
pub const EVENT_SUFFIX: &str = ".json";

/// Whether a path names a change-event file
///
/// Matches on the file name, so a file called just `.json` counts too.
pub fn is_event_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(EVENT_SUFFIX))
}

/// Find every `*.json` file under `root`
///
/// Directory entries are visited in file-name order, so the result is the
/// same on every platform. Hidden files and ignore files are not special, and
/// directories are not followed through symlinks.
pub fn find_event_files(root: &Path) -> TrailResult<Vec<PathBuf>> {
    fs::metadata(root)
        .map_err(|e| TrailError::Io(format!("Failed to read {}: {}", root.display(), e)))?;

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut found = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            TrailError::Io(format!("Failed to walk {}: {}", root.display(), e))
        })?;

        let is_dir = entry.file_type().is_some_and(|file_type| file_type.is_dir());
        if !is_dir && is_event_file(entry.path()) {
            found.push(entry.into_path());
        }
    }

    Ok(found)
}
