//! Scanner settings for recordtrail
//!
//! Holds the review window, the identities each extraction rule keys on, and
//! the allow-lists the importance gate consults. Every field has a default,
//! so a partial settings file only needs to name what it overrides.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use super::paths::TrailPaths;
use crate::error::TrailError;

/// Identities of the singleton documents the rules key on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentIds {
    /// The instance-wide login/session document
    pub instance_login: String,
    /// The user-settings document
    pub user_settings: String,
}

impl Default for DocumentIds {
    fn default() -> Self {
        Self {
            instance_login: "f0380b58-0987-43d9-89f7-bcffa6fff82c".to_string(),
            user_settings: "4a152c0c-df7c-4ad5-8c62-495a01216308".to_string(),
        }
    }
}

impl DocumentIds {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [self.instance_login.as_str(), self.user_settings.as_str()].into_iter()
    }
}

/// Identities of the forms the rules key on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormIds {
    pub login: String,
    pub user: String,
    pub review: String,
    pub patient: String,
    pub image: String,
    pub video: String,
    pub procedure: String,
}

impl Default for FormIds {
    fn default() -> Self {
        Self {
            login: "f0533e05-617b-47ac-a5ca-32c3a36643c2".to_string(),
            user: "0f3894e8-b5ad-40b4-89a1-df30e8476a15".to_string(),
            review: "4ce26984-aad7-4847-9de1-9ad8d4f7fe9d".to_string(),
            patient: "0b2d5b3a-abed-44f2-959c-591f6af5161c".to_string(),
            image: "032d1643-a3cb-4a8e-8cd5-237b5f32e211".to_string(),
            video: "ee450438-2918-47d4-8892-b6f5df3d508a".to_string(),
            procedure: "e90b9ab4-085a-4973-8ef0-ae683599c92c".to_string(),
        }
    }
}

impl FormIds {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [
            self.login.as_str(),
            self.user.as_str(),
            self.review.as_str(),
            self.patient.as_str(),
            self.image.as_str(),
            self.video.as_str(),
            self.procedure.as_str(),
        ]
        .into_iter()
    }
}

/// Settings for a scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Length of the trailing review window in calendar months
    #[serde(default = "default_lookback_months")]
    pub lookback_months: u32,

    /// Singleton documents the extraction rules key on
    #[serde(default)]
    pub documents: DocumentIds,

    /// Forms the extraction rules key on
    #[serde(default)]
    pub forms: FormIds,

    /// Document identities the importance gate admits
    #[serde(default = "default_important_documents")]
    pub important_documents: BTreeSet<String>,

    /// Form identities the importance gate admits
    #[serde(default = "default_important_forms")]
    pub important_forms: BTreeSet<String>,

    /// Instant the window ends at; the current time when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_time: Option<DateTime<Utc>>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_lookback_months() -> u32 {
    1
}

fn default_important_documents() -> BTreeSet<String> {
    DocumentIds::default().iter().map(str::to_string).collect()
}

fn default_important_forms() -> BTreeSet<String> {
    FormIds::default().iter().map(str::to_string).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            lookback_months: default_lookback_months(),
            documents: DocumentIds::default(),
            forms: FormIds::default(),
            important_documents: default_important_documents(),
            important_forms: default_important_forms(),
            reference_time: None,
        }
    }
}

impl Settings {
    /// Load settings from an explicit file
    ///
    /// `.yaml`/`.yml` files are read as YAML, everything else as JSON.
    pub fn load(path: &Path) -> Result<Self, TrailError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TrailError::Config(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let settings: Settings = if is_yaml {
            serde_yaml::from_str(&contents).map_err(|e| {
                TrailError::Config(format!("Failed to parse settings file: {}", e))
            })?
        } else {
            serde_json::from_str(&contents).map_err(|e| {
                TrailError::Config(format!("Failed to parse settings file: {}", e))
            })?
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default location, or defaults if no file exists
    pub fn load_or_default(paths: &TrailPaths) -> Result<Self, TrailError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            Self::load(&settings_path)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default location
    pub fn save(&self, paths: &TrailPaths) -> Result<(), TrailError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            TrailError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            TrailError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Apply command-line overrides
    pub fn with_overrides(
        mut self,
        lookback_months: Option<u32>,
        reference_time: Option<DateTime<Utc>>,
    ) -> Self {
        if let Some(months) = lookback_months {
            self.lookback_months = months;
        }
        if reference_time.is_some() {
            self.reference_time = reference_time;
        }
        self
    }

    /// The instant the review window ends at
    pub fn reference_time_or_now(&self) -> DateTime<Utc> {
        self.reference_time.unwrap_or_else(Utc::now)
    }

    /// Reject rule identities that could never match a document
    pub fn validate(&self) -> Result<(), TrailError> {
        if self.documents.iter().chain(self.forms.iter()).any(str::is_empty) {
            return Err(TrailError::Config(
                "Document and form identities must not be empty".into(),
            ));
        }
        Ok(())
    }
}
