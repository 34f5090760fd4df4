//! User settings for proxyctl
//!
//! Manages the control service location, request timeout, where backups
//! are saved, and the default restore mode.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::ProxyctlPaths;
use crate::error::ProxyctlError;
use crate::models::RestoreMode;
use crate::transport::normalize_base_url;

/// User settings for proxyctl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the proxy control service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory exported backups are saved into (current directory if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,

    /// Merge mode used when a restore doesn't name one
    #[serde(default)]
    pub default_restore_mode: RestoreMode,
}

fn default_schema_version() -> u32 {
    1
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            download_dir: None,
            default_restore_mode: RestoreMode::default(),
        }
    }
}

impl Settings {
    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Directory exported backups are written to
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ProxyctlPaths) -> Result<Self, ProxyctlError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ProxyctlError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ProxyctlError::Config(format!("Failed to parse settings file: {}", e))
            })?;
            settings.validate()?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Check values a hand-edited file could get wrong
    pub fn validate(&self) -> Result<(), ProxyctlError> {
        if self.timeout_secs == 0 {
            return Err(ProxyctlError::Config(
                "timeout_secs in the settings file must be at least 1".into(),
            ));
        }
        normalize_base_url(&self.base_url)?;
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ProxyctlPaths) -> Result<(), ProxyctlError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ProxyctlError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            ProxyctlError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
