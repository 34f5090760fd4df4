//! Path management for proxyctl
//!
//! Provides XDG-compliant path resolution for configuration and the
//! activity log.
//!
//! ## Path Resolution Order
//!
//! 1. `PROXYCTL_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/proxyctl` or `~/.config/proxyctl`
//! 3. Windows: `%APPDATA%\proxyctl`

use std::path::PathBuf;

use crate::error::ProxyctlError;

/// Manages all paths used by proxyctl
#[derive(Debug, Clone)]
pub struct ProxyctlPaths {
    /// Base directory for all proxyctl files
    base_dir: PathBuf,
}

impl ProxyctlPaths {
    /// Create a new ProxyctlPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, ProxyctlError> {
        let base_dir = if let Ok(custom) = std::env::var("PROXYCTL_CONFIG_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create ProxyctlPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/proxyctl/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the activity log
    pub fn activity_log(&self) -> PathBuf {
        self.base_dir.join("activity.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ProxyctlError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ProxyctlError::Io(format!("Failed to create config directory: {}", e)))
    }
}

/// Resolve the default config directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, ProxyctlError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("proxyctl"));
    }

    let dirs = directories::BaseDirs::new()
        .ok_or_else(|| ProxyctlError::Config("Could not determine home directory".into()))?;
    Ok(dirs.home_dir().join(".config").join("proxyctl"))
}

/// Resolve the default config directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, ProxyctlError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| ProxyctlError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("proxyctl"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ProxyctlPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.activity_log(), temp_dir.path().join("activity.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("proxyctl");
        let paths = ProxyctlPaths::with_base_dir(base.clone());

        paths.ensure_directories().unwrap();

        assert!(base.is_dir());
    }
}
