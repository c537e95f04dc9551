//! Configuration
//!
//! Serde-based configuration with per-field defaults, loadable from a TOML
//! file. The store file lives next to the executable unless overridden.

use crate::constants::{
    DEFAULT_EXPORT_FILE_NAME, DEFAULT_RETENTION_LIMIT, DEFAULT_STORE_FILE_NAME,
};
use crate::error::{LogError, Result};
use crate::level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// =============================================================================
// Configuration
// =============================================================================

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial severity threshold (runtime-mutable through the logger)
    pub level: LogLevel,

    /// Maximum entries a single export call may retrieve
    pub retention_limit: usize,

    /// Path of the persistent store file
    pub store_path: PathBuf,

    /// File name of text exports in the transient directory
    pub export_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: LogLevel::Debug,
            retention_limit: DEFAULT_RETENTION_LIMIT,
            store_path: default_store_path(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl Config {
    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| LogError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&raw).map_err(|source| LogError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the logger cannot operate with
    pub fn validate(&self) -> Result<()> {
        if self.retention_limit == 0 {
            return Err(LogError::ConfigValidation {
                field: "retention_limit",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.export_file_name.is_empty() {
            return Err(LogError::ConfigValidation {
                field: "export_file_name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.export_file_name.contains(['/', '\\']) {
            return Err(LogError::ConfigValidation {
                field: "export_file_name",
                reason: "must be a bare file name".to_string(),
            });
        }
        Ok(())
    }
}

/// Store file next to the executable, falling back to the temp directory
fn default_store_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join(DEFAULT_STORE_FILE_NAME)))
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_STORE_FILE_NAME))
}
