//! Centralized error types for the logger
//!
//! All logger errors are represented by the `LogError` enum.
//! Use `Result<T>` as shorthand for `std::result::Result<T, LogError>`.

use std::fmt;
use std::path::PathBuf;

/// All logger errors
#[derive(Debug)]
pub enum LogError {
    // === Store ===
    /// Failed to open or replay the store file
    StoreOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to append an entry to the store file
    StoreAppend {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to encode an entry for persistence
    Encode { source: serde_json::Error },

    // === Export ===
    /// Export target directory could not be resolved
    ExportDir,
    /// Failed to write the export file
    ExportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Config ===
    /// Failed to read the config file
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse the config file
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Invalid config value
    ConfigValidation { field: &'static str, reason: String },

    // === Runtime ===
    /// Failed to start a worker thread
    Spawn { source: std::io::Error },
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StoreOpen { source, .. }
            | Self::StoreAppend { source, .. }
            | Self::ExportWrite { source, .. }
            | Self::ConfigRead { source, .. }
            | Self::Spawn { source } => Some(source),
            Self::Encode { source } => Some(source),
            Self::ConfigParse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StoreOpen { path, .. } => {
                write!(f, "Cannot open log store: {}", path.display())
            }
            Self::StoreAppend { path, .. } => {
                write!(f, "Cannot append to log store: {}", path.display())
            }
            Self::Encode { .. } => write!(f, "Cannot encode log entry"),
            Self::ExportDir => write!(f, "Cannot resolve export directory"),
            Self::ExportWrite { path, .. } => {
                write!(f, "Cannot write export file: {}", path.display())
            }
            Self::ConfigRead { path, .. } => {
                write!(f, "Cannot read config file: {}", path.display())
            }
            Self::ConfigParse { path, .. } => {
                write!(f, "Cannot parse config file: {}", path.display())
            }
            Self::ConfigValidation { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            Self::Spawn { .. } => write!(f, "Failed to start worker thread"),
        }
    }
}

/// Alias for Result with LogError
pub type Result<T> = std::result::Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_offending_path() {
        let err = LogError::StoreAppend {
            path: PathBuf::from("/var/log/app.jsonl"),
            source: std::io::Error::other("disk full"),
        };
        let text = err.to_string();
        assert!(text.contains("/var/log/app.jsonl"));
    }

    #[test]
    fn test_source_chain_preserved() {
        use std::error::Error;

        let err = LogError::StoreOpen {
            path: PathBuf::from("x"),
            source: std::io::Error::other("denied"),
        };
        assert!(err.source().is_some());

        let err = LogError::ExportDir;
        assert!(err.source().is_none());
    }
}
