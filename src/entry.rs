//! Log entry types
//!
//! Core types for representing committed log events and the call-site
//! metadata attached to them under the debug threshold policy.

use crate::level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source location supplied explicitly at the call boundary
///
/// `Callsite::default()` means "not captured". The module path stands in for
/// a function name; there is no stable function-name capture in the language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Callsite {
    pub file: &'static str,
    pub module: &'static str,
    pub line: u32,
}

impl Callsite {
    pub fn new(file: &'static str, module: &'static str, line: u32) -> Self {
        Self { file, module, line }
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_empty() && self.module.is_empty()
    }

    /// File name portion of the path
    pub fn file_name(&self) -> &str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file)
    }
}

/// A committed log event
///
/// Immutable once committed; commit order is the sole total order. The
/// timestamp is set by the serialized stage at commit time, not at call time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    /// Calling context; captured only under the debug threshold policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    pub message: String,
}

/// Render the calling context of the current thread plus the given callsite
///
/// Runs on the caller's thread so the thread identity is the caller's, not
/// the commit thread's.
pub fn origin_description(callsite: Callsite) -> String {
    let current = std::thread::current();
    let thread = current.name().unwrap_or("unnamed");

    if callsite.is_empty() {
        format!("thread '{}'", thread)
    } else {
        format!(
            "thread '{}', {}:{} ({})",
            thread,
            callsite.file_name(),
            callsite.line,
            callsite.module
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entry(origin: Option<&str>) -> LogEntry {
        LogEntry {
            timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            level: LogLevel::Info,
            origin: origin.map(str::to_string),
            message: "connection established".to_string(),
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let entry = make_entry(Some("thread 'main', app.rs:10 (app)"));
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: LogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_level_persisted_as_integer() {
        let json = serde_json::to_string(&make_entry(None)).unwrap();
        assert!(json.contains("\"level\":1"));
    }

    #[test]
    fn test_origin_omitted_when_absent() {
        let json = serde_json::to_string(&make_entry(None)).unwrap();
        assert!(!json.contains("origin"));

        let parsed: LogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.origin, None);
    }

    #[test]
    fn test_callsite_file_name_strips_directories() {
        let callsite = Callsite::new("src/store/mod.rs", "logvault::store", 42);
        assert_eq!(callsite.file_name(), "mod.rs");

        let callsite = Callsite::new("src\\store\\mod.rs", "logvault::store", 42);
        assert_eq!(callsite.file_name(), "mod.rs");
    }

    #[test]
    fn test_origin_description_contains_location() {
        let origin = origin_description(Callsite::new("src/net.rs", "app::net", 7));
        assert!(origin.contains("net.rs:7"));
        assert!(origin.contains("app::net"));
        assert!(origin.contains("thread"));
    }

    #[test]
    fn test_origin_description_empty_callsite() {
        let origin = origin_description(Callsite::default());
        assert!(origin.starts_with("thread '"));
        assert!(!origin.contains(".rs"));
    }
}
