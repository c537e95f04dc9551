//! Best-effort trace mirror
//!
//! Every event handled by the writer is mirrored to a `TraceSink`, tagged by
//! severity and independent of persistence outcome. The core depends only on
//! this trait, not on any concrete diagnostic backend.

use crate::level::LogLevel;

/// Accepts one leveled text line; must not block or fail
pub trait TraceSink: Send + Sync {
    fn emit(&self, level: LogLevel, line: &str);
}

/// Mirrors events into the process `tracing` subscriber
///
/// The `None` category maps to `trace`; `Error` maps to `error`, the
/// subscriber's maximum severity.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn emit(&self, level: LogLevel, line: &str) {
        match level {
            LogLevel::None => tracing::trace!("{}", line),
            LogLevel::Debug => tracing::debug!("{}", line),
            LogLevel::Info => tracing::info!("{}", line),
            LogLevel::Warning => tracing::warn!("{}", line),
            LogLevel::Error => tracing::error!("{}", line),
        }
    }
}
