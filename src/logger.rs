//! Logger facade
//!
//! Owns the store, the serialized writer, the shared threshold, and the
//! export surface. Clones share all of them, so a `Logger` can be handed to
//! any number of concurrent call sites. Dropping the last clone lets the
//! commit thread drain its backlog and exit.

use crate::config::Config;
use crate::entry::{origin_description, Callsite};
use crate::error::Result;
use crate::export::Exporter;
use crate::level::{LevelHandle, LogLevel};
use crate::sink::{TraceSink, TracingSink};
use crate::store::Store;
use crate::writer::{Event, Writer};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

/// Leveled, persistent application logger
#[derive(Clone)]
pub struct Logger {
    level: LevelHandle,
    writer: Writer,
    exporter: Exporter,
    store: Arc<Store>,
}

impl Logger {
    /// Open the store and start the commit thread, mirroring to `tracing`
    pub fn new(config: Config) -> Result<Self> {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Same as [`new`](Self::new) with a custom trace sink
    pub fn with_sink(config: Config, sink: Arc<dyn TraceSink>) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(Store::open(&config.store_path)?);
        let level = LevelHandle::new(config.level);
        let writer = Writer::spawn(store.clone(), level.clone(), sink)?;
        let exporter = Exporter::new(store.clone(), config.retention_limit, config.export_file_name);

        Ok(Self {
            level,
            writer,
            exporter,
            store,
        })
    }

    /// Enqueue one event; fire-and-forget from the caller's perspective
    ///
    /// The origin is captured here, on the caller's thread, and only while
    /// the threshold is at its most verbose setting.
    pub fn log(&self, message: impl Into<String>, level: LogLevel, callsite: Callsite) {
        let origin = if self.level.get() == LogLevel::Debug {
            Some(origin_description(callsite))
        } else {
            None
        };
        self.writer.log(Event {
            level,
            origin,
            message: message.into(),
        });
    }

    pub fn debug(&self, message: impl Into<String>, callsite: Callsite) {
        self.log(message, LogLevel::Debug, callsite);
    }

    pub fn info(&self, message: impl Into<String>, callsite: Callsite) {
        self.log(message, LogLevel::Info, callsite);
    }

    pub fn warning(&self, message: impl Into<String>, callsite: Callsite) {
        self.log(message, LogLevel::Warning, callsite);
    }

    pub fn error(&self, message: impl Into<String>, callsite: Callsite) {
        self.log(message, LogLevel::Error, callsite);
    }

    /// Change the severity threshold; last write wins, effective for events
    /// the commit thread has not yet filtered
    pub fn set_level(&self, level: LogLevel) {
        self.level.set(level);
    }

    pub fn level(&self) -> LogLevel {
        self.level.get()
    }

    /// Block until everything logged before this call has been committed or
    /// dropped
    pub fn flush(&self) {
        self.writer.flush();
    }

    /// Most-recent-first text of at most `limit` entries
    ///
    /// Reads the store as-is; call [`flush`](Self::flush) first when every
    /// preceding `log` call must be included.
    pub fn export_text(&self, limit: usize) -> String {
        self.exporter.to_text(limit)
    }

    /// UTF-8 bytes of [`export_text`](Self::export_text)
    pub fn export_blob(&self, limit: usize) -> Vec<u8> {
        self.exporter.to_blob(limit)
    }

    /// Write the export to a file in the transient directory, off-thread
    pub fn export_file(&self, limit: usize) -> Receiver<Result<PathBuf>> {
        self.exporter.to_file(limit)
    }

    /// Number of committed entries
    pub fn entry_count(&self) -> usize {
        self.store.len()
    }
}
