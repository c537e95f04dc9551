//! Leveled, persistent application logging
//!
//! logvault accepts log events from arbitrary concurrent call sites, filters
//! them by severity, durably stores them in commit order, and renders a
//! bounded slice back out as text or a file:
//! - `LogLevel` / `LevelHandle` - severity ordering and the runtime threshold
//! - `Store` - append-only JSON-lines persistence with bounded read-back
//! - `Writer` - FIFO queue drained by one commit thread; callers never block
//! - `Exporter` - pure text rendering plus transient-file export
//! - `Logger` - facade wiring the pieces together

pub mod config;
pub mod constants;
pub mod entry;
pub mod error;
pub mod export;
pub mod level;
pub mod logger;
pub mod sink;
pub mod store;
pub mod writer;

pub use config::Config;
pub use entry::{Callsite, LogEntry};
pub use error::{LogError, Result};
pub use export::{render_text, Exporter};
pub use level::{should_persist, LevelHandle, LogLevel};
pub use logger::Logger;
pub use sink::{TraceSink, TracingSink};
pub use store::{Journal, Store};
pub use writer::{Event, Writer};

/// Initialize internal tracing for the logger's own diagnostics
///
/// Call early in main() before any logging occurs.
/// Set `verbose` to true for debug-level output.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .compact(),
        )
        .with(tracing_subscriber::EnvFilter::new(level))
        .try_init();
}
