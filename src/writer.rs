//! Serialized commit path
//!
//! Log calls from any number of threads are funneled through an unbounded
//! FIFO channel drained by one dedicated commit thread:
//! - callers never block on storage I/O; `log` is an enqueue and returns
//! - at most one commit is in flight, applied in queue order
//! - a failed commit is dropped and the queue moves on with the next event
//!
//! Every event is also mirrored to the trace sink, filtered or not,
//! independent of persistence outcome.

use crate::constants::WRITER_THREAD_NAME;
use crate::entry::LogEntry;
use crate::error::{LogError, Result};
use crate::level::{should_persist, LevelHandle, LogLevel};
use crate::sink::TraceSink;
use crate::store::Journal;
use chrono::Utc;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::warn;

/// One queued log event, captured at the call boundary
#[derive(Debug)]
pub struct Event {
    pub level: LogLevel,
    /// Calling context; already rendered on the caller's thread
    pub origin: Option<String>,
    pub message: String,
}

enum Cmd {
    Event(Event),
    Flush(Sender<()>),
}

/// Handle to the serialized commit stage
///
/// Cloneable; all clones feed the same queue. Dropping the last clone
/// disconnects the channel and the commit thread exits after draining its
/// backlog.
#[derive(Clone)]
pub struct Writer {
    tx: Sender<Cmd>,
}

impl Writer {
    /// Spawn the commit thread over the given journal
    pub fn spawn<J>(journal: Arc<J>, level: LevelHandle, sink: Arc<dyn TraceSink>) -> Result<Self>
    where
        J: Journal + 'static,
    {
        let (tx, rx) = channel::<Cmd>();

        thread::Builder::new()
            .name(WRITER_THREAD_NAME.to_string())
            .spawn(move || run_commit_loop(rx, journal, level, sink))
            .map_err(|source| LogError::Spawn { source })?;

        Ok(Self { tx })
    }

    /// Enqueue one event; never blocks on I/O
    ///
    /// Returns false when the commit stage has terminated.
    pub fn log(&self, event: Event) -> bool {
        self.tx.send(Cmd::Event(event)).is_ok()
    }

    /// Block until everything enqueued before this call has been committed
    /// or dropped
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = channel();
        if self.tx.send(Cmd::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

fn run_commit_loop<J: Journal>(
    rx: Receiver<Cmd>,
    journal: Arc<J>,
    level: LevelHandle,
    sink: Arc<dyn TraceSink>,
) {
    for cmd in rx {
        match cmd {
            Cmd::Event(event) => commit(journal.as_ref(), &level, sink.as_ref(), event),
            Cmd::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    // Channel disconnected: every producer is gone and the backlog is drained.
}

/// Handle one event inside the serialized stage
///
/// Mirrors first, then filters, then commits. The filter runs here, after
/// ordering is established, so filtered events never consume a commit slot
/// and filtering never reorders survivors.
fn commit<J: Journal>(journal: &J, level: &LevelHandle, sink: &dyn TraceSink, event: Event) {
    let line = match &event.origin {
        Some(origin) => format!("{} {}", origin, event.message),
        None => event.message.clone(),
    };
    sink.emit(event.level, &line);

    if !should_persist(event.level, level.get()) {
        return;
    }

    let entry = LogEntry {
        timestamp: Utc::now(),
        level: event.level,
        origin: event.origin,
        message: event.message,
    };

    if let Err(e) = journal.append(&entry) {
        // Dropped from durable storage; the call site must never see this.
        warn!("log commit dropped: {}", e);
    }
}
