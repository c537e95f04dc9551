//! Append-only persistent log store
//!
//! One JSON object per line in commit order, with an in-memory index for
//! bounded most-recent-first retrieval. All appends go through the writer's
//! serialized stage; any number of readers may run concurrently with them.

use crate::entry::LogEntry;
use crate::error::{LogError, Result};
use parking_lot::{Mutex, RwLock};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Append seam used by the writer's commit stage
///
/// `Store` is the production implementation; tests substitute failing
/// journals to exercise the writer's containment of persistence errors.
pub trait Journal: Send + Sync {
    fn append(&self, entry: &LogEntry) -> Result<()>;
}

/// Persistent log repository
///
/// The file handle is opened once per process lifetime and shared. The index
/// is published under a read-write lock after each durable write, so a
/// reader never observes a partially-written entry and an entry is visible
/// to every `recent` call issued after its `append` returned.
pub struct Store {
    path: PathBuf,
    file: Mutex<BufWriter<File>>,
    entries: RwLock<Vec<LogEntry>>,
}

impl Store {
    /// Open (creating if absent) and replay the store file
    ///
    /// Undecodable lines are skipped with a diagnostic warning rather than
    /// failing the open; surviving entries keep their commit order.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| LogError::StoreOpen {
                    path: path.clone(),
                    source,
                })?;
            }
        }

        let entries = replay(&path)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LogError::StoreOpen {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            file: Mutex::new(BufWriter::new(file)),
            entries: RwLock::new(entries),
        })
    }

    /// Durably append one entry
    ///
    /// Must be invoked only from the writer's serialized stage. Once this
    /// returns `Ok`, the entry is visible to all subsequent `recent` calls.
    pub fn append(&self, entry: &LogEntry) -> Result<()> {
        let line = serde_json::to_string(entry).map_err(|source| LogError::Encode { source })?;

        {
            let mut file = self.file.lock();
            write_line(&mut file, &line).map_err(|source| LogError::StoreAppend {
                path: self.path.clone(),
                source,
            })?;
        }

        self.entries.write().push(entry.clone());
        Ok(())
    }

    /// At most `limit` entries, most-recent-first
    ///
    /// Safe to call concurrently with ongoing appends.
    pub fn recent(&self, limit: usize) -> Vec<LogEntry> {
        let entries = self.entries.read();
        entries.iter().rev().take(limit).cloned().collect()
    }

    /// Number of committed entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Journal for Store {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        Store::append(self, entry)
    }
}

fn write_line(writer: &mut BufWriter<File>, line: &str) -> io::Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Rebuild the in-memory index from an existing store file
fn replay(path: &Path) -> Result<Vec<LogEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|source| LogError::StoreOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut entries = Vec::new();
    let mut damaged = 0usize;

    for line in reader.lines() {
        let line = line.map_err(|source| LogError::StoreOpen {
            path: path.to_path_buf(),
            source,
        })?;
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<LogEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(_) => damaged += 1,
        }
    }

    if damaged > 0 {
        warn!(
            "skipped {} damaged line(s) while replaying {}",
            damaged,
            path.display()
        );
    }

    Ok(entries)
}
