//! Rendering and export
//!
//! `render_text` is a pure, order-preserving function of its input. Blob and
//! file export read a bounded most-recent-first slice of the store; file
//! export runs on a worker thread and delivers its result through a channel
//! so it never blocks the requesting thread.

use crate::constants::EXPORT_THREAD_NAME;
use crate::entry::LogEntry;
use crate::error::{LogError, Result};
use crate::store::Store;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;

/// Render entries in the order given, one block per entry
///
/// Each block carries the timestamp, the severity label (omitted for the
/// empty `None` label), the origin when present, and the message. Blocks are
/// separated by a blank line.
pub fn render_text(entries: &[LogEntry]) -> String {
    entries
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(entry: &LogEntry) -> String {
    let mut block = entry
        .timestamp
        .format("%Y-%m-%d %H:%M:%S%.3f UTC")
        .to_string();

    let label = entry.level.label();
    if !label.is_empty() {
        block.push('\n');
        block.push_str(label);
    }
    if let Some(origin) = &entry.origin {
        block.push('\n');
        block.push_str(origin);
    }
    block.push('\n');
    block.push_str(&entry.message);
    block
}

/// Bounded export over a shared store
#[derive(Clone)]
pub struct Exporter {
    store: Arc<Store>,
    retention_limit: usize,
    file_name: String,
}

impl Exporter {
    pub fn new(store: Arc<Store>, retention_limit: usize, file_name: impl Into<String>) -> Self {
        Self {
            store,
            retention_limit,
            file_name: file_name.into(),
        }
    }

    /// Text of at most `limit` entries, most-recent-first
    ///
    /// The configured retention limit caps how many entries one call may
    /// retrieve.
    pub fn to_text(&self, limit: usize) -> String {
        render_text(&self.store.recent(self.effective_limit(limit)))
    }

    /// UTF-8 bytes of [`to_text`](Self::to_text)
    pub fn to_blob(&self, limit: usize) -> Vec<u8> {
        self.to_text(limit).into_bytes()
    }

    /// Write the rendered text to a fresh file in the transient directory
    ///
    /// Any previous export of the same name is overwritten. The work runs on
    /// a worker thread; the returned channel delivers the file path or an
    /// explicit failure.
    pub fn to_file(&self, limit: usize) -> Receiver<Result<PathBuf>> {
        let (tx, rx) = channel();
        let store = self.store.clone();
        let limit = self.effective_limit(limit);
        let file_name = self.file_name.clone();

        let worker_tx = tx.clone();
        let spawned = thread::Builder::new()
            .name(EXPORT_THREAD_NAME.to_string())
            .spawn(move || {
                let _ = worker_tx.send(write_export(&store, limit, &file_name));
            });
        if let Err(source) = spawned {
            let _ = tx.send(Err(LogError::Spawn { source }));
        }

        rx
    }

    fn effective_limit(&self, limit: usize) -> usize {
        limit.min(self.retention_limit)
    }
}

fn write_export(store: &Store, limit: usize, file_name: &str) -> Result<PathBuf> {
    let dir = std::env::temp_dir();
    if dir.as_os_str().is_empty() {
        return Err(LogError::ExportDir);
    }

    let path = dir.join(file_name);
    let text = render_text(&store.recent(limit));
    fs::write(&path, text.as_bytes()).map_err(|source| LogError::ExportWrite {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LogLevel;
    use chrono::DateTime;
    use proptest::prelude::*;

    fn make_entry(message: &str, level: LogLevel, origin: Option<&str>) -> LogEntry {
        LogEntry {
            timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            level,
            origin: origin.map(str::to_string),
            message: message.to_string(),
        }
    }

    fn populated_exporter(messages: &[&str], file_name: &str) -> (tempfile::TempDir, Exporter) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(Store::open(dir.path().join("store.jsonl")).unwrap());
        for m in messages {
            store.append(&make_entry(m, LogLevel::Info, None)).unwrap();
        }
        let exporter = Exporter::new(store, 15_000, file_name);
        (dir, exporter)
    }

    // === Rendering ===

    #[test]
    fn test_render_block_layout() {
        let entry = make_entry("it broke", LogLevel::Error, Some("thread 'main'"));
        let text = render_text(&[entry]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("UTC"));
        assert_eq!(lines[1], "[ERROR]");
        assert_eq!(lines[2], "thread 'main'");
        assert_eq!(lines[3], "it broke");
    }

    #[test]
    fn test_render_omits_empty_label_and_origin() {
        let entry = make_entry("suppressed", LogLevel::None, None);
        let text = render_text(&[entry]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "suppressed");
    }

    #[test]
    fn test_render_empty_input() {
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn test_render_separates_blocks_with_blank_line() {
        let entries = [
            make_entry("first", LogLevel::Info, None),
            make_entry("second", LogLevel::Info, None),
        ];
        let text = render_text(&entries);
        assert_eq!(text.matches("\n\n").count(), 1);
        assert!(text.contains("first\n\n"));
    }

    proptest! {
        #[test]
        fn test_render_is_order_preserving(messages in proptest::collection::vec("[a-z0-9 ]{1,20}", 0..16)) {
            let entries: Vec<LogEntry> = messages
                .iter()
                .map(|m| make_entry(m, LogLevel::Info, None))
                .collect();

            let forward = render_text(&entries);
            if entries.is_empty() {
                prop_assert_eq!(forward, "");
            } else {
                let blocks: Vec<&str> = forward.split("\n\n").collect();
                prop_assert_eq!(blocks.len(), entries.len());

                let reversed: Vec<LogEntry> = entries.iter().rev().cloned().collect();
                let backward = render_text(&reversed);
                let backward_blocks: Vec<&str> = backward.split("\n\n").collect();
                let expected: Vec<&str> = blocks.iter().rev().copied().collect();
                prop_assert_eq!(backward_blocks, expected);
            }
        }
    }

    // === Bounded export ===

    #[test]
    fn test_to_text_most_recent_first() {
        let (_dir, exporter) = populated_exporter(&["a", "b", "c"], "lv-text-order.txt");
        let text = exporter.to_text(10);
        let blocks: Vec<&str> = text.split("\n\n").collect();

        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].ends_with("c"));
        assert!(blocks[2].ends_with("a"));
    }

    #[test]
    fn test_to_text_bounded_by_limit() {
        let (_dir, exporter) = populated_exporter(&["a", "b", "c", "d"], "lv-text-limit.txt");
        let text = exporter.to_text(2);
        let blocks: Vec<&str> = text.split("\n\n").collect();

        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].ends_with("d"));
        assert!(blocks[1].ends_with("c"));
    }

    #[test]
    fn test_retention_limit_caps_retrieval() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(Store::open(dir.path().join("store.jsonl")).unwrap());
        for m in ["a", "b", "c", "d"] {
            store.append(&make_entry(m, LogLevel::Info, None)).unwrap();
        }
        let exporter = Exporter::new(store, 2, "capped.txt");

        let blocks: Vec<String> = exporter
            .to_text(100)
            .split("\n\n")
            .map(str::to_string)
            .collect();
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_blob_is_utf8_of_text() {
        let (_dir, exporter) = populated_exporter(&["a", "b"], "lv-blob.txt");
        assert_eq!(exporter.to_blob(10), exporter.to_text(10).into_bytes());
    }

    // === File export ===

    #[test]
    fn test_to_file_matches_to_text() {
        let (_dir, exporter) = populated_exporter(&["x", "y", "z"], "lv-file-match.txt");

        let path = exporter.to_file(10).recv().unwrap().unwrap();
        let written = fs::read(&path).unwrap();
        assert_eq!(written, exporter.to_blob(10));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_to_file_overwrites_previous_export() {
        let (_dir, exporter) = populated_exporter(&["one"], "lv-file-overwrite.txt");

        let path = exporter.to_file(10).recv().unwrap().unwrap();
        fs::write(&path, "stale contents that are much longer than the export").unwrap();

        let path = exporter.to_file(10).recv().unwrap().unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("one"));

        let _ = fs::remove_file(path);
    }
}
