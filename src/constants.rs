//! Crate-wide constants
//!
//! Centralized defaults to avoid duplication and ensure consistency.

// =============================================================================
// Retrieval
// =============================================================================

/// Maximum entries a single export call may retrieve by default
pub const DEFAULT_RETENTION_LIMIT: usize = 15_000;

// =============================================================================
// Files
// =============================================================================

/// Default file name of the persistent store
pub const DEFAULT_STORE_FILE_NAME: &str = "logvault.jsonl";

/// Default file name for text exports in the transient directory
pub const DEFAULT_EXPORT_FILE_NAME: &str = "logs.txt";

// =============================================================================
// Threads
// =============================================================================

/// Name of the dedicated commit thread
pub const WRITER_THREAD_NAME: &str = "logvault-writer";

/// Name of the export worker thread
pub const EXPORT_THREAD_NAME: &str = "logvault-export";
