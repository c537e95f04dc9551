//! Severity levels and the persistence threshold
//!
//! `LogLevel` is an ordered enumeration with stable integer ranks used by the
//! persisted format. `LevelHandle` is the process-wide mutable threshold:
//! last write wins, no synchronization barrier, so a log call in flight when
//! the level changes may observe either value.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Ordered severity of a log event
///
/// `None` is a sentinel: as a threshold it suppresses all persistence; as an
/// event category it is callable but excluded entirely by a `None` threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    None,
}

impl LogLevel {
    /// Stable integer rank used by the persisted format
    pub fn rank(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Warning => 2,
            Self::Error => 3,
            Self::None => 4,
        }
    }

    /// Inverse of [`rank`](Self::rank)
    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(Self::Debug),
            1 => Some(Self::Info),
            2 => Some(Self::Warning),
            3 => Some(Self::Error),
            4 => Some(Self::None),
            _ => None,
        }
    }

    /// Severity label used when rendering entries (`None` renders no label)
    pub fn label(self) -> &'static str {
        match self {
            Self::Debug => "[DEBUG]",
            Self::Info => "[INFO]",
            Self::Warning => "[WARN]",
            Self::Error => "[ERROR]",
            Self::None => "",
        }
    }

    /// Lowercase name accepted by config files and the CLI
    pub fn name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::None => "none",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "none" => Ok(Self::None),
            _ => Err(format!("unknown log level: {}", s)),
        }
    }
}

// Persisted entries carry the integer rank; config files may use either the
// rank or the lowercase name.
impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.rank())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct LevelVisitor;

        impl Visitor<'_> for LevelVisitor {
            type Value = LogLevel;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a severity rank 0-4 or a level name")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<LogLevel, E> {
                u8::try_from(v)
                    .ok()
                    .and_then(LogLevel::from_rank)
                    .ok_or_else(|| E::custom(format!("unknown severity rank: {}", v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<LogLevel, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("unknown severity rank: {}", v)))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<LogLevel, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(LevelVisitor)
    }
}

/// Whether an event of severity `event` is persisted under threshold `current`
///
/// A `None` threshold excludes everything, including `None`-category events.
pub fn should_persist(event: LogLevel, current: LogLevel) -> bool {
    current != LogLevel::None && event.rank() >= current.rank()
}

/// Shared mutable severity threshold
///
/// Clones observe the same value. Reads and writes are relaxed atomics:
/// the design accepts eventual consistency of the filter setting.
#[derive(Debug, Clone)]
pub struct LevelHandle(Arc<AtomicU8>);

impl LevelHandle {
    pub fn new(level: LogLevel) -> Self {
        Self(Arc::new(AtomicU8::new(level.rank())))
    }

    pub fn get(&self) -> LogLevel {
        LogLevel::from_rank(self.0.load(Ordering::Relaxed)).unwrap_or(LogLevel::Debug)
    }

    pub fn set(&self, level: LogLevel) {
        self.0.store(level.rank(), Ordering::Relaxed);
    }
}

impl Default for LevelHandle {
    fn default() -> Self {
        Self::new(LogLevel::Debug)
    }
}
