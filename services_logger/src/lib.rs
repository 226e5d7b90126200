//! # Logger Service
//!
//! This crate implements structured logging.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not text-based or printf-style.
//! Components hold a `Logger` handed to them at construction; there is no
//! global logger.
//!
//! ## Design
//!
//! - `LogEntry`: level, source, message and key/value fields
//! - `LogSink`: where entries go (memory buffer, nowhere, or a caller's sink)
//! - `Logger`: a sink plus a minimum level

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A structured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Source component (if known)
    pub source: Option<String>,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            source: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Sets the source component
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.fields.push((key.into(), value.to_string()));
        self
    }

    /// Looks up a field by key
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.level)?;
        if let Some(source) = &self.source {
            write!(f, " {source}:")?;
        }
        write!(f, " {}", self.message)?;
        for (key, value) in &self.fields {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}

/// Destination for log entries
pub trait LogSink: Send + Sync {
    /// Records one entry
    fn record(&self, entry: LogEntry);
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogSink;

impl LogSink for NullLogSink {
    fn record(&self, _entry: LogEntry) {}
}

/// Keeps entries in memory
///
/// Clones share the same buffer, so a test can keep one handle and give
/// another to the component under test.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogSink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryLogSink {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all recorded entries
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for MemoryLogSink {
    fn record(&self, entry: LogEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

/// A sink plus a minimum level
pub struct Logger {
    sink: Box<dyn LogSink>,
    min_level: LogLevel,
}

impl Logger {
    /// Creates a logger that forwards entries at or above `min_level`
    pub fn new(sink: impl LogSink + 'static, min_level: LogLevel) -> Self {
        Self {
            sink: Box::new(sink),
            min_level,
        }
    }

    /// A logger that records nothing
    pub fn disabled() -> Self {
        Self::new(NullLogSink, LogLevel::Error)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    /// Whether entries at `level` would be recorded
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Records an entry if its level passes the filter
    pub fn log(&self, entry: LogEntry) {
        if self.enabled(entry.level) {
            self.sink.record(entry);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}
