//! # Listing Formatter
//!
//! Renders a single namespace entry as one line of a directory listing.
//!
//! ## Contract
//!
//! - A formatter sees one `Entry` and nothing else: no parent lookups, no
//!   access to the rest of the namespace
//! - Formatting is pure: same entry in, same line out
//! - The output is a single line without a trailing newline
//!
//! ## Formatters
//!
//! - `UnixListingFormatter`: `ls -l` style lines
//! - `WindowsListingFormatter`: IIS/`dir` style lines
//! - `NameOnlyFormatter`: just the entry name
//! - Any `Fn(&Entry) -> String + Send + Sync` closure

pub mod unix;
pub mod windows;

pub use unix::UnixListingFormatter;
pub use windows::WindowsListingFormatter;

use chrono::{DateTime, Utc};
use vfs_types::Entry;

/// Renders an entry as one listing line
pub trait EntryFormatter: Send + Sync {
    /// Formats the entry
    fn format(&self, entry: &Entry) -> String;
}

impl<F> EntryFormatter for F
where
    F: Fn(&Entry) -> String + Send + Sync,
{
    fn format(&self, entry: &Entry) -> String {
        self(entry)
    }
}

/// Formats an entry as its bare name
#[derive(Debug, Clone, Copy, Default)]
pub struct NameOnlyFormatter;

impl EntryFormatter for NameOnlyFormatter {
    fn format(&self, entry: &Entry) -> String {
        entry.name().to_string()
    }
}

/// Timestamp shown for entries that were never stamped
pub(crate) fn timestamp_or_epoch(entry: &Entry) -> DateTime<Utc> {
    entry.last_modified().unwrap_or_default()
}
