//! Namespace operations
//!
//! This module defines the operations a protocol layer performs on a namespace.
//! Every path argument is a raw caller path; implementations normalize it.

use crate::error::NamespaceError;
use vfs_types::Entry;

/// Namespace operations trait
pub trait NamespaceOperations {
    /// Add an entry
    ///
    /// The entry's path is normalized and locked. Missing parent directories
    /// are created when auto-creation is enabled.
    fn add(&mut self, entry: Entry) -> Result<(), NamespaceError>;

    /// Delete a file or an empty directory
    ///
    /// Returns false if nothing was removed: the path does not exist or names
    /// a directory that still has children.
    fn delete(&mut self, path: &str) -> bool;

    /// Move a file, or a directory together with everything below it
    fn rename(&mut self, from_path: &str, to_path: &str) -> Result<(), NamespaceError>;

    /// Whether any entry exists at the path
    fn exists(&self, path: &str) -> bool;

    /// Whether a directory exists at the path
    fn is_directory(&self, path: &str) -> bool;

    /// Whether a file exists at the path
    fn is_file(&self, path: &str) -> bool;

    /// List entries
    ///
    /// A file path yields that file. Otherwise the path names a directory,
    /// optionally with `*`/`?` wildcards in its last component, and the
    /// result is the directory's direct children whose names match.
    fn list_files(&self, path: &str) -> Vec<&Entry>;

    /// Names of the entries `list_files` returns
    fn list_names(&self, path: &str) -> Vec<String> {
        self.list_files(path)
            .into_iter()
            .map(|entry| entry.name().to_string())
            .collect()
    }
}
