//! Entry records
//!
//! An `Entry` is one file or directory. Files carry their contents; both kinds
//! carry descriptive metadata used when rendering listings.

use crate::permissions::Permissions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Returned when changing the path of an entry that a namespace has locked
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Path of entry {0} is locked")]
pub struct PathLocked(pub String);

/// The two kinds of namespace entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// A file with byte contents
    File,
    /// A directory; its children are the entries below its path
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "File"),
            EntryKind::Directory => write!(f, "Directory"),
        }
    }
}

/// A file or directory record
///
/// The path is whatever the caller supplied until the entry is added to a
/// namespace, which rewrites it to normalized form and locks it. After that,
/// `set_path` fails; use `clone_with_new_path` to derive a moved copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: String,
    kind: EntryKind,
    last_modified: Option<DateTime<Utc>>,
    owner: Option<String>,
    group: Option<String>,
    permissions: Option<Permissions>,
    contents: Vec<u8>,
    path_locked: bool,
}

impl Entry {
    fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
            last_modified: None,
            owner: None,
            group: None,
            permissions: None,
            contents: Vec::new(),
            path_locked: false,
        }
    }

    /// Creates an empty file entry
    pub fn file(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::File)
    }

    /// Creates a file entry holding `contents`
    pub fn file_with_contents(path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        let mut entry = Self::file(path);
        entry.contents = contents.into();
        entry
    }

    /// Creates a directory entry
    pub fn directory(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::Directory)
    }

    /// Sets the owner name
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the group name
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the permissions
    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Sets the last-modified timestamp
    pub fn with_last_modified(mut self, timestamp: DateTime<Utc>) -> Self {
        self.last_modified = Some(timestamp);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Returns the last path component
    ///
    /// Both `/` and `\` count as separators. A root path has an empty name.
    pub fn name(&self) -> &str {
        self.path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
    }

    /// Size in bytes; always zero for directories
    pub fn size(&self) -> u64 {
        self.contents.len() as u64
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Replaces the contents of a file
    ///
    /// Directories have no contents; the call is ignored for them.
    pub fn set_contents(&mut self, contents: impl Into<Vec<u8>>) {
        if self.is_file() {
            self.contents = contents.into();
        }
    }

    /// Appends bytes to the contents of a file
    pub fn append_contents(&mut self, bytes: &[u8]) {
        if self.is_file() {
            self.contents.extend_from_slice(bytes);
        }
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    pub fn set_last_modified(&mut self, timestamp: DateTime<Utc>) {
        self.last_modified = Some(timestamp);
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = Some(owner.into());
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn set_group(&mut self, group: impl Into<String>) {
        self.group = Some(group.into());
    }

    pub fn permissions(&self) -> Option<Permissions> {
        self.permissions
    }

    pub fn set_permissions(&mut self, permissions: Permissions) {
        self.permissions = Some(permissions);
    }

    /// Whether a namespace has locked this entry's path
    pub fn is_path_locked(&self) -> bool {
        self.path_locked
    }

    /// Locks the path; there is no unlock
    pub fn lock_path(&mut self) {
        self.path_locked = true;
    }

    /// Changes the path of an entry that is not yet locked
    pub fn set_path(&mut self, path: impl Into<String>) -> Result<(), PathLocked> {
        if self.path_locked {
            return Err(PathLocked(self.path.clone()));
        }
        self.path = path.into();
        Ok(())
    }

    /// Copies this entry under a new path
    ///
    /// The copy keeps all metadata and contents and is unlocked.
    pub fn clone_with_new_path(&self, path: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.path = path.into();
        copy.path_locked = false;
        copy
    }

    /// Consuming variant of `clone_with_new_path`
    pub fn into_new_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self.path_locked = false;
        self
    }
}
