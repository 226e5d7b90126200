//! Namespace implementation
//!
//! The namespace owns a sorted map from normalized path to entry. Sorting
//! keeps every subtree contiguous, so descendant scans are range scans.

use crate::config::{NamespaceConfig, NamingConvention};
use crate::error::NamespaceError;
use crate::operations::NamespaceOperations;
use chrono::{DateTime, Utc};
use services_listing::{EntryFormatter, UnixListingFormatter, WindowsListingFormatter};
use services_logger::{LogEntry, LogLevel, LogSink, Logger};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use uuid::Uuid;
use vfs_path::{contains_wildcards, NameRules, PathAlgebra, WildcardPattern};
use vfs_types::{Entry, Permissions};

/// Unique identifier for a namespace instance
///
/// Used as the source of log entries so several namespaces can share a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespaceId(Uuid);

impl NamespaceId {
    /// Creates a new random namespace ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NamespaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namespace({})", self.0)
    }
}

/// Mutable access to a stored entry
///
/// Contents and metadata may change; the path and kind may not.
pub struct EntryMut<'a> {
    entry: &'a mut Entry,
}

impl EntryMut<'_> {
    pub fn set_contents(&mut self, contents: impl Into<Vec<u8>>) {
        self.entry.set_contents(contents);
    }

    pub fn append_contents(&mut self, bytes: &[u8]) {
        self.entry.append_contents(bytes);
    }

    pub fn set_last_modified(&mut self, timestamp: DateTime<Utc>) {
        self.entry.set_last_modified(timestamp);
    }

    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.entry.set_owner(owner);
    }

    pub fn set_group(&mut self, group: impl Into<String>) {
        self.entry.set_group(group);
    }

    pub fn set_permissions(&mut self, permissions: Permissions) {
        self.entry.set_permissions(permissions);
    }
}

impl Deref for EntryMut<'_> {
    type Target = Entry;

    fn deref(&self) -> &Entry {
        &*self.entry
    }
}

/// An in-memory hierarchical namespace
pub struct Namespace {
    id: NamespaceId,
    paths: PathAlgebra,
    formatter: Box<dyn EntryFormatter>,
    entries: BTreeMap<String, Entry>,
    auto_create_parents: bool,
    logger: Logger,
}

impl Namespace {
    /// Creates an empty namespace
    ///
    /// Parent auto-creation starts enabled and logging starts disabled.
    pub fn new(rules: impl NameRules + 'static, formatter: impl EntryFormatter + 'static) -> Self {
        Self {
            id: NamespaceId::new(),
            paths: PathAlgebra::new(rules),
            formatter: Box::new(formatter),
            entries: BTreeMap::new(),
            auto_create_parents: true,
            logger: Logger::disabled(),
        }
    }

    /// Empty namespace with Unix naming and `ls -l` listings
    pub fn unix() -> Self {
        Self::new(vfs_path::UnixNameRules, UnixListingFormatter)
    }

    /// Empty namespace with Windows naming and `dir` style listings
    pub fn windows() -> Self {
        Self::new(vfs_path::WindowsNameRules, WindowsListingFormatter)
    }

    /// Empty namespace built from configuration
    ///
    /// The configured log level applies once a sink is attached with
    /// `with_log_sink`.
    pub fn from_config(config: &NamespaceConfig) -> Self {
        let mut namespace = match config.naming {
            NamingConvention::Unix => Self::unix(),
            NamingConvention::Windows => Self::windows(),
        };
        namespace.auto_create_parents = config.auto_create_parents;
        namespace.logger.set_min_level(config.log_level);
        namespace
    }

    /// Replaces the listing formatter
    pub fn with_formatter(mut self, formatter: impl EntryFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Replaces the logger
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Sends log entries to `sink`, keeping the current minimum level
    pub fn with_log_sink(self, sink: impl LogSink + 'static) -> Self {
        let level = self.logger.min_level();
        self.with_logger(Logger::new(sink, level))
    }

    pub fn id(&self) -> NamespaceId {
        self.id
    }

    pub fn auto_create_parents(&self) -> bool {
        self.auto_create_parents
    }

    pub fn set_auto_create_parents(&mut self, enabled: bool) {
        self.auto_create_parents = enabled;
    }

    /// The path algebra this namespace normalizes with
    pub fn path_algebra(&self) -> &PathAlgebra {
        &self.paths
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, ordered by path
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Adds entries in order, stopping at the first failure
    ///
    /// Entries added before the failure stay added.
    pub fn add_all(
        &mut self,
        entries: impl IntoIterator<Item = Entry>,
    ) -> Result<(), NamespaceError> {
        for entry in entries {
            self.add(entry)?;
        }
        Ok(())
    }

    /// Joins two paths and normalizes the result
    pub fn path(&self, base: &str, child: &str) -> Result<String, NamespaceError> {
        Ok(self.paths.join(base, child)?.into_string())
    }

    /// Normalized parent of a path; `None` for roots
    pub fn get_parent(&self, path: &str) -> Option<String> {
        self.paths.parent(path).map(String::from)
    }

    /// Last component of a path
    pub fn get_name(&self, path: &str) -> String {
        self.paths.name(path)
    }

    /// Looks up an entry
    pub fn get_entry(&self, path: &str) -> Option<&Entry> {
        let key = self.key(path)?;
        self.entries.get(&key)
    }

    /// Looks up an entry for changing its contents or metadata
    pub fn get_entry_mut(&mut self, path: &str) -> Option<EntryMut<'_>> {
        let key = self.key(path)?;
        self.entries.get_mut(&key).map(|entry| EntryMut { entry })
    }

    /// Formats one entry with the configured formatter
    pub fn format_listing(&self, entry: &Entry) -> String {
        self.formatter.format(entry)
    }

    /// Formats every entry `list_files` returns for `path`
    pub fn format_directory_listing(&self, path: &str) -> Vec<String> {
        self.list_files(path)
            .into_iter()
            .map(|entry| self.format_listing(entry))
            .collect()
    }

    fn key(&self, path: &str) -> Option<String> {
        self.paths.normalize(path).ok().map(String::from)
    }

    fn record(&self, entry: LogEntry) {
        if self.logger.enabled(entry.level) {
            self.logger.log(entry.with_source(self.id.to_string()));
        }
    }

    fn refused(&self, operation: &str, err: &NamespaceError) {
        self.record(
            LogEntry::new(LogLevel::Info, format!("{operation} refused"))
                .with_field("error", err),
        );
    }

    /// Entries strictly below `dir`, in path order
    fn descendants<'a>(&'a self, dir: &str) -> impl Iterator<Item = (&'a String, &'a Entry)> + 'a {
        let prefix = self.paths.child_prefix(dir);
        let prefix_len = prefix.len();
        // A root key ("/", "c:\") equals its own child prefix
        self.entries
            .range(prefix.clone()..)
            .take_while(move |(key, _)| key.starts_with(&prefix))
            .filter(move |(key, _)| key.len() > prefix_len)
    }

    fn has_children(&self, dir: &str) -> bool {
        self.descendants(dir).next().is_some()
    }

    /// Ancestors of `key` that must be created before it, oldest first
    fn missing_ancestors(&self, key: &str) -> Result<Vec<String>, NamespaceError> {
        let mut missing = Vec::new();
        let mut current = self.paths.parent(key);

        while let Some(parent) = current {
            match self.entries.get(parent.as_str()) {
                Some(existing) if existing.is_directory() => break,
                Some(_) => return Err(NamespaceError::ParentMissing(parent.into_string())),
                None if !self.auto_create_parents => {
                    return Err(NamespaceError::ParentMissing(parent.into_string()));
                }
                None => {
                    if !self.paths.rules().is_valid_path(parent.as_str()) {
                        return Err(NamespaceError::InvalidName(parent.into_string()));
                    }
                    current = self.paths.parent(parent.as_str());
                    missing.push(parent.into_string());
                }
            }
        }

        missing.reverse();
        Ok(missing)
    }

    fn insert(&mut self, entry: Entry) -> Result<(), NamespaceError> {
        let key = self.paths.normalize_valid(entry.path())?.into_string();
        if self.entries.contains_key(&key) {
            return Err(NamespaceError::AlreadyExists(key));
        }

        let missing = self.missing_ancestors(&key)?;
        let now = Utc::now();

        for dir in missing {
            let mut parent = Entry::directory(dir.clone());
            parent.set_last_modified(now);
            parent.lock_path();
            self.entries.insert(dir.clone(), parent);
            self.record(
                LogEntry::new(LogLevel::Debug, "parent directory created").with_field("path", &dir),
            );
        }

        let mut entry = if entry.path() == key {
            entry
        } else {
            entry.into_new_path(key.clone())
        };
        if entry.last_modified().is_none() {
            entry.set_last_modified(now);
        }
        entry.lock_path();

        self.record(
            LogEntry::new(LogLevel::Debug, "entry added")
                .with_field("path", &key)
                .with_field("kind", entry.kind()),
        );
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Checks a rename and returns every (old key, new key) pair it moves
    ///
    /// Nothing is mutated here; once this succeeds the move cannot fail.
    fn plan_rename(
        &self,
        from_path: &str,
        to_path: &str,
    ) -> Result<Vec<(String, String)>, NamespaceError> {
        let from_key = self
            .key(from_path)
            .filter(|key| self.entries.contains_key(key))
            .ok_or_else(|| NamespaceError::NotFound(from_path.to_string()))?;
        let to_key = self.paths.normalize_valid(to_path)?.into_string();

        let is_directory = self
            .entries
            .get(&from_key)
            .is_some_and(Entry::is_directory);

        if is_directory && (to_key == from_key || self.paths.is_descendant(&from_key, &to_key)) {
            return Err(NamespaceError::RenameIntoSelf {
                from: from_key,
                to: to_key,
            });
        }
        if self.entries.contains_key(&to_key) {
            return Err(NamespaceError::AlreadyExists(to_key));
        }
        if let Some(parent) = self.paths.parent(&to_key) {
            if !self
                .entries
                .get(parent.as_str())
                .is_some_and(Entry::is_directory)
            {
                return Err(NamespaceError::ParentMissing(parent.into_string()));
            }
        }

        let mut moves = vec![(from_key.clone(), to_key.clone())];
        if is_directory {
            let prefix_len = self.paths.child_prefix(&from_key).len();
            for (old_key, _) in self.descendants(&from_key) {
                let new_key = self
                    .paths
                    .join(&to_key, &old_key[prefix_len..])?
                    .into_string();
                if self.entries.contains_key(&new_key) {
                    return Err(NamespaceError::AlreadyExists(new_key));
                }
                moves.push((old_key.clone(), new_key));
            }
        }

        Ok(moves)
    }
}

impl NamespaceOperations for Namespace {
    fn add(&mut self, entry: Entry) -> Result<(), NamespaceError> {
        let result = self.insert(entry);
        if let Err(err) = &result {
            self.refused("add", err);
        }
        result
    }

    fn delete(&mut self, path: &str) -> bool {
        let Some(key) = self.key(path) else {
            return false;
        };
        let Some(entry) = self.entries.get(&key) else {
            return false;
        };

        if entry.is_directory() && self.has_children(&key) {
            self.record(
                LogEntry::new(LogLevel::Info, "delete refused: directory not empty")
                    .with_field("path", &key),
            );
            return false;
        }

        self.entries.remove(&key);
        self.record(LogEntry::new(LogLevel::Debug, "entry deleted").with_field("path", &key));
        true
    }

    fn rename(&mut self, from_path: &str, to_path: &str) -> Result<(), NamespaceError> {
        let moves = match self.plan_rename(from_path, to_path) {
            Ok(moves) => moves,
            Err(err) => {
                self.refused("rename", &err);
                return Err(err);
            }
        };

        let moved = moves.len();
        let mut relocated = Vec::with_capacity(moved);
        for (old_key, new_key) in &moves {
            if let Some(entry) = self.entries.remove(old_key) {
                relocated.push(entry.into_new_path(new_key.clone()));
            }
        }
        for mut entry in relocated {
            entry.lock_path();
            self.entries.insert(entry.path().to_string(), entry);
        }

        self.record(
            LogEntry::new(LogLevel::Debug, "entry renamed")
                .with_field("from", &moves[0].0)
                .with_field("to", &moves[0].1)
                .with_field("moved", moved),
        );
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.get_entry(path).is_some()
    }

    fn is_directory(&self, path: &str) -> bool {
        self.get_entry(path).is_some_and(Entry::is_directory)
    }

    fn is_file(&self, path: &str) -> bool {
        self.get_entry(path).is_some_and(Entry::is_file)
    }

    fn list_files(&self, path: &str) -> Vec<&Entry> {
        let Some(key) = self.key(path) else {
            return Vec::new();
        };
        if let Some(entry) = self.entries.get(&key) {
            if entry.is_file() {
                return vec![entry];
            }
        }

        let name = self.paths.name(&key);
        let (dir, pattern) = if contains_wildcards(&name) {
            let Some(parent) = self.paths.parent(&key) else {
                return Vec::new();
            };
            match WildcardPattern::new(&name) {
                Ok(pattern) => (parent.into_string(), Some(pattern)),
                Err(_) => return Vec::new(),
            }
        } else {
            (key, None)
        };

        if !self.entries.get(&dir).is_some_and(Entry::is_directory) {
            return Vec::new();
        }

        let separator = self.paths.separator();
        let prefix_len = self.paths.child_prefix(&dir).len();
        self.descendants(&dir)
            .filter(|(child_key, _)| !child_key[prefix_len..].contains(separator))
            .map(|(_, entry)| entry)
            .filter(|entry| pattern.as_ref().map_or(true, |p| p.matches(entry.name())))
            .collect()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} entries)", self.id, self.entries.len())?;
        for entry in self.entries.values() {
            let marker = if entry.is_directory() { 'd' } else { '-' };
            writeln!(f, "  {marker} {}", entry.path())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("id", &self.id)
            .field("paths", &self.paths)
            .field("auto_create_parents", &self.auto_create_parents)
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
