//! # Namespace Service
//!
//! An in-memory hierarchical namespace: file and directory semantics over a
//! flat map from normalized path to entry. Nothing touches real storage.
//!
//! ## Invariants
//!
//! - Every stored entry sits at the key its own path normalizes to
//! - No two entries share a normalized path
//! - Every non-root entry has a directory parent in the map
//! - Directories are removed only when empty
//! - A rename moves a whole subtree or changes nothing
//!
//! ## Operations
//!
//! - `add(entry)`: insert, optionally creating missing parent directories
//! - `delete(path)`: remove a file or an empty directory
//! - `rename(from, to)`: move a file or a directory subtree
//! - `exists/is_directory/is_file(path)`: lookups that never fail
//! - `list_files/list_names(path)`: a file, or directory children matching `*`/`?`
//!
//! ## Concurrency
//!
//! A `Namespace` is a single-owner value. Share one between sessions through
//! `SharedNamespace`, which serializes every operation behind one lock.

pub mod config;
pub mod error;
pub mod namespace;
pub mod operations;
pub mod shared;

pub use config::{ConfigError, NamespaceConfig, NamingConvention};
pub use error::NamespaceError;
pub use namespace::{EntryMut, Namespace, NamespaceId};
pub use operations::NamespaceOperations;
pub use shared::SharedNamespace;

pub use services_listing::{EntryFormatter, UnixListingFormatter, WindowsListingFormatter};
pub use vfs_path::{NameRules, UnixNameRules, WindowsNameRules};
pub use vfs_types::{Entry, EntryKind, Permissions};
