//! # Namespace Entry Types
//!
//! This crate defines the records stored in an in-memory namespace.
//!
//! ## Philosophy
//!
//! - **Entries are data, not handles**: An entry carries its path, kind and
//!   caller-supplied metadata. Nothing here touches real storage.
//! - **Paths are locked once stored**: A namespace locks an entry's path on
//!   insertion. Moving an entry means building a new one with a new path.
//!
//! ## Types
//!
//! - `Entry`: one file or directory record
//! - `EntryKind`: closed `File | Directory` distinction
//! - `Permissions`: `rwxrwxrwx`-style access bits for listings

pub mod entry;
pub mod permissions;

pub use entry::{Entry, EntryKind, PathLocked};
pub use permissions::{Access, Permissions, PermissionsError, PrincipalClass};
