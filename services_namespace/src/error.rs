//! Namespace errors

use thiserror::Error;
use vfs_path::PathError;

/// Errors returned by mutating namespace operations
///
/// All of these are caller-triggerable and leave the namespace unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NamespaceError {
    /// Path is illegal under the naming rules, or does not normalize
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// An entry already occupies the path
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The parent directory is absent (or is a file)
    #[error("Parent directory missing: {0}")]
    ParentMissing(String),

    /// The source of the operation does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A directory cannot be moved to itself or below itself
    #[error("Cannot rename {from} into itself: {to}")]
    RenameIntoSelf {
        /// Directory being renamed
        from: String,
        /// Requested destination
        to: String,
    },
}

impl From<PathError> for NamespaceError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::InvalidPath(path) | PathError::EscapesRoot(path) => {
                NamespaceError::InvalidName(path)
            }
        }
    }
}
