//! # Path Algebra
//!
//! Pure path handling for an in-memory namespace.
//!
//! ## Design
//!
//! - Input may mix `/` and `\`; output always uses the configured separator
//! - `.` components are dropped, `..` consumes the previous component
//! - A `..` that would climb above the start of the path is an error
//! - Platform conventions (separator, root tokens, validity) come from a
//!   pluggable `NameRules` implementation
//! - No state and no I/O: every function is deterministic

pub mod pattern;
pub mod path;
pub mod rules;

pub use path::{NormalizedPath, PathAlgebra, PathError};
pub use pattern::{contains_wildcards, WildcardPattern};
pub use rules::{NameRules, UnixNameRules, WindowsNameRules};
