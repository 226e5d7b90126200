//! Path normalization and manipulation
//!
//! This module turns caller-written paths into the canonical form a namespace
//! uses as its keys.

use crate::rules::{NameRules, UnixNameRules, WindowsNameRules};
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during normalization
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// Path is not legal under the active naming rules
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A `..` component has nothing left to consume
    #[error("Path escapes its root: {0}")]
    EscapesRoot(String),
}

/// A path in canonical form
///
/// Only `PathAlgebra` produces these, so holding one means the text has
/// unified separators and no `.` or `..` components.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    /// Returns the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the path, returning the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NormalizedPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NormalizedPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NormalizedPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<NormalizedPath> for String {
    fn from(path: NormalizedPath) -> Self {
        path.0
    }
}

fn is_any_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Path operations under a fixed set of naming rules
pub struct PathAlgebra {
    rules: Box<dyn NameRules>,
}

impl PathAlgebra {
    /// Creates a path algebra over the given rules
    pub fn new(rules: impl NameRules + 'static) -> Self {
        Self {
            rules: Box::new(rules),
        }
    }

    /// Path algebra with Unix conventions
    pub fn unix() -> Self {
        Self::new(UnixNameRules)
    }

    /// Path algebra with Windows conventions
    pub fn windows() -> Self {
        Self::new(WindowsNameRules)
    }

    /// Returns the naming rules in use
    pub fn rules(&self) -> &dyn NameRules {
        self.rules.as_ref()
    }

    pub fn separator(&self) -> char {
        self.rules.separator()
    }

    /// Splits a path into canonical components
    ///
    /// Both separator styles are accepted. The separator alone yields a
    /// single empty component, which denotes the root. Repeated and trailing
    /// separators collapse.
    ///
    /// # Examples
    ///
    /// ```
    /// use vfs_path::PathAlgebra;
    ///
    /// let paths = PathAlgebra::unix();
    /// assert_eq!(paths.split("/a/./b/../c").unwrap(), vec!["", "a", "c"]);
    /// assert_eq!(paths.split("/").unwrap(), vec![""]);
    /// assert!(paths.split("/..").is_err());
    /// ```
    pub fn split(&self, path: &str) -> Result<Vec<String>, PathError> {
        let mut components: Vec<String> = Vec::new();
        if path.is_empty() {
            return Ok(components);
        }

        for (index, part) in path.split(is_any_separator).enumerate() {
            match part {
                "." => {}
                ".." => {
                    let consumable = match components.as_slice() {
                        [] => false,
                        [only] => !self.is_root_like(only),
                        _ => true,
                    };
                    if !consumable {
                        return Err(PathError::EscapesRoot(path.to_string()));
                    }
                    components.pop();
                }
                "" if index > 0 => {}
                other => components.push(other.to_string()),
            }
        }

        Ok(components)
    }

    /// Joins components back into a path
    ///
    /// A lone root component renders with a trailing separator (`/`, `c:\`).
    pub fn components_to_path<S: AsRef<str>>(&self, components: &[S]) -> String {
        let separator = self.separator();
        if let [only] = components {
            let only = only.as_ref();
            if self.is_root_like(only) {
                return format!("{only}{separator}");
            }
        }

        let mut path = String::new();
        for (index, component) in components.iter().enumerate() {
            if index > 0 {
                path.push(separator);
            }
            path.push_str(component.as_ref());
        }
        path
    }

    /// Normalizes a path
    ///
    /// Idempotent: normalizing a normalized path returns it unchanged.
    pub fn normalize(&self, path: &str) -> Result<NormalizedPath, PathError> {
        let components = self.split(path)?;
        Ok(NormalizedPath(self.components_to_path(&components)))
    }

    /// Normalizes a path and checks it against the naming rules
    pub fn normalize_valid(&self, path: &str) -> Result<NormalizedPath, PathError> {
        let normalized = self.normalize(path)?;
        if !self.rules.is_valid_path(normalized.as_str()) {
            return Err(PathError::InvalidPath(path.to_string()));
        }
        Ok(normalized)
    }

    /// Joins two paths, adding a separator only where neither side has one
    pub fn join(&self, base: &str, child: &str) -> Result<NormalizedPath, PathError> {
        let needs_separator = !base.is_empty()
            && !base.ends_with(is_any_separator)
            && !child.starts_with(is_any_separator);

        let mut joined = String::with_capacity(base.len() + child.len() + 1);
        joined.push_str(base);
        if needs_separator {
            joined.push(self.separator());
        }
        joined.push_str(child);
        self.normalize(&joined)
    }

    /// Returns the parent of a path
    ///
    /// Roots and single-component paths have no parent. Neither does a path
    /// that fails to normalize.
    pub fn parent(&self, path: &str) -> Option<NormalizedPath> {
        let components = self.split(path).ok()?;
        if components.len() < 2 {
            return None;
        }
        let parent = &components[..components.len() - 1];
        Some(NormalizedPath(self.components_to_path(parent)))
    }

    /// Returns the last component of a path, or an empty string
    pub fn name(&self, path: &str) -> String {
        self.split(path)
            .ok()
            .and_then(|mut components| components.pop())
            .unwrap_or_default()
    }

    /// Returns the prefix every child key of `dir` starts with
    pub fn child_prefix(&self, dir: &str) -> String {
        let mut prefix = dir.to_string();
        if !prefix.ends_with(self.separator()) {
            prefix.push(self.separator());
        }
        prefix
    }

    /// Whether `path` lies strictly below `ancestor` (both normalized)
    pub fn is_descendant(&self, ancestor: &str, path: &str) -> bool {
        path != ancestor && path.starts_with(&self.child_prefix(ancestor))
    }

    fn is_root_like(&self, component: &str) -> bool {
        component.is_empty() || self.rules.is_root_component(component)
    }
}

impl fmt::Debug for PathAlgebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathAlgebra")
            .field("separator", &self.separator())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unix() -> PathAlgebra {
        PathAlgebra::unix()
    }

    fn windows() -> PathAlgebra {
        PathAlgebra::windows()
    }

    #[test]
    fn test_normalize_simple() {
        assert_eq!(unix().normalize("/a/b/c").unwrap(), "/a/b/c");
        assert_eq!(unix().normalize("/a/b/c/").unwrap(), "/a/b/c");
    }

    #[test]
    fn test_normalize_root() {
        assert_eq!(unix().normalize("/").unwrap(), "/");
        assert_eq!(unix().normalize("\\").unwrap(), "/");
        assert_eq!(unix().split("/").unwrap(), vec![String::new()]);
        assert_eq!(windows().normalize("\\").unwrap(), "\\");
        assert_eq!(windows().normalize("c:\\").unwrap(), "c:\\");
        assert_eq!(windows().normalize("c:").unwrap(), "c:\\");
    }

    #[test]
    fn test_normalize_mixed_separators() {
        assert_eq!(unix().normalize("/a\\b/c").unwrap(), "/a/b/c");
        assert_eq!(windows().normalize("c:/data/file.txt").unwrap(), "c:\\data\\file.txt");
    }

    #[test]
    fn test_normalize_dot_components() {
        assert_eq!(unix().normalize("/a/./b/.").unwrap(), "/a/b");
        assert_eq!(unix().normalize("/a/b/../c").unwrap(), "/a/c");
        assert_eq!(unix().normalize("/a/..").unwrap(), "/");
        assert_eq!(windows().normalize("c:\\a\\..\\b").unwrap(), "c:\\b");
    }

    #[test]
    fn test_normalize_collapses_repeated_separators() {
        assert_eq!(unix().normalize("/a//b").unwrap(), "/a/b");
        assert_eq!(unix().normalize("//").unwrap(), "/");
    }

    #[test]
    fn test_dotdot_past_root_is_error() {
        assert_eq!(
            unix().normalize("/.."),
            Err(PathError::EscapesRoot("/..".to_string()))
        );
        assert!(unix().normalize("/a/../..").is_err());
        assert!(unix().normalize("..").is_err());
        assert!(windows().normalize("c:\\..").is_err());
    }

    #[test]
    fn test_relative_paths() {
        assert_eq!(unix().normalize("a/b").unwrap(), "a/b");
        assert_eq!(unix().normalize("a/..").unwrap(), "");
        assert_eq!(unix().normalize("").unwrap(), "");
        assert_eq!(unix().normalize(".").unwrap(), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let paths = unix();
        for raw in ["/", "/a/b/", "/a/./b/../c", "a\\b", "//x//y"] {
            let once = paths.normalize(raw).unwrap();
            let twice = paths.normalize(once.as_str()).unwrap();
            assert_eq!(once, twice, "normalizing {raw:?}");
        }
    }

    #[test]
    fn test_normalize_valid() {
        assert!(unix().normalize_valid("/a").is_ok());
        assert_eq!(
            unix().normalize_valid("a"),
            Err(PathError::InvalidPath("a".to_string()))
        );
        assert!(windows().normalize_valid("c:/a").is_ok());
        assert!(windows().normalize_valid("c:\\a*b").is_err());
    }

    #[test]
    fn test_components_to_path() {
        let paths = unix();
        assert_eq!(paths.components_to_path(&[""]), "/");
        assert_eq!(paths.components_to_path(&["", "a", "b"]), "/a/b");
        assert_eq!(paths.components_to_path(&["a"]), "a");
        assert_eq!(paths.components_to_path::<&str>(&[]), "");
        assert_eq!(windows().components_to_path(&["c:"]), "c:\\");
        assert_eq!(windows().components_to_path(&["c:", "x"]), "c:\\x");
    }

    #[test]
    fn test_join() {
        let paths = unix();
        assert_eq!(paths.join("/a", "b").unwrap(), "/a/b");
        assert_eq!(paths.join("/a/", "b").unwrap(), "/a/b");
        assert_eq!(paths.join("/a", "/b").unwrap(), "/a/b");
        assert_eq!(paths.join("", "b").unwrap(), "b");
        assert_eq!(paths.join("/", "b").unwrap(), "/b");
        assert_eq!(paths.join("/a", "..").unwrap(), "/");
        assert_eq!(windows().join("c:\\", "dir").unwrap(), "c:\\dir");
        assert_eq!(windows().join("c:\\dir", "f.txt").unwrap(), "c:\\dir\\f.txt");
    }

    #[test]
    fn test_parent() {
        let paths = unix();
        assert_eq!(paths.parent("/a/b").unwrap(), "/a");
        assert_eq!(paths.parent("/a").unwrap(), "/");
        assert!(paths.parent("/").is_none());
        assert!(paths.parent("a").is_none());
        assert!(paths.parent("/..").is_none());
        assert_eq!(windows().parent("c:\\dir").unwrap(), "c:\\");
        assert!(windows().parent("c:\\").is_none());
    }

    #[test]
    fn test_name() {
        let paths = unix();
        assert_eq!(paths.name("/a/b.txt"), "b.txt");
        assert_eq!(paths.name("/a/"), "a");
        assert_eq!(paths.name("/"), "");
        assert_eq!(paths.name(""), "");
        assert_eq!(windows().name("c:\\x\\y"), "y");
    }

    #[test]
    fn test_child_prefix_and_descendants() {
        let paths = unix();
        assert_eq!(paths.child_prefix("/a"), "/a/");
        assert_eq!(paths.child_prefix("/"), "/");
        assert!(paths.is_descendant("/a", "/a/b"));
        assert!(paths.is_descendant("/", "/a"));
        assert!(!paths.is_descendant("/a", "/a"));
        assert!(!paths.is_descendant("/a", "/ab"));
        assert!(windows().is_descendant("c:\\", "c:\\x"));
    }
}
