//! Platform naming conventions
//!
//! A `NameRules` value tells the path algebra which separator to emit, which
//! leading component denotes a root, and which normalized paths are legal.

/// Naming convention of a simulated platform
pub trait NameRules: Send + Sync {
    /// The separator emitted by normalization
    fn separator(&self) -> char;

    /// Whether a leading path component denotes a root (e.g. a drive)
    fn is_root_component(&self, component: &str) -> bool;

    /// Whether a normalized path is legal on this platform
    fn is_valid_path(&self, path: &str) -> bool;
}

/// Unix conventions: `/` separated, absolute paths only
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixNameRules;

impl NameRules for UnixNameRules {
    fn separator(&self) -> char {
        '/'
    }

    fn is_root_component(&self, component: &str) -> bool {
        component.is_empty()
    }

    fn is_valid_path(&self, path: &str) -> bool {
        path.starts_with('/') && !path.contains('\0')
    }
}

/// Characters that may not appear inside a Windows path component
const WINDOWS_RESERVED: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Windows conventions: `\` separated, rooted at a drive (`c:\`) or at `\`
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsNameRules;

impl WindowsNameRules {
    fn is_drive(component: &str) -> bool {
        let mut chars = component.chars();
        matches!(
            (chars.next(), chars.next(), chars.next()),
            (Some(letter), Some(':'), None) if letter.is_ascii_alphabetic()
        )
    }
}

impl NameRules for WindowsNameRules {
    fn separator(&self) -> char {
        '\\'
    }

    fn is_root_component(&self, component: &str) -> bool {
        Self::is_drive(component)
    }

    fn is_valid_path(&self, path: &str) -> bool {
        let rest = match path.get(..2) {
            Some(prefix) if Self::is_drive(prefix) => &path[2..],
            _ => path,
        };

        let Some(segments) = rest.strip_prefix('\\') else {
            return false;
        };
        if segments.is_empty() {
            return true;
        }

        segments.split('\\').all(|segment| {
            !segment.is_empty()
                && !segment.contains(WINDOWS_RESERVED)
                && !segment.chars().any(char::is_control)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_rules() {
        let rules = UnixNameRules;
        assert_eq!(rules.separator(), '/');
        assert!(rules.is_root_component(""));
        assert!(!rules.is_root_component("usr"));

        assert!(rules.is_valid_path("/"));
        assert!(rules.is_valid_path("/usr/bin"));
        assert!(rules.is_valid_path("/odd name*?.txt"));
        assert!(!rules.is_valid_path("usr/bin"));
        assert!(!rules.is_valid_path(""));
        assert!(!rules.is_valid_path("/nul\0byte"));
    }

    #[test]
    fn test_windows_root_components() {
        let rules = WindowsNameRules;
        assert_eq!(rules.separator(), '\\');
        assert!(rules.is_root_component("c:"));
        assert!(rules.is_root_component("Z:"));
        assert!(!rules.is_root_component(""));
        assert!(!rules.is_root_component("cc:"));
        assert!(!rules.is_root_component("1:"));
    }

    #[test]
    fn test_windows_valid_paths() {
        let rules = WindowsNameRules;
        assert!(rules.is_valid_path("c:\\"));
        assert!(rules.is_valid_path("c:\\data"));
        assert!(rules.is_valid_path("d:\\data\\report 2024.txt"));
        assert!(rules.is_valid_path("\\"));
        assert!(rules.is_valid_path("\\shared\\file"));
    }

    #[test]
    fn test_windows_invalid_paths() {
        let rules = WindowsNameRules;
        assert!(!rules.is_valid_path(""));
        assert!(!rules.is_valid_path("c:"));
        assert!(!rules.is_valid_path("data\\file"));
        assert!(!rules.is_valid_path("c:\\bad*name"));
        assert!(!rules.is_valid_path("c:\\what?"));
        assert!(!rules.is_valid_path("c:\\a\\b:c"));
        assert!(!rules.is_valid_path("c:\\a<b>"));
        assert!(!rules.is_valid_path("c:\\pipe|d"));
        assert!(!rules.is_valid_path("c:\\quote\"d"));
        assert!(!rules.is_valid_path("c:\\a\\\\b"));
    }
}
