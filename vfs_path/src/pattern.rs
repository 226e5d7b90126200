//! Wildcard patterns for directory listings
//!
//! `?` matches exactly one character and `*` matches any run of characters,
//! including none. Everything else matches literally. Patterns are compiled
//! to anchored regular expressions.

use regex::Regex;

/// Checks whether a name contains wildcard characters (`*` or `?`)
pub fn contains_wildcards(name: &str) -> bool {
    name.contains(['*', '?'])
}

/// A compiled wildcard pattern
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    regex: Regex,
}

impl WildcardPattern {
    /// Compiles a wildcard pattern
    ///
    /// # Examples
    ///
    /// ```
    /// use vfs_path::WildcardPattern;
    ///
    /// let pattern = WildcardPattern::new("x*.txt").unwrap();
    /// assert!(pattern.matches("x1.txt"));
    /// assert!(!pattern.matches("y.txt"));
    /// ```
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&Self::to_regex(pattern))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Converts a wildcard pattern to an anchored regular expression
    pub fn to_regex(pattern: &str) -> String {
        let mut regex = String::with_capacity(pattern.len() * 2 + 2);
        regex.push('^');
        let mut literal = String::new();
        for c in pattern.chars() {
            match c {
                '*' | '?' => {
                    regex.push_str(&regex::escape(&literal));
                    literal.clear();
                    regex.push_str(if c == '*' { ".*" } else { "." });
                }
                _ => literal.push(c),
            }
        }
        regex.push_str(&regex::escape(&literal));
        regex.push('$');
        regex
    }

    /// Whether the whole of `name` matches
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Returns the pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }
}
