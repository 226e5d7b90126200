//! Access permission bits
//!
//! Permissions are descriptive metadata for listings. The namespace never
//! enforces them; a protocol layer built on top may.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a permission string
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PermissionsError {
    /// The string is not exactly nine characters long
    #[error("Permission string must have 9 characters, got {0:?}")]
    InvalidLength(String),

    /// A character is neither the expected letter nor '-'
    #[error("Invalid permission character {found:?} at position {position} (expected {expected:?} or '-')")]
    InvalidCharacter {
        /// Zero-based character position
        position: usize,
        /// The letter allowed at that position
        expected: char,
        /// What was actually found
        found: char,
    },
}

/// The class of principal a permission applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincipalClass {
    /// The owning user
    User,
    /// Members of the owning group
    Group,
    /// Everybody else
    World,
}

/// The kind of access a permission grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Read access
    Read,
    /// Write access
    Write,
    /// Execute (or traverse) access
    Execute,
}

const LETTERS: [char; 3] = ['r', 'w', 'x'];

/// Nine access bits: read/write/execute for user, group and world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permissions {
    bits: u16,
}

impl Permissions {
    /// Everything allowed for everyone (`rwxrwxrwx`)
    pub const ALL: Permissions = Permissions { bits: 0o777 };

    /// Nothing allowed for anyone (`---------`)
    pub const NONE: Permissions = Permissions { bits: 0 };

    /// Creates permissions from octal mode bits (only the low nine bits are kept)
    pub fn from_mode(mode: u16) -> Self {
        Self { bits: mode & 0o777 }
    }

    /// Returns the octal mode bits
    pub fn mode(&self) -> u16 {
        self.bits
    }

    /// Parses a `rwxr-x---` style string
    ///
    /// # Examples
    ///
    /// ```
    /// use vfs_types::{Access, Permissions, PrincipalClass};
    ///
    /// let perms = Permissions::parse("rwxr-x---").unwrap();
    /// assert!(perms.allows(PrincipalClass::Group, Access::Execute));
    /// assert!(!perms.allows(PrincipalClass::World, Access::Read));
    /// assert_eq!(perms.mode(), 0o750);
    /// ```
    pub fn parse(text: &str) -> Result<Self, PermissionsError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != 9 {
            return Err(PermissionsError::InvalidLength(text.to_string()));
        }

        let mut bits = 0u16;
        for (position, &found) in chars.iter().enumerate() {
            let expected = LETTERS[position % 3];
            bits <<= 1;
            if found == expected {
                bits |= 1;
            } else if found != '-' {
                return Err(PermissionsError::InvalidCharacter {
                    position,
                    expected,
                    found,
                });
            }
        }

        Ok(Self { bits })
    }

    /// Checks whether `class` has `access`
    pub fn allows(&self, class: PrincipalClass, access: Access) -> bool {
        self.bits & Self::bit(class, access) != 0
    }

    /// Returns a copy with `access` granted or revoked for `class`
    pub fn with(mut self, class: PrincipalClass, access: Access, granted: bool) -> Self {
        let bit = Self::bit(class, access);
        if granted {
            self.bits |= bit;
        } else {
            self.bits &= !bit;
        }
        self
    }

    fn bit(class: PrincipalClass, access: Access) -> u16 {
        let shift = match class {
            PrincipalClass::User => 6,
            PrincipalClass::Group => 3,
            PrincipalClass::World => 0,
        };
        let offset = match access {
            Access::Read => 2,
            Access::Write => 1,
            Access::Execute => 0,
        };
        1 << (shift + offset)
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for position in 0..9 {
            let bit = 1 << (8 - position);
            if self.bits & bit != 0 {
                write!(f, "{}", LETTERS[position % 3])?;
            } else {
                write!(f, "-")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Permissions {
    type Err = PermissionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Permissions {
    type Error = PermissionsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Permissions> for String {
    fn from(value: Permissions) -> Self {
        value.to_string()
    }
}
