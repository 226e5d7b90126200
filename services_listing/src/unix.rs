//! `ls -l` style listing lines
//!
//! Example output:
//!
//! ```text
//! drwxr-xr-x  1 alice    staff                  0 Jan 05 2024 docs
//! -rw-r--r--  1 none     none                1024 Mar 17 2023 notes.txt
//! ```

use crate::{timestamp_or_epoch, EntryFormatter};
use vfs_types::{Entry, Permissions};

const OWNER_WIDTH: usize = 8;
const GROUP_WIDTH: usize = 8;
const SIZE_WIDTH: usize = 15;
const UNKNOWN_PRINCIPAL: &str = "none";

/// Unix `ls -l` style formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixListingFormatter;

impl EntryFormatter for UnixListingFormatter {
    fn format(&self, entry: &Entry) -> String {
        let type_marker = if entry.is_directory() { 'd' } else { '-' };
        let permissions = entry.permissions().unwrap_or(Permissions::ALL);
        let owner = entry.owner().unwrap_or(UNKNOWN_PRINCIPAL);
        let group = entry.group().unwrap_or(UNKNOWN_PRINCIPAL);
        let date = timestamp_or_epoch(entry).format("%b %d %Y");

        format!(
            "{type_marker}{permissions}  1 {owner:<OWNER_WIDTH$} {group:<GROUP_WIDTH$} {size:>SIZE_WIDTH$} {date} {name}",
            size = entry.size(),
            name = entry.name(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn stamp() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 14, 3, 0).unwrap()
    }

    #[test]
    fn test_directory_line() {
        let entry = Entry::directory("/home/docs")
            .with_owner("alice")
            .with_group("staff")
            .with_permissions(Permissions::from_mode(0o755))
            .with_last_modified(stamp());

        assert_eq!(
            UnixListingFormatter.format(&entry),
            "drwxr-xr-x  1 alice    staff                  0 Jan 05 2024 docs"
        );
    }

    #[test]
    fn test_file_line_with_defaults() {
        let entry = Entry::file_with_contents("/notes.txt", vec![0u8; 1024]).with_last_modified(stamp());

        assert_eq!(
            UnixListingFormatter.format(&entry),
            "-rwxrwxrwx  1 none     none                1024 Jan 05 2024 notes.txt"
        );
    }

    #[test]
    fn test_long_owner_is_not_truncated() {
        let entry = Entry::file("/f").with_owner("administrator").with_last_modified(stamp());
        let line = UnixListingFormatter.format(&entry);
        assert!(line.contains(" administrator none "));
        assert!(line.ends_with(" f"));
    }
}
