//! IIS/`dir` style listing lines
//!
//! Example output:
//!
//! ```text
//! 01-05-24  02:03PM       <DIR>          docs
//! 01-05-24  02:03PM                 1024 notes.txt
//! ```

use crate::{timestamp_or_epoch, EntryFormatter};
use vfs_types::Entry;

const DIRECTORY_FIELD: &str = "       <DIR>         ";
const SIZE_WIDTH: usize = DIRECTORY_FIELD.len();

/// Windows-style formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsListingFormatter;

impl EntryFormatter for WindowsListingFormatter {
    fn format(&self, entry: &Entry) -> String {
        let stamp = timestamp_or_epoch(entry).format("%m-%d-%y  %I:%M%p");
        if entry.is_directory() {
            format!("{stamp}{DIRECTORY_FIELD} {}", entry.name())
        } else {
            format!("{stamp}{:>SIZE_WIDTH$} {}", entry.size(), entry.name())
        }
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
        let entry = Entry::directory("c:\\docs").with_last_modified(stamp());
        assert_eq!(
            WindowsListingFormatter.format(&entry),
            "01-05-24  02:03PM       <DIR>          docs"
        );
    }

    #[test]
    fn test_file_line() {
        let entry = Entry::file_with_contents("c:\\notes.txt", vec![0u8; 1024]).with_last_modified(stamp());
        assert_eq!(
            WindowsListingFormatter.format(&entry),
            "01-05-24  02:03PM                 1024 notes.txt"
        );
    }

    #[test]
    fn test_names_line_up() {
        let dir = WindowsListingFormatter.format(&Entry::directory("c:\\d").with_last_modified(stamp()));
        let file = WindowsListingFormatter.format(&Entry::file("c:\\f").with_last_modified(stamp()));
        assert_eq!(dir.len(), file.len());
        assert_eq!(dir.rfind(' '), file.rfind(' '));
    }

    #[test]
    fn test_morning_time() {
        let morning = Utc.with_ymd_and_hms(2023, 11, 30, 9, 7, 0).unwrap();
        let line = WindowsListingFormatter.format(&Entry::file("c:\\f").with_last_modified(morning));
        assert!(line.starts_with("11-30-23  09:07AM"));
    }
}
