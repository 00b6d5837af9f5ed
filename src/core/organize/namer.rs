//! Destination folder naming.

use chrono::{Datelike, NaiveDateTime};

/// Folder name for a capture timestamp: `YYYY-MM`, month zero-padded.
///
/// Pure function; the same timestamp always yields the same name.
pub fn month_folder(taken: NaiveDateTime) -> String {
    format!("{:04}-{:02}", taken.year(), taken.month())
}
