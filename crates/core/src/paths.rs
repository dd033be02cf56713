//! Path resolution for note files.
//!
//! Pure functions only; nothing here touches the filesystem.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

/// Join data root, subdirectory and file name into the note's file path.
pub fn resolve_note_path(data_root: &Path, subdir: &str, file_name: &str) -> PathBuf {
    data_root.join(subdir).join(file_name)
}

/// Convert a title to a file-name-friendly slug.
///
/// ASCII alphanumerics are lowercased, runs of spaces, underscores and hyphens
/// collapse to a single hyphen, everything else is dropped.
pub fn slugify(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
        } else if (c == ' ' || c == '_' || c == '-') && !result.ends_with('-') {
            result.push('-');
        }
    }

    result.trim_matches('-').to_string()
}

/// `Interesting Thought` -> `interesting-thought.md`
pub fn zettel_file_name(title: &str) -> String {
    format!("{}.md", slugify(title))
}

/// `YYYY-MM-DD`
pub fn date_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `YYYY-Www`, ISO week numbering.
pub fn week_label(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}
