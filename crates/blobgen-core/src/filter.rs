//! Exclusion of source-control artifacts, hidden files and empty files.
//!
//! The directory scan is flat, but the name checks are applied upward to
//! every ancestor between the candidate and the scan root, so a candidate
//! reached through a hidden-style directory is excluded as a whole.

use crate::fs::FileHandle;
use std::path::Path;

/// Returns true if `name` alone marks an entry as hidden
pub fn is_hidden_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".scc") || name == ".svn" || name.starts_with('.')
}

/// Returns true if `file` must be left out of the generated sources.
///
/// A file is excluded when its name is hidden (see [`is_hidden_name`]), when
/// it is empty, or when any ancestor directory below `root` has a hidden
/// name. Empty files are dropped silently, not reported.
pub fn is_hidden(file: &FileHandle, root: &Path) -> bool {
    if is_hidden_name(&file.name) || file.len == 0 {
        return true;
    }

    let mut current = file.path.parent();
    while let Some(dir) = current {
        if dir == root {
            break;
        }
        let hidden = dir
            .file_name()
            .map(|n| is_hidden_name(&n.to_string_lossy()))
            .unwrap_or(false);
        if hidden {
            return true;
        }
        current = dir.parent();
    }

    false
}
