//! Destination cleanup

use super::copy::delete_file;
use crate::filter::PatternSet;
use crate::scanner::Scanner;
use crate::types::BlinkError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Remove stale files from `destination`
///
/// A destination file is stale when it matches the ignore rules or when no
/// file exists at the same relative path under `source`. Directories left
/// empty afterwards are removed bottom-up. A missing destination is a no-op.
///
/// # Returns
/// * `Ok(usize)` - Number of files removed
/// * `Err(BlinkError)` - traversal or removal failure during the file pass
pub fn clean_destination(
    source: &Path,
    destination: &Path,
    patterns: &PatternSet,
) -> Result<usize, BlinkError> {
    if !destination.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in Scanner::new(destination) {
        let entry = entry?;
        if entry.is_dir {
            continue;
        }

        let stale = patterns.should_ignore(entry.relative.as_str())
            || !entry.relative.join_to(source).is_file();
        if stale {
            delete_file(&entry.path)?;
            debug!("Removed stale {}", entry.relative);
            removed += 1;
        }
    }

    remove_empty_dirs(destination);
    Ok(removed)
}

/// Remove empty directories below `root`, deepest first. Best-effort.
fn remove_empty_dirs(root: &Path) {
    let dirs: Vec<PathBuf> = Scanner::new(root)
        .filter_map(Result::ok)
        .filter(|entry| entry.is_dir)
        .map(|entry| entry.path)
        .collect();

    // Pre-order walk: reversing visits children before parents
    for dir in dirs.iter().rev() {
        let is_empty = fs::read_dir(dir)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false);
        if is_empty {
            if let Err(e) = fs::remove_dir(dir) {
                debug!("Could not remove empty directory {}: {}", dir.display(), e);
            }
        }
    }
}
