//! Full-tree synchronization

use super::copy::copy_file;
use crate::filter::PatternSet;
use crate::scanner::{ProgressCallback, Scanner};
use crate::types::{BlinkError, RelativePath};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Copy every non-ignored file of `source` into `destination`
///
/// Ignored directories are not descended into. Existing destination
/// directories are merged into, and existing files overwritten. `on_file`
/// is called after each copied file with the running count.
///
/// # Returns
/// * `Ok(usize)` - Number of files copied
/// * `Err(BlinkError)` - first traversal or copy failure
pub fn initial_sync(
    source: &Path,
    destination: &Path,
    patterns: &Arc<PatternSet>,
    on_file: Option<&ProgressCallback>,
) -> Result<usize, BlinkError> {
    let copied = copy_entries(
        Scanner::filtered(source, patterns),
        source,
        destination,
        on_file,
    )?;
    debug!("Initial sync copied {} file(s)", copied);
    Ok(copied)
}

/// Like [`initial_sync`], limited to one directory of the source tree
pub fn sync_subtree(
    source: &Path,
    destination: &Path,
    subtree: &RelativePath,
    patterns: &Arc<PatternSet>,
) -> Result<usize, BlinkError> {
    copy_entries(
        Scanner::subtree(source, subtree, patterns),
        source,
        destination,
        None,
    )
}

/// Count the files [`initial_sync`] would copy, without touching anything
pub fn count_files(source: &Path, patterns: &Arc<PatternSet>) -> Result<usize, BlinkError> {
    let mut count = 0;
    for entry in Scanner::filtered(source, patterns) {
        if !entry?.is_dir {
            count += 1;
        }
    }
    Ok(count)
}

fn copy_entries(
    scanner: Scanner,
    source: &Path,
    destination: &Path,
    on_file: Option<&ProgressCallback>,
) -> Result<usize, BlinkError> {
    let mut copied = 0;
    for entry in scanner {
        let entry = entry?;
        if entry.is_dir {
            continue;
        }

        let src_path = entry.relative.join_to(source);
        let dst_path = entry.relative.join_to(destination);
        copy_file(&src_path, &dst_path)?;
        copied += 1;

        if let Some(callback) = on_file {
            callback(copied);
        }
    }
    Ok(copied)
}
