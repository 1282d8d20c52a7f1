//! Applying one change event to the destination

use super::copy::{copy_file, remove_path};
use super::sync::sync_subtree;
use crate::filter::PatternSet;
use crate::types::{BlinkError, ChangeOp, MirrorAction, RelativePath};
use std::path::Path;
use std::sync::Arc;

/// Bring `path` in the destination up to date with the source
///
/// * Create / Write: copy the file (or, for a directory, every non-ignored
///   file beneath it).
/// * Remove: remove the destination entry.
/// * Rename: a rename notification may describe either side, so the source
///   is checked: still present means copy, absent means remove.
pub fn apply_event(
    source: &Path,
    destination: &Path,
    path: &RelativePath,
    op: ChangeOp,
    patterns: &Arc<PatternSet>,
) -> Result<MirrorAction, BlinkError> {
    let src_path = path.join_to(source);
    let dst_path = path.join_to(destination);

    let present = match op {
        ChangeOp::Create | ChangeOp::Write => true,
        ChangeOp::Remove => false,
        ChangeOp::Rename => src_path.exists(),
    };

    if !present {
        remove_path(&dst_path)?;
        return Ok(MirrorAction::Removed);
    }

    if src_path.is_dir() {
        sync_subtree(source, destination, path, patterns)?;
    } else {
        copy_file(&src_path, &dst_path)?;
    }
    Ok(MirrorAction::Copied)
}
