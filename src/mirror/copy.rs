//! Single-file copy and delete

use crate::types::BlinkError;
use std::ffi::OsString;
use std::fs;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

const PART_SUFFIX: &str = ".blink-part";

/// Copy a whole file, replacing any existing destination file
///
/// Missing destination parents are created. Content is written to a sibling
/// `.blink-part` file first and then renamed over `dst`, so readers of the
/// destination never see a truncated file.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(BlinkError)` - source unreadable or destination not writable
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64, BlinkError> {
    let content = fs::read(src)?;

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| map_write_error(parent, e))?;
    }

    let part_path = part_path_for(dst);
    if let Err(e) = fs::write(&part_path, &content) {
        let _ = fs::remove_file(&part_path);
        return Err(map_write_error(dst, e));
    }

    // Drop the temporary if the rename fails (e.g. dst is a directory)
    if let Err(e) = fs::rename(&part_path, dst) {
        let _ = fs::remove_file(&part_path);
        return Err(map_write_error(dst, e));
    }

    Ok(content.len() as u64)
}

/// Remove a destination file; a missing file counts as success
pub fn delete_file(dst: &Path) -> Result<(), BlinkError> {
    match fs::remove_file(dst) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(map_write_error(dst, e)),
    }
}

/// Remove whatever is at `dst`: a directory recursively, anything else as a file
pub fn remove_path(dst: &Path) -> Result<(), BlinkError> {
    match fs::symlink_metadata(dst) {
        Ok(metadata) if metadata.is_dir() => match fs::remove_dir_all(dst) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_write_error(dst, e)),
        },
        Ok(_) => delete_file(dst),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(BlinkError::Io(e)),
    }
}

fn part_path_for(dst: &Path) -> PathBuf {
    let mut name = dst
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(PART_SUFFIX);
    dst.with_file_name(name)
}

fn map_write_error(path: &Path, error: Error) -> BlinkError {
    if error.kind() == ErrorKind::PermissionDenied {
        BlinkError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        BlinkError::Io(error)
    }
}
