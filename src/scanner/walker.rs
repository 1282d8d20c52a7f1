//! Filtered depth-first directory walker

use crate::filter::PatternSet;
use crate::types::{BlinkError, RelativePath};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Callback for reporting scan progress
///
/// Argument: number of files handled so far
pub type ProgressCallback = Box<dyn Fn(usize) + Send + Sync>;

/// One entry below the scan root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    /// Absolute path on disk
    pub path: PathBuf,

    /// Path relative to the tree root
    pub relative: RelativePath,

    /// Whether the entry is a directory (or a link to one; links are never followed)
    pub is_dir: bool,
}

/// Iterator over the entries of a tree, depth-first and sorted by name
pub struct Scanner {
    root: PathBuf,
    inner: ignore::Walk,
}

impl Scanner {
    /// Walk everything under `root`.
    pub fn new(root: &Path) -> Self {
        Self::build(root, root, None)
    }

    /// Walk `root`, skipping ignored entries and never descending into
    /// ignored directories.
    pub fn filtered(root: &Path, patterns: &Arc<PatternSet>) -> Self {
        Self::build(root, root, Some(Arc::clone(patterns)))
    }

    /// Walk only the `subtree` of `root`, evaluating rules on root-relative paths.
    pub fn subtree(root: &Path, subtree: &RelativePath, patterns: &Arc<PatternSet>) -> Self {
        Self::build(root, &subtree.join_to(root), Some(Arc::clone(patterns)))
    }

    fn build(root: &Path, start: &Path, patterns: Option<Arc<PatternSet>>) -> Self {
        let mut builder = ignore::WalkBuilder::new(start);
        builder
            .standard_filters(false) // Rules come from PatternSet only
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        if let Some(patterns) = patterns {
            let filter_root = root.to_path_buf();
            builder.filter_entry(move |entry| {
                match RelativePath::from_root(&filter_root, entry.path()) {
                    Some(relative) => !patterns.should_ignore(relative.as_str()),
                    None => true,
                }
            });
        }

        Self {
            root: root.to_path_buf(),
            inner: builder.build(),
        }
    }
}

impl Iterator for Scanner {
    type Item = Result<ScanEntry, BlinkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(walk_error(e))),
            };

            if entry.depth() == 0 {
                continue;
            }
            let Some(relative) = RelativePath::from_root(&self.root, entry.path()) else {
                continue;
            };

            // Links to directories are reported as directories but never entered
            let is_dir = entry
                .file_type()
                .is_some_and(|ft| ft.is_dir() || (ft.is_symlink() && entry.path().is_dir()));
            return Some(Ok(ScanEntry {
                path: entry.into_path(),
                relative,
                is_dir,
            }));
        }
    }
}

/// Surface IO failures as `Io` so callers can inspect their kind
fn walk_error(error: ignore::Error) -> BlinkError {
    match error.io_error().map(std::io::Error::kind) {
        Some(kind) => BlinkError::Io(std::io::Error::new(kind, error.to_string())),
        None => BlinkError::Walk(error),
    }
}
