//! Set of directories registered with the OS notification source

use crate::filter::PatternSet;
use crate::scanner::Scanner;
use crate::types::{BlinkError, RelativePath};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Directory registrations, mutated only by the aggregator loop
pub trait WatchRegistry: Send + 'static {
    /// Start receiving notifications for the entries of `dir`.
    fn register(&mut self, dir: &Path) -> Result<(), BlinkError>;

    /// Stop receiving notifications for `path` and every registered
    /// directory beneath it.
    fn deregister(&mut self, path: &Path) -> Result<(), BlinkError>;
}

/// [`WatchRegistry`] backed by a `notify` watcher, one non-recursive
/// watch per directory
pub struct NotifyRegistry {
    watcher: RecommendedWatcher,
    watched: BTreeSet<PathBuf>,
}

impl NotifyRegistry {
    pub fn new(watcher: RecommendedWatcher) -> Self {
        Self {
            watcher,
            watched: BTreeSet::new(),
        }
    }

    /// Number of registered directories
    pub fn len(&self) -> usize {
        self.watched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }
}

impl WatchRegistry for NotifyRegistry {
    fn register(&mut self, dir: &Path) -> Result<(), BlinkError> {
        if self.watched.contains(dir) {
            return Ok(());
        }
        self.watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|source| BlinkError::WatchRegistration {
                path: dir.to_path_buf(),
                source,
            })?;
        self.watched.insert(dir.to_path_buf());
        debug!("Registered {}", dir.display());
        Ok(())
    }

    fn deregister(&mut self, path: &Path) -> Result<(), BlinkError> {
        let doomed: Vec<PathBuf> = self
            .watched
            .iter()
            .filter(|dir| dir.starts_with(path))
            .cloned()
            .collect();

        let mut result = Ok(());
        for dir in doomed {
            self.watched.remove(&dir);
            // The OS may already have dropped the watch along with the directory
            if let Err(e) = self.watcher.unwatch(&dir) {
                result = Err(BlinkError::Notify(e));
            } else {
                debug!("Deregistered {}", dir.display());
            }
        }
        result
    }
}

/// Register `start` (the root itself when `None`) and every non-ignored
/// directory beneath it. Returns the number of registered directories.
pub fn register_tree<R: WatchRegistry + ?Sized>(
    registry: &mut R,
    root: &Path,
    start: Option<&RelativePath>,
    patterns: &Arc<PatternSet>,
) -> Result<usize, BlinkError> {
    let (start_dir, scanner) = match start {
        Some(subtree) => (
            subtree.join_to(root),
            Scanner::subtree(root, subtree, patterns),
        ),
        None => (root.to_path_buf(), Scanner::filtered(root, patterns)),
    };

    registry.register(&start_dir)?;
    let mut registered = 1;

    for entry in scanner {
        let entry = entry?;
        if entry.is_dir {
            registry.register(&entry.path)?;
            registered += 1;
        }
    }
    Ok(registered)
}
