//! RelativePath - slash-normalized path relative to a tree root

use std::fmt;
use std::path::{Path, PathBuf};

/// A path relative to a tree root, always using `/` as separator.
///
/// Never empty and never the root itself (`.`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(String);

impl RelativePath {
    /// Normalize `raw` into a relative path.
    ///
    /// Backslashes become `/`, leading `./` and surrounding slashes are removed.
    /// Returns `None` for the root (`""` or `"."`).
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = normalize(raw);
        if normalized.is_empty() || normalized == "." {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// Resolve an absolute `path` against `root`.
    ///
    /// Returns `None` when `path` is not under `root` or is `root` itself.
    pub fn from_root(root: &Path, path: &Path) -> Option<Self> {
        let relative = path.strip_prefix(root).ok()?;
        Self::new(&relative.to_string_lossy())
    }

    /// The path as a `/`-separated string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments from the root downwards.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Final path segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Join onto `root` using platform separators.
    pub fn join_to(&self, root: &Path) -> PathBuf {
        let mut full = root.to_path_buf();
        for segment in self.segments() {
            full.push(segment);
        }
        full
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize separators and strip `./` prefixes and edge slashes.
pub(crate) fn normalize(raw: &str) -> String {
    let mut s = raw.replace('\\', "/");
    while let Some(rest) = s.strip_prefix("./") {
        s = rest.to_string();
    }
    s.trim_matches('/').to_string()
}
