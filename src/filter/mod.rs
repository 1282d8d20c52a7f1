//! Ignore-pattern matching
//!
//! A [`PatternSet`] is compiled once per run from, in order:
//! the always-ignored base rules, the source's `.gitignore`, the ignore block
//! of its `.pkgmeta`, and extra patterns from configuration. A path is ignored
//! when any rule matches it.

mod pkgmeta;
mod rule;

pub use pkgmeta::{parse_ignore_block, read_pkgmeta_ignores, PKGMETA_FILE};
pub use rule::IgnoreRule;

use crate::config::CONFIG_FILE;
use crate::types::{normalize, BlinkError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the gitignore-format pattern file at the source root
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Version-control metadata directory, always ignored
pub const VCS_DIR_RULE: &str = ".git/";

/// Which pattern sources to read when compiling a [`PatternSet`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreOptions {
    /// Read `.gitignore` at the source root
    pub use_gitignore: bool,

    /// Read the `ignore:` block of `.pkgmeta` at the source root
    pub use_pkgmeta: bool,

    /// Explicit extra patterns (highest precedence, must be valid)
    pub extra: Vec<String>,
}

impl Default for IgnoreOptions {
    fn default() -> Self {
        Self {
            use_gitignore: true,
            use_pkgmeta: true,
            extra: Vec::new(),
        }
    }
}

/// Immutable union of ignore rules
#[derive(Debug, Clone)]
pub struct PatternSet {
    rules: Vec<IgnoreRule>,
}

impl PatternSet {
    /// Compile the rules for the tree rooted at `source_root`.
    ///
    /// Unreadable optional files contribute nothing. Invalid lines inside
    /// those files are skipped; an invalid extra pattern is an error.
    pub fn compile(source_root: &Path, options: &IgnoreOptions) -> Result<Self, BlinkError> {
        let mut set = Self::default();

        if options.use_gitignore {
            let lines = read_gitignore(&source_root.join(GITIGNORE_FILE));
            set.extend_lenient(lines.iter().map(String::as_str), GITIGNORE_FILE);
        }

        if options.use_pkgmeta {
            let patterns = read_pkgmeta_ignores(&source_root.join(PKGMETA_FILE));
            set.extend_lenient(patterns.iter().map(String::as_str), PKGMETA_FILE);
        }

        for pattern in &options.extra {
            set.push(pattern)?;
        }

        debug!("Compiled {} ignore rule(s)", set.rules.len());
        Ok(set)
    }

    /// Base rules plus the given patterns, all of which must be valid.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, BlinkError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for pattern in patterns {
            set.push(pattern.as_ref())?;
        }
        Ok(set)
    }

    /// Check whether a root-relative path is excluded from the mirror.
    ///
    /// A path is excluded when it or any of its ancestor directories matches
    /// a rule, the same outcome as a walk that prunes ignored directories.
    /// Accepts `/` or `\` separators.
    pub fn should_ignore(&self, relative: &str) -> bool {
        let path = normalize(relative);
        if path.is_empty() {
            return false;
        }
        let ancestors = path
            .match_indices('/')
            .map(|(end, _)| &path[..end]);
        ancestors
            .chain(std::iter::once(path.as_str()))
            .any(|candidate| self.rules.iter().any(|rule| rule.matches(candidate)))
    }

    /// [`PatternSet::should_ignore`] for a relative `Path`.
    pub fn should_ignore_path(&self, relative: &Path) -> bool {
        self.should_ignore(&relative.to_string_lossy())
    }

    /// Pattern texts in precedence order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(IgnoreRule::pattern)
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Never true in practice: the base rules are always present.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn push(&mut self, pattern: &str) -> Result<(), BlinkError> {
        let rule = IgnoreRule::parse(pattern).map_err(|e| BlinkError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.kind().to_string(),
        })?;
        self.rules.push(rule);
        Ok(())
    }

    fn extend_lenient<'a>(&mut self, patterns: impl Iterator<Item = &'a str>, origin: &str) {
        for pattern in patterns {
            if let Err(e) = self.push(pattern) {
                warn!("Skipping pattern from {}: {}", origin, e);
            }
        }
    }
}

impl Default for PatternSet {
    /// Only the always-ignored rules.
    fn default() -> Self {
        let rules = [VCS_DIR_RULE, CONFIG_FILE]
            .iter()
            .filter_map(|p| IgnoreRule::parse(p).ok())
            .collect();
        Self { rules }
    }
}

/// Read pattern lines from a gitignore-format file.
///
/// Blank lines, `#` comments and `!` negations are skipped.
pub fn read_gitignore(path: &Path) -> Vec<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            warn!("Skipping unreadable {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| {
            if line.starts_with('!') {
                debug!("Negated pattern '{}' not supported, skipped", line);
                false
            } else {
                true
            }
        })
        .map(String::from)
        .collect()
}
