//! Ignore block inside a `.pkgmeta` packaging file

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the packaging metadata file at the source root
pub const PKGMETA_FILE: &str = ".pkgmeta";

const BLOCK_HEADER: &str = "ignore:";
const ITEM_PREFIXES: [&str; 3] = ["  - ", "    - ", "\t- "];

/// Read the ignore block from `path`.
///
/// A missing or unreadable file yields no patterns.
pub fn read_pkgmeta_ignores(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => parse_ignore_block(&content),
        Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            warn!("Skipping unreadable {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Extract list items that follow an `ignore:` header line.
///
/// Collection stops at the first non-blank line that is not indented.
pub fn parse_ignore_block(content: &str) -> Vec<String> {
    let mut patterns = Vec::new();
    let mut collecting = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed == BLOCK_HEADER {
            collecting = true;
            continue;
        }
        if !collecting {
            continue;
        }

        if ITEM_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
            let value = trimmed.trim_start_matches("- ").trim();
            if !value.is_empty() {
                patterns.push(value.to_string());
            }
        } else if !trimmed.is_empty() && !line.starts_with(' ') && !line.starts_with('\t') {
            collecting = false;
        }
    }

    debug!("Parsed {} pattern(s) from pkgmeta ignore block", patterns.len());
    patterns
}
