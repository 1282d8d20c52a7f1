//! Single ignore rule: a glob or a directory rule

use globset::{GlobBuilder, GlobMatcher};

/// One compiled ignore rule.
#[derive(Debug, Clone)]
pub enum IgnoreRule {
    /// Shell glob matched against the final segment and the full path.
    Glob { pattern: String, matcher: GlobMatcher },

    /// Trailing-slash rule: the directory itself and everything beneath it,
    /// wherever its segments appear in the path.
    Directory {
        pattern: String,
        segments: Vec<GlobMatcher>,
    },
}

impl IgnoreRule {
    /// Compile one pattern line.
    ///
    /// A leading `/` is dropped. A trailing `/` makes a directory rule.
    pub fn parse(raw: &str) -> Result<Self, globset::Error> {
        let pattern = raw.trim();
        let body = pattern.trim_start_matches('/');

        if let Some(dir) = body.strip_suffix('/') {
            let segments = dir
                .split('/')
                .filter(|s| !s.is_empty())
                .map(compile_glob)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(IgnoreRule::Directory {
                pattern: pattern.to_string(),
                segments,
            });
        }

        Ok(IgnoreRule::Glob {
            pattern: pattern.to_string(),
            matcher: compile_glob(body)?,
        })
    }

    /// The pattern text this rule was compiled from.
    pub fn pattern(&self) -> &str {
        match self {
            IgnoreRule::Glob { pattern, .. } | IgnoreRule::Directory { pattern, .. } => pattern,
        }
    }

    /// Check a normalized (`/`-separated, no edge slashes) relative path.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            IgnoreRule::Glob { matcher, .. } => {
                let file_name = path.rsplit('/').next().unwrap_or(path);
                matcher.is_match(file_name) || matcher.is_match(path)
            }
            IgnoreRule::Directory { segments, .. } => {
                if segments.is_empty() {
                    return false;
                }
                let parts: Vec<&str> = path.split('/').collect();
                parts.windows(segments.len()).any(|window| {
                    window
                        .iter()
                        .zip(segments)
                        .all(|(part, matcher)| matcher.is_match(part))
                })
            }
        }
    }
}

fn compile_glob(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    Ok(GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()?
        .compile_matcher())
}
