//! `blink.toml` loading

use crate::types::BlinkError;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Values read from the config file; unset keys fall back to defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FileConfig {
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
    pub ignore: Vec<String>,
    pub use_gitignore: Option<bool>,
    pub use_pkgmeta: Option<bool>,
    pub delay: Option<u64>,

    /// Game install folder used for destination auto-detection. Accepted so
    /// existing files still load; `destination` must be set instead.
    pub wow_path: Option<String>,
}

impl FileConfig {
    /// Load `path`. A missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, BlinkError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(BlinkError::Config(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let config = Self::parse(&content).map_err(|e| {
            BlinkError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        if let Some(wow_path) = &config.wow_path {
            warn!(
                "Ignoring wowPath = {:?} in {}: set `destination` to the addon folder",
                wow_path,
                path.display()
            );
        }
        Ok(config)
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
