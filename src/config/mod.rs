//! Configuration management
//!
//! Values are layered: built-in defaults, then `blink.toml`, then CLI flags.

mod cli;
mod file;

pub use cli::Cli;
pub use file::FileConfig;

use crate::filter::IgnoreOptions;
use crate::types::BlinkError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the tool's own configuration file (always ignored when mirroring)
pub const CONFIG_FILE: &str = "blink.toml";

/// Default debounce window in milliseconds
pub const DEFAULT_DELAY_MS: u64 = 50;

/// Global configuration for blink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Source directory
    pub source: PathBuf,

    /// Destination directory
    pub destination: PathBuf,

    /// Extra ignore patterns
    pub ignore: Vec<String>,

    /// Read `.gitignore` from the source root
    pub use_gitignore: bool,

    /// Read the ignore block of `.pkgmeta` from the source root
    pub use_pkgmeta: bool,

    /// Debounce window in milliseconds
    pub delay_ms: u64,

    /// One-time copy, don't watch
    pub no_watch: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::from("."),
            destination: PathBuf::new(),
            ignore: Vec::new(),
            use_gitignore: true,
            use_pkgmeta: true,
            delay_ms: DEFAULT_DELAY_MS,
            no_watch: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Layer file values over the defaults
    pub fn from_file(file: FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            source: file.source.unwrap_or(defaults.source),
            destination: file.destination.unwrap_or(defaults.destination),
            ignore: file.ignore,
            use_gitignore: file.use_gitignore.unwrap_or(defaults.use_gitignore),
            use_pkgmeta: file.use_pkgmeta.unwrap_or(defaults.use_pkgmeta),
            delay_ms: file.delay.unwrap_or(defaults.delay_ms),
            ..defaults
        }
    }

    /// Override values with the flags that were actually given
    pub fn merge_cli(&mut self, cli: &Cli) {
        if let Some(source) = &cli.source {
            self.source = source.clone();
        }
        if let Some(target) = &cli.target {
            self.destination = target.clone();
        }
        if let Some(delay) = cli.delay {
            self.delay_ms = delay;
        }
        self.ignore.extend(cli.ignore.iter().cloned());
        if cli.no_gitignore {
            self.use_gitignore = false;
        }
        if cli.no_pkgmeta {
            self.use_pkgmeta = false;
        }
        self.no_watch |= cli.no_watch;
        self.verbose |= cli.verbose;
    }

    /// Debounce window
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Ignore sources for the pattern compiler
    pub fn ignore_options(&self) -> IgnoreOptions {
        IgnoreOptions {
            use_gitignore: self.use_gitignore,
            use_pkgmeta: self.use_pkgmeta,
            extra: self.ignore.clone(),
        }
    }

    /// Validate configuration
    ///
    /// Both roots are made absolute. The trees must be distinct and not
    /// nested, otherwise cleaning the destination would touch the source.
    pub fn validate(&mut self) -> Result<(), BlinkError> {
        if !self.source.is_dir() {
            return Err(BlinkError::Config(format!(
                "Source directory does not exist: {}",
                self.source.display()
            )));
        }

        if self.destination.as_os_str().is_empty() {
            return Err(BlinkError::Config(
                "No destination given (use --target or `destination` in blink.toml)".to_string(),
            ));
        }

        if self.delay_ms == 0 {
            return Err(BlinkError::Config(
                "Debounce delay must be greater than zero".to_string(),
            ));
        }

        self.source = self.source.canonicalize()?;
        self.destination = absolute(&self.destination)?;

        if self.source == self.destination {
            return Err(BlinkError::Config(
                "Source and destination cannot be the same".to_string(),
            ));
        }

        if self.destination.starts_with(&self.source) || self.source.starts_with(&self.destination)
        {
            return Err(BlinkError::Config(format!(
                "Source and destination cannot be nested: {} / {}",
                self.source.display(),
                self.destination.display()
            )));
        }

        Ok(())
    }
}

impl TryFrom<Cli> for Config {
    type Error = BlinkError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let file = FileConfig::load(&cli.config_path())?;
        let mut config = Config::from_file(file);
        config.merge_cli(&cli);
        config.validate()?;
        Ok(config)
    }
}

/// Absolute form of `path`, resolving through the deepest existing ancestor
fn absolute(path: &Path) -> Result<PathBuf, BlinkError> {
    if path.exists() {
        return Ok(path.canonicalize()?);
    }
    let base = if path.is_absolute() {
        PathBuf::new()
    } else {
        std::env::current_dir()?
    };
    let joined = base.join(path);

    let mut existing = joined.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(joined),
        }
    }

    let mut resolved = existing.canonicalize()?;
    for name in missing.into_iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}
