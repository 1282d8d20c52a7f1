//! Command-line arguments

use super::CONFIG_FILE;
use clap::Parser;
use std::path::PathBuf;

/// Mirror a source tree into a destination and keep it in sync
#[derive(Debug, Clone, Parser)]
#[command(name = "blink", version, about)]
pub struct Cli {
    /// Source directory (default: `source` from blink.toml, else ".")
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Destination directory
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Debounce delay in milliseconds (default: 50)
    #[arg(short, long)]
    pub delay: Option<u64>,

    /// Extra ignore pattern (repeatable)
    #[arg(short, long = "ignore", value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Don't read .gitignore from the source
    #[arg(long)]
    pub no_gitignore: bool,

    /// Don't read the ignore block of .pkgmeta from the source
    #[arg(long)]
    pub no_pkgmeta: bool,

    /// One-time copy, don't watch for changes
    #[arg(long)]
    pub no_watch: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Config file to load: `--config`, else blink.toml in the working directory
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }
}
