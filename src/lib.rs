//! # blink - live one-way directory mirror
//!
//! Copies a source tree into a destination, removes destination files that
//! no longer have a source counterpart, then watches the source and applies
//! every change as it settles. Paths matched by `.gitignore`, the `.pkgmeta`
//! ignore block or configured patterns are never mirrored.

// Module declarations
pub mod commands;
pub mod config;
pub mod filter;
pub mod mirror;
pub mod scanner;
pub mod types;
pub mod ui;
pub mod watcher;

// Re-export commonly used types
pub use config::Config;
pub use filter::{IgnoreOptions, PatternSet};
pub use types::{BlinkError, ChangeEvent, ChangeOp, MirrorAction, RelativePath};
pub use watcher::{watch, WatchOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
