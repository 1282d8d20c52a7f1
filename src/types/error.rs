//! Error types for blink

use std::path::PathBuf;
use thiserror::Error;

/// Error types for blink operations
#[derive(Debug, Error)]
pub enum BlinkError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// An ignore pattern supplied by configuration could not be compiled
    #[error("Invalid ignore pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Permission denied for specific path
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// The OS notification source failed
    #[error("Watch error: {0}")]
    Notify(#[from] notify::Error),

    /// Directory traversal failed
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// A directory could not be registered with the notification source
    #[error("Failed to watch {path}: {source}")]
    WatchRegistration {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// The watcher's event queue closed without cancellation
    #[error("Event queue closed")]
    QueueClosed,
}

impl BlinkError {
    /// Check if this error is related to permissions
    pub fn is_permission_error(&self) -> bool {
        match self {
            BlinkError::PermissionDenied { .. } => true,
            BlinkError::Io(e) => e.kind() == std::io::ErrorKind::PermissionDenied,
            _ => false,
        }
    }

    /// Check if this error can only happen before watching begins
    pub fn is_startup_error(&self) -> bool {
        matches!(
            self,
            BlinkError::Config(_)
                | BlinkError::InvalidPattern { .. }
                | BlinkError::WatchRegistration { .. }
        )
    }

    /// Check if this error means "the path is not there"
    pub fn is_not_found(&self) -> bool {
        match self {
            BlinkError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
