//! Debounced change watcher
//!
//! Subscribes to OS file-change notifications for a source tree, drops
//! ignored paths, and coalesces bursts so that each quiet period of
//! `debounce` produces at most one [`ChangeEvent`] per path.
//!
//! The loop runs as a Tokio task. It stops when the cancellation token fires
//! or the notification source closes, and the returned queue closes with it.

mod aggregator;
mod pending;
mod registry;

pub use pending::PendingBatch;
pub use registry::{register_tree, NotifyRegistry, WatchRegistry};

use crate::config::DEFAULT_DELAY_MS;
use crate::filter::PatternSet;
use crate::types::{BlinkError, ChangeEvent};
use aggregator::{Aggregator, Inputs};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Capacity of the output queue of [`watch`]
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Tuning for [`watch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    /// Quiet period after the latest change before a batch is emitted
    pub debounce: Duration,

    /// Bound of the output queue; a full queue back-pressures the loop
    pub queue_capacity: usize,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DELAY_MS),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl WatchOptions {
    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            debounce,
            ..Self::default()
        }
    }
}

/// Start watching `root` and return the queue of debounced changes.
///
/// Every non-ignored directory under `root` is registered before this
/// returns; any registration failure is reported here and nothing is left
/// running. Directories created later are registered as they appear.
///
/// Must be called inside a Tokio runtime.
///
/// # Arguments
/// * `root` - Source tree to watch
/// * `patterns` - Compiled ignore rules; ignored paths never produce events
/// * `options` - Debounce window and queue capacity
/// * `cancel` - Stops the watcher when cancelled
pub fn watch(
    root: &Path,
    patterns: Arc<PatternSet>,
    options: WatchOptions,
    cancel: CancellationToken,
) -> Result<mpsc::Receiver<ChangeEvent>, BlinkError> {
    let root = root
        .canonicalize()
        .map_err(|source| BlinkError::WatchRegistration {
            path: root.to_path_buf(),
            source: notify::Error::io(source),
        })?;

    let (raw_tx, raw_rx) = mpsc::unbounded_channel();
    let (err_tx, err_rx) = mpsc::unbounded_channel();

    // Runs on the notification backend's thread; sends never block.
    let watcher = notify::recommended_watcher(move |result: notify::Result<notify::Event>| {
        match result {
            Ok(event) => {
                let _ = raw_tx.send(event);
            }
            Err(e) => {
                let _ = err_tx.send(e);
            }
        }
    })?;

    let mut registry = NotifyRegistry::new(watcher);
    let registered = register_tree(&mut registry, &root, None, &patterns)?;
    info!("Watching {} director(ies) under {}", registered, root.display());

    let (out_tx, out_rx) = mpsc::channel(options.queue_capacity.max(1));
    let aggregator = Aggregator::new(root, patterns, registry);
    tokio::spawn(aggregator.run(
        Inputs {
            notifications: raw_rx,
            errors: err_rx,
        },
        out_tx,
        cancel,
        options.debounce,
    ));

    Ok(out_rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = WatchOptions::default();
        assert_eq!(options.debounce, Duration::from_millis(50));
        assert_eq!(options.queue_capacity, 64);

        let slow = WatchOptions::with_debounce(Duration::from_secs(1));
        assert_eq!(slow.debounce, Duration::from_secs(1));
        assert_eq!(slow.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    }

    #[tokio::test]
    async fn test_missing_root_is_a_startup_error() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let result = watch(
            &dir.path().join("missing"),
            Arc::new(PatternSet::default()),
            WatchOptions::default(),
            CancellationToken::new(),
        );

        let err = result.expect_err("missing root must fail");
        assert!(err.is_startup_error());
    }
}
