//! Debouncing control loop
//!
//! One task owns the pending batch, the debounce timer and the registry, and
//! waits on cancellation, timer expiry, raw notifications and notification
//! errors in a single `select!`.

use super::pending::PendingBatch;
use super::registry::{register_tree, WatchRegistry};
use crate::filter::PatternSet;
use crate::types::{BlinkError, ChangeEvent, ChangeOp, RelativePath};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Raw inputs of the loop
pub(crate) struct Inputs {
    pub notifications: mpsc::UnboundedReceiver<notify::Event>,
    pub errors: mpsc::UnboundedReceiver<notify::Error>,
}

pub(crate) struct Aggregator<R: WatchRegistry> {
    root: PathBuf,
    patterns: Arc<PatternSet>,
    registry: R,
    pending: PendingBatch,
}

impl<R: WatchRegistry> Aggregator<R> {
    pub(crate) fn new(root: PathBuf, patterns: Arc<PatternSet>, registry: R) -> Self {
        Self {
            root,
            patterns,
            registry,
            pending: PendingBatch::new(),
        }
    }

    /// Buffer one raw notification. Returns whether anything was recorded.
    pub(crate) fn handle_notification(&mut self, event: notify::Event) -> bool {
        let Some(op) = ChangeOp::classify(&event.kind) else {
            trace!("Discarded {:?}", event.kind);
            return false;
        };

        let mut recorded = false;
        for path in &event.paths {
            let Some(relative) = RelativePath::from_root(&self.root, path) else {
                continue;
            };
            if self.patterns.should_ignore(relative.as_str()) {
                trace!("Ignored {}", relative);
                continue;
            }

            if matches!(op, ChangeOp::Remove | ChangeOp::Rename) {
                if let Err(e) = self.registry.deregister(path) {
                    debug!("Deregistering {} failed: {}", relative, e);
                }
            }
            // A directory moved into the tree arrives as a rename
            if matches!(op, ChangeOp::Create | ChangeOp::Rename) && path.is_dir() {
                self.register_new_dir(&relative);
            }

            self.pending.record(relative, op);
            recorded = true;
        }
        recorded
    }

    fn register_new_dir(&mut self, relative: &RelativePath) {
        match register_tree(&mut self.registry, &self.root, Some(relative), &self.patterns) {
            Ok(count) => debug!("Registered {} new director(ies) at {}", count, relative),
            Err(e) => warn!("Could not watch new directory {}: {}", relative, e),
        }
    }

    /// Run until cancelled, until the notification source closes, or until
    /// the consumer drops the output queue. The queue closes on return.
    pub(crate) async fn run(
        mut self,
        mut inputs: Inputs,
        output: mpsc::Sender<ChangeEvent>,
        cancel: CancellationToken,
        debounce: Duration,
    ) {
        let timer = tokio::time::sleep(debounce);
        tokio::pin!(timer);
        let mut armed = false;

        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => {
                    debug!("Watcher cancelled with {} pending change(s)", self.pending.len());
                    break;
                }

                () = &mut timer, if armed => {
                    armed = false;
                    if !self.flush(&output, &cancel).await {
                        break;
                    }
                }

                raw = inputs.notifications.recv() => match raw {
                    Some(event) => {
                        if self.handle_notification(event) {
                            timer.as_mut().reset(Instant::now() + debounce);
                            armed = true;
                        }
                    }
                    None => break,
                },

                err = inputs.errors.recv() => match err {
                    Some(e) => {
                        warn!("Notification source error: {}", e);
                        if !send(&output, &cancel, ChangeEvent::Failed(BlinkError::Notify(e))).await {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }

        info!("Watcher stopped");
    }

    /// Emit every buffered change. Returns false if the loop should stop.
    async fn flush(&mut self, output: &mpsc::Sender<ChangeEvent>, cancel: &CancellationToken) -> bool {
        let events = self.pending.drain();
        debug!("Flushing {} change(s)", events.len());
        for event in events {
            if !send(output, cancel, event).await {
                return false;
            }
        }
        true
    }
}

/// Send on the bounded queue, giving up on cancellation or a dropped receiver
async fn send(
    output: &mpsc::Sender<ChangeEvent>,
    cancel: &CancellationToken,
    event: ChangeEvent,
) -> bool {
    tokio::select! {
        biased;
        () = cancel.cancelled() => false,
        sent = output.send(event) => sent.is_ok(),
    }
}
