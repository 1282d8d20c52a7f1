//! Main mirror command: clean, initial copy, then watch

use crate::filter::PatternSet;
use crate::mirror::{apply_event, clean_destination, count_files, initial_sync};
use crate::scanner::ProgressCallback;
use crate::types::{BlinkError, ChangeEvent, MirrorAction, RelativePath};
use crate::ui::ProgressReporter;
use crate::watcher::{watch, WatchOptions, DEFAULT_QUEUE_CAPACITY};
use crate::Config;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Run the mirror session described by `config`.
///
/// Returns once the initial copy is done when `no_watch` is set, otherwise
/// after Ctrl+C. A watcher that stops on its own is an error.
pub async fn run(config: Config) -> Result<(), BlinkError> {
    let patterns = Arc::new(PatternSet::compile(
        &config.source,
        &config.ignore_options(),
    )?);
    debug!("Ignore rules: {:?}", patterns.patterns().collect::<Vec<_>>());

    let reporter = Arc::new(ProgressReporter::new());
    let copied = mirror_once(&config, &patterns, &reporter)?;
    reporter.message(&format!(
        "Synced {} files to {}",
        copied,
        config.destination.display()
    ));

    if config.no_watch {
        return Ok(());
    }

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let options = WatchOptions {
        debounce: config.debounce(),
        queue_capacity: DEFAULT_QUEUE_CAPACITY,
    };
    let mut events = watch(&config.source, Arc::clone(&patterns), options, cancel.clone())?;
    reporter.message(&format!(
        "Watching {} → {} (Ctrl+C to stop)",
        config.source.display(),
        config.destination.display()
    ));

    while let Some(event) = events.recv().await {
        match process_event(&config.source, &config.destination, &patterns, event) {
            Outcome::Mirrored(path, action) => reporter.log_change(&path, action),
            Outcome::Failed(path, error) => reporter.log_error(path.as_ref(), &error),
        }
    }

    if !cancel.is_cancelled() {
        return Err(BlinkError::QueueClosed);
    }
    info!("Mirror session ended");
    Ok(())
}

/// Clean the destination and copy the whole source tree into it.
///
/// # Returns
/// * `Ok(usize)` - Number of files copied
fn mirror_once(
    config: &Config,
    patterns: &Arc<PatternSet>,
    reporter: &Arc<ProgressReporter>,
) -> Result<usize, BlinkError> {
    fs::create_dir_all(&config.destination)?;

    let removed = clean_destination(&config.source, &config.destination, patterns)?;
    if removed > 0 {
        reporter.message(&format!("Removed {} stale file(s) from destination", removed));
    }

    let total = count_files(&config.source, patterns)?;
    reporter.start_sync(total as u64);

    let on_file: ProgressCallback = {
        let reporter = Arc::clone(reporter);
        Box::new(move |copied: usize| reporter.file_synced(copied as u64))
    };
    let copied = initial_sync(&config.source, &config.destination, patterns, Some(&on_file))?;
    reporter.finish_sync(copied);
    Ok(copied)
}

/// Result of handling one watcher event
#[derive(Debug)]
enum Outcome {
    Mirrored(RelativePath, MirrorAction),
    Failed(Option<RelativePath>, BlinkError),
}

/// Apply one event to the destination. Failures are reported, never fatal.
fn process_event(
    source: &Path,
    destination: &Path,
    patterns: &Arc<PatternSet>,
    event: ChangeEvent,
) -> Outcome {
    match event {
        ChangeEvent::Changed { path, op } => {
            match apply_event(source, destination, &path, op, patterns) {
                Ok(action) => Outcome::Mirrored(path, action),
                Err(error) => {
                    warn!("Failed to apply {} on {}: {}", op, path, error);
                    Outcome::Failed(Some(path), error)
                }
            }
        }
        ChangeEvent::Failed(error) => Outcome::Failed(None, error),
    }
}

fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Interrupted, stopping watcher"),
            Err(e) => warn!("Could not listen for Ctrl+C: {}", e),
        }
        cancel.cancel();
    });
}
