//! Terminal output: initial-sync progress and the live change log

use crate::types::{BlinkError, MirrorAction, RelativePath};
use chrono::{DateTime, Local};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Timestamp format of change-log lines
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Progress reporter for a mirror session
pub struct ProgressReporter {
    sync_bar: ProgressBar,
    colored: bool,
}

impl ProgressReporter {
    /// Create a reporter drawing to stdout; the bar stays hidden when stdout
    /// is not a terminal.
    pub fn new() -> Self {
        let is_term = Term::stdout().is_term();
        let target = if is_term {
            ProgressDrawTarget::stdout()
        } else {
            ProgressDrawTarget::hidden()
        };
        Self::with_target(target, is_term)
    }

    /// Reporter whose bar is never drawn
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden(), false)
    }

    fn with_target(target: ProgressDrawTarget, colored: bool) -> Self {
        let sync_bar = ProgressBar::with_draw_target(Some(0), target);
        if let Ok(style) = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} files | {msg}")
        {
            sync_bar.set_style(style.progress_chars("=>-"));
        }
        Self { sync_bar, colored }
    }

    /// Initialize the initial-copy bar.
    pub fn start_sync(&self, total_files: u64) {
        self.sync_bar.set_length(total_files);
        self.sync_bar.set_position(0);
        self.sync_bar.set_message("Copying...");
    }

    /// Set the number of files copied so far.
    pub fn file_synced(&self, copied: u64) {
        self.sync_bar.set_position(copied);
    }

    /// Finalize the initial-copy bar.
    pub fn finish_sync(&self, copied: usize) {
        self.sync_bar
            .finish_with_message(format!("{} files copied", copied));
    }

    /// Print one applied change.
    pub fn log_change(&self, path: &RelativePath, action: MirrorAction) {
        self.print(format_change(Local::now(), path, action, self.colored));
    }

    /// Print a failed change or a notification-source error.
    pub fn log_error(&self, path: Option<&RelativePath>, error: &BlinkError) {
        self.print(format_error(Local::now(), path, error, self.colored));
    }

    /// Print a status line above the bar.
    pub fn message(&self, line: &str) {
        self.print(line.to_string());
    }

    fn print(&self, line: String) {
        if self.sync_bar.is_hidden() {
            println!("{}", line);
        } else {
            self.sync_bar.println(line);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// `HH:MM:SS  <path> → copied|removed`
pub fn format_change(
    at: DateTime<Local>,
    path: &RelativePath,
    action: MirrorAction,
    colored: bool,
) -> String {
    let label = match (action, colored) {
        (_, false) => action.label().to_string(),
        (MirrorAction::Copied, true) => style(action.label()).green().to_string(),
        (MirrorAction::Removed, true) => style(action.label()).red().to_string(),
    };
    format!("{}  {} → {}", timestamp(at, colored), path, label)
}

/// `HH:MM:SS  <path> → error: <message>`, or without the path for source errors
pub fn format_error(
    at: DateTime<Local>,
    path: Option<&RelativePath>,
    error: &BlinkError,
    colored: bool,
) -> String {
    let detail = format!("error: {}", error);
    let detail = if colored {
        style(detail).red().bold().to_string()
    } else {
        detail
    };
    match path {
        Some(path) => format!("{}  {} → {}", timestamp(at, colored), path, detail),
        None => format!("{}  {}", timestamp(at, colored), detail),
    }
}

fn timestamp(at: DateTime<Local>, colored: bool) -> String {
    let text = at.format(TIME_FORMAT).to_string();
    if colored {
        style(text).dim().to_string()
    } else {
        text
    }
}
