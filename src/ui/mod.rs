//! User-facing output

mod progress;

pub use progress::{format_change, format_error, ProgressReporter, TIME_FORMAT};
