//! Directory scanning logic

mod walker;

pub use walker::{ProgressCallback, ScanEntry, Scanner};
