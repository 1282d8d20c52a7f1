//! Mirror engine: keeps the destination equal to "source minus ignored paths"
//!
//! All operations are synchronous and touch only the two trees they are given.

mod apply;
mod clean;
mod copy;
mod sync;

pub use apply::apply_event;
pub use clean::clean_destination;
pub use copy::{copy_file, delete_file, remove_path};
pub use sync::{count_files, initial_sync, sync_subtree};
