//! MirrorAction - outcome of applying a change to the destination

use std::fmt;

/// What the mirror engine did for one change event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorAction {
    /// Source content was copied to the destination
    Copied,

    /// Destination entry was removed
    Removed,
}

impl MirrorAction {
    /// Short label used in the change log
    pub fn label(&self) -> &'static str {
        match self {
            MirrorAction::Copied => "copied",
            MirrorAction::Removed => "removed",
        }
    }
}

impl fmt::Display for MirrorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
