//! Change events emitted by the watcher

use super::{BlinkError, RelativePath};
use notify::event::{EventKind, ModifyKind};
use std::fmt;

/// Kind of change observed for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeOp {
    /// Path was created.
    Create,

    /// File contents were written.
    Write,

    /// Path was removed.
    Remove,

    /// Path was renamed (either side of the rename).
    Rename,
}

impl ChangeOp {
    /// Classify a raw notification kind.
    ///
    /// Returns `None` for notifications that do not change content or
    /// structure (access, metadata-only, unknown).
    pub fn classify(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(Self::Create),
            EventKind::Modify(ModifyKind::Name(_)) => Some(Self::Rename),
            EventKind::Modify(ModifyKind::Metadata(_)) => None,
            EventKind::Modify(_) => Some(Self::Write),
            EventKind::Remove(_) => Some(Self::Remove),
            EventKind::Access(_) | EventKind::Any | EventKind::Other => None,
        }
    }
}

impl fmt::Display for ChangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Create => "create",
            Self::Write => "write",
            Self::Remove => "remove",
            Self::Rename => "rename",
        };
        f.write_str(label)
    }
}

/// A debounced change, or a failure of the notification source.
#[derive(Debug)]
pub enum ChangeEvent {
    /// The latest classified change for one path.
    Changed { path: RelativePath, op: ChangeOp },

    /// The notification source reported an error. Carries no path.
    Failed(BlinkError),
}

impl ChangeEvent {
    /// Create a path change event.
    pub fn changed(path: RelativePath, op: ChangeOp) -> Self {
        Self::Changed { path, op }
    }

    /// Path of the change, if this is not an error event.
    pub fn path(&self) -> Option<&RelativePath> {
        match self {
            Self::Changed { path, .. } => Some(path),
            Self::Failed(_) => None,
        }
    }

    /// Operation of the change, if this is not an error event.
    pub fn op(&self) -> Option<ChangeOp> {
        match self {
            Self::Changed { op, .. } => Some(*op),
            Self::Failed(_) => None,
        }
    }

    /// The error carried by an error event.
    pub fn error(&self) -> Option<&BlinkError> {
        match self {
            Self::Failed(err) => Some(err),
            Self::Changed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind, RemoveKind, RenameMode};

    #[test]
    fn test_classify_recognized_kinds() {
        assert_eq!(
            ChangeOp::classify(&EventKind::Create(CreateKind::File)),
            Some(ChangeOp::Create)
        );
        assert_eq!(
            ChangeOp::classify(&EventKind::Modify(ModifyKind::Data(DataChange::Content))),
            Some(ChangeOp::Write)
        );
        assert_eq!(
            ChangeOp::classify(&EventKind::Modify(ModifyKind::Any)),
            Some(ChangeOp::Write)
        );
        assert_eq!(
            ChangeOp::classify(&EventKind::Remove(RemoveKind::Folder)),
            Some(ChangeOp::Remove)
        );
        assert_eq!(
            ChangeOp::classify(&EventKind::Modify(ModifyKind::Name(RenameMode::From))),
            Some(ChangeOp::Rename)
        );
        assert_eq!(
            ChangeOp::classify(&EventKind::Modify(ModifyKind::Name(RenameMode::To))),
            Some(ChangeOp::Rename)
        );
    }

    #[test]
    fn test_classify_discards_noise() {
        assert_eq!(
            ChangeOp::classify(&EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions))),
            None
        );
        assert_eq!(ChangeOp::classify(&EventKind::Access(AccessKind::Any)), None);
        assert_eq!(ChangeOp::classify(&EventKind::Any), None);
        assert_eq!(ChangeOp::classify(&EventKind::Other), None);
    }

    #[test]
    fn test_error_event_has_no_path() {
        let event = ChangeEvent::Failed(BlinkError::QueueClosed);
        assert!(event.path().is_none());
        assert!(event.op().is_none());
        assert!(event.error().is_some());

        let path = RelativePath::new("main.lua").unwrap();
        let event = ChangeEvent::changed(path.clone(), ChangeOp::Write);
        assert_eq!(event.path(), Some(&path));
        assert_eq!(event.op(), Some(ChangeOp::Write));
        assert!(event.error().is_none());
    }
}
