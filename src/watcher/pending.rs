//! Changes buffered during a debounce window

use crate::types::{ChangeEvent, ChangeOp, RelativePath};
use std::collections::HashMap;

/// Latest operation per path; a later change to a path replaces the earlier one
#[derive(Debug, Default)]
pub struct PendingBatch {
    entries: HashMap<RelativePath, ChangeOp>,
}

impl PendingBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `op` as the latest change for `path`
    pub fn record(&mut self, path: RelativePath, op: ChangeOp) {
        self.entries.insert(path, op);
    }

    /// Take every buffered change, leaving the batch empty
    pub fn drain(&mut self) -> Vec<ChangeEvent> {
        self.entries
            .drain()
            .map(|(path, op)| ChangeEvent::changed(path, op))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> RelativePath {
        RelativePath::new(p).unwrap()
    }

    #[test]
    fn test_last_write_wins_per_path() {
        let mut batch = PendingBatch::new();
        batch.record(path("main.lua"), ChangeOp::Create);
        batch.record(path("main.lua"), ChangeOp::Write);
        batch.record(path("main.lua"), ChangeOp::Remove);
        batch.record(path("libs/a.lua"), ChangeOp::Write);
        assert_eq!(batch.len(), 2);

        let mut events: Vec<(String, ChangeOp)> = batch
            .drain()
            .into_iter()
            .filter_map(|e| Some((e.path()?.to_string(), e.op()?)))
            .collect();
        events.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(
            events,
            vec![
                ("libs/a.lua".to_string(), ChangeOp::Write),
                ("main.lua".to_string(), ChangeOp::Remove),
            ]
        );
    }

    #[test]
    fn test_drain_clears_batch() {
        let mut batch = PendingBatch::new();
        batch.record(path("a.lua"), ChangeOp::Write);
        assert_eq!(batch.drain().len(), 1);
        assert!(batch.is_empty());
        assert!(batch.drain().is_empty());
    }
}
