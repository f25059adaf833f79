//! Linear undo/redo over full snapshots of the item collection.

use crate::items::Item;

/// Snapshot history with a cursor.
///
/// `snapshots[0]` is the empty document the engine starts from, and
/// `0 <= index < snapshots.len()` always holds.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<Item>>,
    index: usize,
    /// Maximum number of snapshots kept (None = unbounded).
    capacity: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create a history holding only the empty baseline.
    pub fn new() -> Self {
        Self {
            snapshots: vec![Vec::new()],
            index: 0,
            capacity: None,
        }
    }

    /// Create a history that keeps at most `capacity` snapshots.
    pub fn with_capacity_limit(capacity: Option<usize>) -> Self {
        Self {
            capacity: capacity.map(|c| c.max(1)),
            ..Self::new()
        }
    }

    /// Record `items` as the newest snapshot.
    ///
    /// Any redo-able snapshots after the cursor are discarded first.
    pub fn commit(&mut self, items: &[Item]) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(items.to_vec());
        self.index = self.snapshots.len() - 1;

        if let Some(capacity) = self.capacity {
            let excess = self.snapshots.len().saturating_sub(capacity);
            if excess > 0 {
                self.snapshots.drain(..excess);
                self.index -= excess;
            }
        }
    }

    /// Step back one snapshot. Returns the snapshot to restore, if any.
    pub fn undo(&mut self) -> Option<&[Item]> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.snapshots[self.index])
    }

    /// Step forward one snapshot. Returns the snapshot to restore, if any.
    pub fn redo(&mut self) -> Option<&[Item]> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        Some(&self.snapshots[self.index])
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> &[Item] {
        &self.snapshots[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: the baseline snapshot is never removed.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Vec<Item>] {
        &self.snapshots
    }
}
