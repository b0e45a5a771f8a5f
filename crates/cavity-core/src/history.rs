//! Linear undo/redo history over outline snapshots.

use kurbo::Line;
use serde::{Deserialize, Serialize};

/// A snapshot of the outline: every edge as an endpoint pair, in order.
pub type Snapshot = Vec<Line>;

/// Availability of undo and redo, for enabling UI controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryStatus {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Undo and redo stacks of snapshots.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Undo history stack.
    undo_stack: Vec<Snapshot>,
    /// Redo history stack.
    redo_stack: Vec<Snapshot>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `current` to the undo stack (call before making changes).
    pub fn save(&mut self, current: Snapshot) {
        self.undo_stack.push(current);

        // New changes invalidate anything that was undone.
        self.redo_stack.clear();
    }

    /// Step back. `current` moves to the redo stack and the previous
    /// snapshot is returned, or `None` when there is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }
}
