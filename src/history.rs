//! Undo/redo history of full pixel snapshots.
//!
//! The last entry of the undo sequence is always the current canvas state, so
//! undo needs at least two entries: it moves the current state onto the redo
//! stack and exposes the one before it. Any new commit empties the redo stack.
//!
//! Each snapshot holds a full RGBA buffer, so the undo sequence is bounded by
//! `capacity`. Committing past the bound evicts the oldest entry. Once the
//! initial blank state has been evicted it can no longer be reached by undo.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::raster::PixelBuffer;
use crate::stroke::BrushConfig;

/// Canvas pixels captured at one point in time, with the brush active then.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub pixels: PixelBuffer,
    pub brush: BrushConfig,
}

/// Bounded undo/redo stacks.
#[derive(Debug)]
pub struct HistoryStack {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    capacity: usize,
}

impl HistoryStack {
    /// Start a history whose only entry is `initial`. Capacity is at least 2.
    #[must_use]
    pub fn new(initial: Snapshot, capacity: usize) -> Self {
        let mut undo = VecDeque::new();
        undo.push_back(initial);
        Self { undo, redo: Vec::new(), capacity: capacity.max(2) }
    }

    /// Push a new current state and drop any redo entries.
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.undo.push_back(snapshot);
        self.redo.clear();
        while self.undo.len() > self.capacity {
            self.undo.pop_front();
        }
        tracing::debug!(undo = self.undo.len(), "history commit");
    }

    /// Step back one entry. Returns the snapshot to restore, or `None` if
    /// there is nothing earlier than the current state.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.undo.len() < 2 {
            return None;
        }
        let current = self.undo.pop_back()?;
        self.redo.push(current);
        tracing::debug!(undo = self.undo.len(), redo = self.redo.len(), "history undo");
        self.current()
    }

    /// Re-apply the most recently undone entry. Returns it, or `None` if the
    /// redo stack is empty.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.redo.pop()?;
        self.undo.push_back(next);
        tracing::debug!(undo = self.undo.len(), redo = self.redo.len(), "history redo");
        self.current()
    }

    /// The current (most recent) state.
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot> {
        self.undo.back()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo.len() >= 2
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
