//! Linear undo/redo history of whole step sequences.

use crate::models::Step;

/// Snapshots of the step sequence with a cursor at the live entry.
///
/// When non-empty, `entries[cursor]` always equals the live sequence.
/// Pushing after an undo drops the redo branch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<Vec<Step>>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole history with a single entry.
    pub fn reset(&mut self, steps: &[Step]) {
        self.entries = vec![steps.to_vec()];
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Records `steps` as the newest entry, discarding anything after the
    /// cursor.
    pub fn push(&mut self, steps: &[Step]) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(steps.to_vec());
        self.cursor = self.entries.len() - 1;
    }

    /// Moves the cursor back one entry and returns it.
    pub fn undo(&mut self) -> Option<&[Step]> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).map(Vec::as_slice)
    }

    /// Moves the cursor forward one entry and returns it.
    pub fn redo(&mut self) -> Option<&[Step]> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).map(Vec::as_slice)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Entry under the cursor.
    pub fn current(&self) -> Option<&[Step]> {
        self.entries.get(self.cursor).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
