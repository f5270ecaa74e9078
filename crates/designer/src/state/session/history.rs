//! Undo/redo functionality

use super::Session;

impl Session {
    /// Undo last change; false if there was nothing to undo
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.store)
    }

    /// Redo last undone change; false if there was nothing to redo
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.store)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.has_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.has_redo()
    }
}
