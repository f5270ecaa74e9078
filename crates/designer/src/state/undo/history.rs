//! Linear undo/redo history.
//!
//! ```text
//! push(c3)            done: [c1, c2, c3]   undone: []
//! undo() x2           done: [c1]           undone: [c3, c2]
//! push(c4)            done: [c1, c4]       undone: []      <- branch dropped
//! ```

use std::collections::VecDeque;
use std::fmt;

use super::command::{Command, Undoable};
use crate::state::store::ElementStore;

/// Default number of commands kept for undo
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Two-stack undo/redo history
pub struct UndoManager<C = Command> {
    /// Commands available for undo (newest at back)
    done: VecDeque<C>,
    /// Commands available for redo (newest at back)
    undone: Vec<C>,
    max_depth: usize,
}

impl<C> fmt::Debug for UndoManager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoManager")
            .field("done", &self.done.len())
            .field("undone", &self.undone.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl<C> Default for UndoManager<C> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl<C> UndoManager<C> {
    /// Create an empty history keeping at most `max_depth` undo entries
    pub fn new(max_depth: usize) -> Self {
        Self {
            done: VecDeque::new(),
            undone: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record a command that has already been applied.
    ///
    /// Drops the redo branch and evicts the oldest entry past `max_depth`.
    pub fn push(&mut self, cmd: C) {
        self.done.push_back(cmd);
        self.undone.clear();
        while self.done.len() > self.max_depth {
            self.done.pop_front();
        }
    }

    pub fn has_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn has_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Drop both stacks (a new document replaced the store)
    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
    }

    pub fn undo_depth(&self) -> usize {
        self.done.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.undone.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Change the depth limit, evicting the oldest entries if needed
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth.max(1);
        while self.done.len() > self.max_depth {
            self.done.pop_front();
        }
    }

    /// The command the next `undo()` would revert
    pub fn peek_undo(&self) -> Option<&C> {
        self.done.back()
    }

    /// The command the next `redo()` would re-apply
    pub fn peek_redo(&self) -> Option<&C> {
        self.undone.last()
    }
}

impl<C: Undoable> UndoManager<C> {
    /// Revert the newest command. Returns false when there is nothing to undo.
    pub fn undo(&mut self, store: &mut ElementStore) -> bool {
        let Some(cmd) = self.done.pop_back() else {
            return false;
        };
        cmd.undo(store);
        tracing::debug!("undo: {}", cmd.description());
        self.undone.push(cmd);
        true
    }

    /// Re-apply the newest undone command. Returns false when there is
    /// nothing to redo.
    pub fn redo(&mut self, store: &mut ElementStore) -> bool {
        let Some(cmd) = self.undone.pop() else {
            return false;
        };
        cmd.redo(store);
        tracing::debug!("redo: {}", cmd.description());
        self.done.push_back(cmd);
        true
    }

    /// Descriptions of undoable commands, newest first
    pub fn undo_descriptions(&self, limit: usize) -> Vec<String> {
        self.done.iter().rev().take(limit).map(|c| c.description()).collect()
    }

    /// Descriptions of redoable commands, newest first
    pub fn redo_descriptions(&self, limit: usize) -> Vec<String> {
        self.undone.iter().rev().take(limit).map(|c| c.description()).collect()
    }
}
