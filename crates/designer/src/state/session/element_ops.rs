//! Element add/delete operations

use shared::{Element, ElementId};

use super::Session;
use crate::state::undo::Command;

impl Session {
    /// Append an element to the document and return its ID.
    ///
    /// An empty or already used ID is replaced with a fresh one.
    pub fn add_element(&mut self, mut element: Element) -> ElementId {
        if element.id.is_empty() || self.store.contains(&element.id) {
            element.id = uuid::Uuid::new_v4().to_string();
        }
        let id = element.id.clone();
        let index = self.store.len();

        let cmd = Command::add_element(index, element.clone());
        self.store.transaction(|tx| tx.insert(index, element));
        self.history.push(cmd);
        id
    }

    /// Delete an element together with everything parented to it.
    ///
    /// Only the element itself is checked for a lock: locked descendants of
    /// an unlocked element go with it, and undo restores them still locked.
    ///
    /// Returns the removed IDs in document order; empty if the element is
    /// missing or locked.
    pub fn delete_element(&mut self, id: &str) -> Vec<ElementId> {
        let Some(element) = self.store.get(id) else {
            return Vec::new();
        };
        if element.locked {
            tracing::debug!("Delete: element {id} is locked");
            return Vec::new();
        }

        let ids = self.store.subtree_ids(id);
        // highest index first so every captured index is the original one
        let removed: Vec<_> = self.store.transaction(|tx| {
            ids.iter().rev().filter_map(|id| tx.remove(id)).collect()
        });
        self.selection.retain(|selected| !ids.iter().any(|id| id == selected));
        self.history.push(Command::delete_elements(removed));
        ids
    }
}
