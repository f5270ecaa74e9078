use std::collections::HashSet;

use shared::ElementId;

/// Element selection state (supports multi-select)
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    /// Selected element IDs (in order of selection)
    selected: Vec<ElementId>,
}

impl SelectionState {
    /// Primary (first) selected element
    pub fn primary(&self) -> Option<&ElementId> {
        self.selected.first()
    }

    /// All selected elements
    pub fn all(&self) -> &[ElementId] {
        &self.selected
    }

    /// Selected IDs as a set, the shape scope resolution works with
    pub fn id_set(&self) -> HashSet<ElementId> {
        self.selected.iter().cloned().collect()
    }

    /// Check if an element is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Select a single element (clears previous selection)
    pub fn select(&mut self, id: ElementId) {
        self.selected.clear();
        self.selected.push(id);
    }

    /// Toggle selection (Ctrl+click behavior)
    pub fn toggle(&mut self, id: ElementId) {
        if let Some(pos) = self.selected.iter().position(|s| s == &id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id);
        }
    }

    /// Drop IDs for which `exists` is false (after delete or document load)
    pub fn retain(&mut self, mut exists: impl FnMut(&str) -> bool) {
        self.selected.retain(|id| exists(id));
    }

    /// Clear all selection
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Number of selected elements
    pub fn count(&self) -> usize {
        self.selected.len()
    }
}
