//! Editing session
//!
//! One open document: the element store, selection, undo history and
//! settings. Dialogs talk to the session through one setter per field family.

mod element_ops;
mod history;
mod persistence;
mod property_ops;

use shared::{DesignDocument, Element};

use super::selection::SelectionState;
use super::settings::EditorSettings;
use super::store::{ElementStore, StoreEvent, SubscriptionId};
use super::undo::UndoManager;

/// Editing session with store, selection and undo/redo history
#[derive(Debug, Default)]
pub struct Session {
    /// Current document elements
    pub store: ElementStore,
    pub selection: SelectionState,
    /// Undo/redo history of applied commands
    pub(crate) history: UndoManager,
    pub settings: EditorSettings,
}

impl Session {
    /// Create an empty session
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            store: ElementStore::default(),
            selection: SelectionState::default(),
            history: UndoManager::new(settings.history.max_depth),
            settings,
        }
    }

    /// Create a session with `document` already open
    pub fn with_document(document: DesignDocument, settings: EditorSettings) -> Self {
        let mut session = Self::new(settings);
        session.store = ElementStore::new(document.elements);
        session
    }

    /// Get an element by ID
    pub fn get_element(&self, id: &str) -> Option<&Element> {
        self.store.get(id)
    }

    /// Number of elements in the document
    pub fn element_count(&self) -> usize {
        self.store.len()
    }

    /// Undo history (read-only)
    pub fn history(&self) -> &UndoManager {
        &self.history
    }

    /// Apply counter of the store (increments on every committed mutation)
    pub fn apply_count(&self) -> u64 {
        self.store.apply_count()
    }

    /// Register a listener for committed store transactions
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }
}
