//! Element store
//!
//! The single mutable collection of elements for one open document, plus the
//! apply counter that dependent caches watch. All writes go through
//! [`ElementStore::transaction`]; listeners hear about a transaction only after
//! it has been committed, never halfway through a batch.

use std::fmt;

use shared::{Element, ElementId, FieldValue};

use super::field::Field;

/// Handle returned by [`ElementStore::subscribe`]
pub type SubscriptionId = u64;

/// Notification sent to listeners after a committed transaction
#[derive(Debug, Clone, PartialEq)]
pub struct StoreEvent {
    /// Apply counter value after the commit
    pub generation: u64,
    /// Elements written, inserted or removed, in first-touched order
    pub changed: Vec<ElementId>,
}

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Mutable collection of elements with a monotonic apply counter
#[derive(Default)]
pub struct ElementStore {
    elements: Vec<Element>,
    apply_count: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl fmt::Debug for ElementStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementStore")
            .field("elements", &self.elements.len())
            .field("apply_count", &self.apply_count)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ElementStore {
    /// Create a store holding `elements`
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            ..Self::default()
        }
    }

    /// All elements in document order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Get an element by ID
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Position of an element in document order
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Current apply counter (increments once per committed transaction)
    pub fn apply_count(&self) -> u64 {
        self.apply_count
    }

    /// IDs of `id` and every element that transitively has it as parent,
    /// in document order
    pub fn subtree_ids(&self, id: &str) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = Vec::new();
        if !self.contains(id) {
            return ids;
        }
        ids.push(id.to_string());
        let mut frontier = 0;
        while frontier < ids.len() {
            let parent = ids[frontier].clone();
            for child in self
                .elements
                .iter()
                .filter(|e| e.parent_id.as_deref() == Some(parent.as_str()))
            {
                if !ids.contains(&child.id) {
                    ids.push(child.id.clone());
                }
            }
            frontier += 1;
        }
        ids.sort_by_key(|id| self.index_of(id));
        ids
    }

    /// Run a batch of writes as one atomic step.
    ///
    /// The apply counter is bumped and listeners are notified once, after `f`
    /// returns, and only if something was actually changed.
    pub fn transaction<R>(&mut self, f: impl FnOnce(&mut Transaction<'_>) -> R) -> R {
        let mut tx = Transaction {
            elements: &mut self.elements,
            changed: Vec::new(),
        };
        let result = f(&mut tx);
        let changed = tx.changed;
        if !changed.is_empty() {
            self.commit(changed);
        }
        result
    }

    /// Replace the whole collection (document open)
    pub fn replace_all(&mut self, elements: Vec<Element>) {
        let changed = self
            .elements
            .iter()
            .chain(elements.iter())
            .map(|e| e.id.clone())
            .fold(Vec::new(), |mut acc, id| {
                if !acc.contains(&id) {
                    acc.push(id);
                }
                acc
            });
        self.elements = elements;
        self.commit(changed);
    }

    /// Register a listener for committed transactions
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = self.next_subscription;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, changed: Vec<ElementId>) {
        self.apply_count += 1;
        let event = StoreEvent {
            generation: self.apply_count,
            changed,
        };
        tracing::trace!(
            "store commit #{} ({} elements)",
            event.generation,
            event.changed.len()
        );
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}

/// Write access to the store for the duration of one
/// [`ElementStore::transaction`]
pub struct Transaction<'a> {
    elements: &'a mut Vec<Element>,
    changed: Vec<ElementId>,
}

impl Transaction<'_> {
    /// Get an element by ID as it is inside the transaction
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Write one field of one element.
    ///
    /// Missing and locked elements are skipped silently; the `Locked` field
    /// itself is always writable.
    pub fn write(&mut self, id: &str, field: Field, value: &FieldValue) -> bool {
        let Some(element) = self.elements.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if element.locked && field != Field::Locked {
            return false;
        }
        if !field.set(element, value) {
            return false;
        }
        self.mark(id);
        true
    }

    /// Insert an element at `index` (clamped); no-op if the ID already exists
    pub fn insert(&mut self, index: usize, element: Element) -> bool {
        if self.get(&element.id).is_some() {
            return false;
        }
        let index = index.min(self.elements.len());
        self.mark(&element.id);
        self.elements.insert(index, element);
        true
    }

    /// Remove an element, returning its former index and value
    pub fn remove(&mut self, id: &str) -> Option<(usize, Element)> {
        let index = self.elements.iter().position(|e| e.id == id)?;
        let element = self.elements.remove(index);
        self.mark(id);
        Some((index, element))
    }

    fn mark(&mut self, id: &str) {
        if !self.changed.iter().any(|c| c == id) {
            self.changed.push(id.to_string());
        }
    }
}
