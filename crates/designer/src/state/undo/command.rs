//! Undoable commands.
//!
//! A [`Command`] is built once, right before its first application, from
//! values copied out of the store. It never holds references into the store
//! and its payload is never mutated afterwards, so replaying it later cannot
//! observe edits made in between.
//!
//! # Invariants
//!
//! - `undo()` followed by `redo()` restores every captured element to its
//!   post-application value.
//! - Group commands replay onto the captured id set; scope is never
//!   re-resolved.
//! - Writes to elements that were deleted or locked in the meantime are
//!   skipped silently.

use shared::{ActionScope, Element, ElementId, FieldValue};

use crate::state::field::Field;
use crate::state::store::ElementStore;

/// The capability the history needs from a command
pub trait Undoable {
    /// Revert the command's effect
    fn undo(&self, store: &mut ElementStore);

    /// Re-apply the command's effect after an undo
    fn redo(&self, store: &mut ElementStore);

    /// Human-readable description for menus and logs
    fn description(&self) -> String;
}

/// One field of one element changed
#[derive(Debug, Clone, PartialEq)]
pub struct SingleFieldChange {
    changed_element_id: ElementId,
    field: Field,
    old_value: FieldValue,
    new_value: FieldValue,
}

impl SingleFieldChange {
    pub fn changed_element_id(&self) -> &str {
        &self.changed_element_id
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn old_value(&self) -> &FieldValue {
        &self.old_value
    }

    pub fn new_value(&self) -> &FieldValue {
        &self.new_value
    }
}

/// One field changed to the same value across a resolved group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFieldChange {
    scope: ActionScope,
    field: Field,
    old_values: Vec<(ElementId, FieldValue)>,
    new_value: FieldValue,
}

impl GroupFieldChange {
    pub fn scope(&self) -> ActionScope {
        self.scope
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// Captured `(id, old value)` pairs in resolution order
    pub fn old_values(&self) -> &[(ElementId, FieldValue)] {
        &self.old_values
    }

    /// Captured old value of one element
    pub fn old_value_of(&self, id: &str) -> Option<&FieldValue> {
        self.old_values
            .iter()
            .find(|(captured, _)| captured == id)
            .map(|(_, value)| value)
    }

    pub fn new_value(&self) -> &FieldValue {
        &self.new_value
    }
}

/// An element was added
#[derive(Debug, Clone, PartialEq)]
pub struct AddElement {
    index: usize,
    element: Element,
}

impl AddElement {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

/// Elements were removed; `(index, element)` pairs in ascending index order
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteElements {
    removed: Vec<(usize, Element)>,
}

impl DeleteElements {
    pub fn removed(&self) -> &[(usize, Element)] {
        &self.removed
    }
}

/// A boolean field was switched on or off
#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxToggle {
    element_id: ElementId,
    field: Field,
    checked: bool,
}

impl CheckboxToggle {
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn checked(&self) -> bool {
        self.checked
    }
}

/// Every undoable edit the designer records
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SingleFieldChange(SingleFieldChange),
    GroupFieldChange(GroupFieldChange),
    AddElement(AddElement),
    DeleteElements(DeleteElements),
    CheckboxToggle(CheckboxToggle),
}

impl Command {
    /// Single-element field change
    pub fn single_field_change(
        changed_element_id: impl Into<ElementId>,
        field: Field,
        old_value: FieldValue,
        new_value: FieldValue,
    ) -> Self {
        Command::SingleFieldChange(SingleFieldChange {
            changed_element_id: changed_element_id.into(),
            field,
            old_value,
            new_value,
        })
    }

    /// Group field change; `old_values` must be captured before mutation
    pub fn group_field_change(
        scope: ActionScope,
        field: Field,
        old_values: Vec<(ElementId, FieldValue)>,
        new_value: FieldValue,
    ) -> Self {
        Command::GroupFieldChange(GroupFieldChange {
            scope,
            field,
            old_values,
            new_value,
        })
    }

    /// Pick the single or group shape for `scope`.
    ///
    /// Returns `None` for a single-object scope whose pivot is missing from
    /// `old_values`.
    pub fn field_change(
        scope: ActionScope,
        pivot_id: &str,
        field: Field,
        old_values: Vec<(ElementId, FieldValue)>,
        new_value: FieldValue,
    ) -> Option<Self> {
        if scope.is_group() {
            return Some(Self::group_field_change(scope, field, old_values, new_value));
        }
        let (id, old_value) = old_values.into_iter().find(|(id, _)| id == pivot_id)?;
        Some(Self::single_field_change(id, field, old_value, new_value))
    }

    pub fn add_element(index: usize, element: Element) -> Self {
        Command::AddElement(AddElement { index, element })
    }

    pub fn delete_elements(mut removed: Vec<(usize, Element)>) -> Self {
        removed.sort_by_key(|(index, _)| *index);
        Command::DeleteElements(DeleteElements { removed })
    }

    pub fn checkbox_toggle(element_id: impl Into<ElementId>, field: Field, checked: bool) -> Self {
        Command::CheckboxToggle(CheckboxToggle {
            element_id: element_id.into(),
            field,
            checked,
        })
    }

    /// IDs of all elements the command touches
    pub fn affected_ids(&self) -> Vec<&str> {
        match self {
            Command::SingleFieldChange(c) => vec![c.changed_element_id.as_str()],
            Command::GroupFieldChange(c) => c.old_values.iter().map(|(id, _)| id.as_str()).collect(),
            Command::AddElement(c) => vec![c.element.id.as_str()],
            Command::DeleteElements(c) => c.removed.iter().map(|(_, e)| e.id.as_str()).collect(),
            Command::CheckboxToggle(c) => vec![c.element_id.as_str()],
        }
    }
}

impl Undoable for Command {
    fn undo(&self, store: &mut ElementStore) {
        match self {
            Command::SingleFieldChange(c) => {
                store.transaction(|tx| tx.write(&c.changed_element_id, c.field, &c.old_value));
            }
            Command::GroupFieldChange(c) => store.transaction(|tx| {
                for (id, old_value) in &c.old_values {
                    tx.write(id, c.field, old_value);
                }
            }),
            Command::AddElement(c) => {
                store.transaction(|tx| tx.remove(&c.element.id));
            }
            Command::DeleteElements(c) => store.transaction(|tx| {
                for (index, element) in &c.removed {
                    tx.insert(*index, element.clone());
                }
            }),
            Command::CheckboxToggle(c) => {
                let value = FieldValue::Flag(!c.checked);
                store.transaction(|tx| tx.write(&c.element_id, c.field, &value));
            }
        }
    }

    fn redo(&self, store: &mut ElementStore) {
        match self {
            Command::SingleFieldChange(c) => {
                store.transaction(|tx| tx.write(&c.changed_element_id, c.field, &c.new_value));
            }
            Command::GroupFieldChange(c) => store.transaction(|tx| {
                for (id, _) in &c.old_values {
                    tx.write(id, c.field, &c.new_value);
                }
            }),
            Command::AddElement(c) => {
                store.transaction(|tx| tx.insert(c.index, c.element.clone()));
            }
            Command::DeleteElements(c) => store.transaction(|tx| {
                for (_, element) in c.removed.iter().rev() {
                    tx.remove(&element.id);
                }
            }),
            Command::CheckboxToggle(c) => {
                let value = FieldValue::Flag(c.checked);
                store.transaction(|tx| tx.write(&c.element_id, c.field, &value));
            }
        }
    }

    fn description(&self) -> String {
        match self {
            Command::SingleFieldChange(c) => format!("Set {}", c.field.label()),
            Command::GroupFieldChange(c) => {
                format!("Set {} ({} elements)", c.field.label(), c.old_values.len())
            }
            Command::AddElement(c) => format!("Add {}", c.element.kind.display_name()),
            Command::DeleteElements(c) => match c.removed.as_slice() {
                [(_, only)] => format!("Delete {}", only.kind.display_name()),
                removed => format!("Delete {} elements", removed.len()),
            },
            Command::CheckboxToggle(c) => {
                let verb = if c.checked { "Enable" } else { "Disable" };
                format!("{verb} {}", c.field.label())
            }
        }
    }
}
