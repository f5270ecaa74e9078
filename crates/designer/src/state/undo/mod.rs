//! Undo/redo: commands and the history that replays them.

pub mod command;
pub mod history;

pub use command::{
    AddElement, CheckboxToggle, Command, DeleteElements, GroupFieldChange, SingleFieldChange,
    Undoable,
};
pub use history::{UndoManager, DEFAULT_MAX_DEPTH};
