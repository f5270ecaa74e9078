pub mod field;
pub mod guard;
pub mod scope;
pub mod selection;
pub mod session;
pub mod settings;
pub mod store;
pub mod undo;

pub use field::Field;
pub use selection::SelectionState;
pub use session::Session;
pub use settings::{EditingSettings, EditorSettings, HistorySettings};
pub use store::{ElementStore, StoreEvent, SubscriptionId, Transaction};
pub use undo::{Command, UndoManager, Undoable};
