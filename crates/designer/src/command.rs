//! JSON command protocol.
//!
//! Drives a [`Session`] headlessly: the CLI runs scripts of these commands and
//! the integration tests use them to exercise the whole edit pipeline.

use serde::{Deserialize, Serialize};
use shared::{ActionScope, Element, FieldValue};

use crate::error::{EditorError, Result};
use crate::state::{Field, Session};

/// A command a script or external tool can execute
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Set one field on the elements resolved by `scope`
    SetField {
        field: Field,
        #[serde(default)]
        scope: ActionScope,
        id: String,
        value: FieldValue,
    },
    /// Color one face (or all side faces) of a cuboid
    SetFaceColor {
        #[serde(default)]
        scope: ActionScope,
        id: String,
        side: usize,
        color: String,
    },
    /// Lock or unlock an element
    SetLocked {
        id: String,
        locked: bool,
    },
    /// Show or hide an element's label
    SetShowLabel {
        id: String,
        show: bool,
    },
    /// Add an element
    AddElement {
        element: Element,
    },
    /// Delete an element and its children
    DeleteElement {
        id: String,
    },
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    /// Select elements by IDs.
    Select {
        ids: Vec<String>,
    },
    /// Clear selection.
    ClearSelection,
    /// Inspect the document: list all elements.
    Inspect,
    /// List undo/redo history.
    History,
    /// Export the document as JSON.
    ExportDocument,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the session.
pub fn execute_command(session: &mut Session, cmd: EditorCommand) -> CommandResponse {
    match cmd {
        EditorCommand::SetField {
            field,
            scope,
            id,
            value,
        } => {
            if session.get_element(&id).is_none() {
                return CommandResponse::err(format!("Element not found: {id}"));
            }
            let changed = session.set_field(field, scope, &id, value);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        EditorCommand::SetFaceColor {
            scope,
            id,
            side,
            color,
        } => {
            if session.get_element(&id).is_none() {
                return CommandResponse::err(format!("Element not found: {id}"));
            }
            let changed = session.set_face_color(scope, &id, side, &color);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        EditorCommand::SetLocked { id, locked } => {
            let changed = session.set_locked(&id, locked);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        EditorCommand::SetShowLabel { id, show } => {
            let changed = session.set_show_label(&id, show);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        EditorCommand::AddElement { element } => {
            let id = session.add_element(element);
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        EditorCommand::DeleteElement { id } => {
            let removed = session.delete_element(&id);
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        EditorCommand::Undo => {
            let success = session.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        EditorCommand::Redo => {
            let success = session.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        EditorCommand::Select { ids } => {
            session.selection.clear();
            for id in &ids {
                if !session.selection.is_selected(id) {
                    session.selection.toggle(id.clone());
                }
            }
            CommandResponse::ok_with_data(serde_json::json!({ "selected": ids }))
        }

        EditorCommand::ClearSelection => {
            session.selection.clear();
            CommandResponse::ok()
        }

        EditorCommand::Inspect => {
            let elements: Vec<serde_json::Value> = session
                .store
                .elements()
                .iter()
                .map(|element| {
                    serde_json::json!({
                        "id": element.id,
                        "type": element.kind,
                        "parent_id": element.parent_id,
                        "locked": element.locked,
                        "color": element.color,
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "element_count": elements.len(),
                "apply_count": session.apply_count(),
                "elements": elements,
            }))
        }

        EditorCommand::History => {
            let history = session.history();
            CommandResponse::ok_with_data(serde_json::json!({
                "undo": history.undo_descriptions(usize::MAX),
                "redo": history.redo_descriptions(usize::MAX),
            }))
        }

        EditorCommand::ExportDocument => {
            let json = session.export_document_json();
            CommandResponse::ok_with_data(serde_json::json!({ "document_json": json }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(session: &mut Session, json: &str) -> Result<CommandResponse> {
    let cmd: EditorCommand = serde_json::from_str(json).map_err(EditorError::InvalidCommand)?;
    Ok(execute_command(session, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(session: &mut Session, json: &str) -> Result<Vec<CommandResponse>> {
    let cmds: Vec<EditorCommand> =
        serde_json::from_str(json).map_err(EditorError::InvalidCommand)?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(session, cmd))
        .collect())
}
