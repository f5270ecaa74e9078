//! Document open/save and autosave

use std::path::{Path, PathBuf};

use shared::DesignDocument;

use super::Session;
use crate::error::Result;

impl Session {
    /// Replace the open document. Selection and history belong to the old
    /// document and are dropped.
    pub fn open_document(&mut self, document: DesignDocument) {
        tracing::info!("Opened document ({} elements)", document.elements.len());
        self.store.replace_all(document.elements);
        self.selection.clear();
        self.history.clear();
    }

    /// Snapshot of the current document (element values only)
    pub fn document(&self) -> DesignDocument {
        DesignDocument::new(self.store.elements().to_vec())
    }

    /// Open a document from a JSON string
    pub fn load_document_json(&mut self, json: &str) -> Result<()> {
        let document: DesignDocument = serde_json::from_str(json)?;
        self.open_document(document);
        Ok(())
    }

    /// Export the current document as JSON
    pub fn export_document_json(&self) -> String {
        serde_json::to_string_pretty(&self.document()).unwrap_or_default()
    }

    /// Open a document file
    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        let json = std::fs::read_to_string(path)?;
        self.load_document_json(&json)
    }

    /// Save the current document to a file
    pub fn save_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.export_document_json())?;
        tracing::info!("Saved document to {}", path.display());
        Ok(())
    }

    /// Default autosave file in the platform data dir
    pub fn autosave_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "solar-designer", "solar-designer")
            .map(|dirs| dirs.data_dir().join("autosave.json"))
    }

    /// Save the document to the default autosave file
    pub fn autosave(&self) {
        match Self::autosave_path() {
            Some(path) => self.autosave_to(&path),
            None => tracing::warn!("Autosave skipped: no platform data dir"),
        }
    }

    /// Save the document to `path`; failures are logged, never returned
    pub fn autosave_to(&self, path: &Path) {
        if let Err(e) = self.save_file(path) {
            tracing::warn!("Autosave to {} failed: {e}", path.display());
        }
    }

    /// Document from the default autosave file, if there is a readable one
    pub fn load_autosave() -> Option<DesignDocument> {
        Self::load_autosave_from(&Self::autosave_path()?)
    }

    pub fn load_autosave_from(path: &Path) -> Option<DesignDocument> {
        let json = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&json) {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::warn!("Ignoring invalid autosave {}: {e}", path.display());
                None
            }
        }
    }
}
