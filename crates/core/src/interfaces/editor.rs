//! Editor and workspace context

use std::path::{Path, PathBuf};

/// Read-only view of the editor state a dispatch starts from
pub trait EditorContext {
    /// Path of the document in the active editor, if any
    fn active_document(&self) -> Option<PathBuf>;

    /// Known workspace folders, in order
    fn workspace_folders(&self) -> Vec<PathBuf>;

    /// Workspace folder that contains `document`
    fn folder_for(&self, document: &Path) -> Option<PathBuf>;
}
