use anyhow::{Context, Result};
use quickrun_core::interfaces::EditorContext;
use std::path::{Path, PathBuf};

/// Editor state taken from the command line: the file argument is the
/// "active document"
#[derive(Debug, Clone, Default)]
pub struct CliEditor {
    active: Option<PathBuf>,
    folders: Vec<PathBuf>,
}

impl CliEditor {
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self {
            active: None,
            folders,
        }
    }

    /// Make `file` the active document, resolved against the current directory
    pub fn open(&mut self, file: &str) -> Result<()> {
        let path = std::path::absolute(file)
            .with_context(|| format!("Failed to resolve path: {}", file))?;
        self.active = Some(path);
        Ok(())
    }

    pub fn with_file(mut self, file: Option<&str>) -> Result<Self> {
        if let Some(file) = file {
            self.open(file)?;
        }
        Ok(self)
    }

    pub fn active(&self) -> Option<&Path> {
        self.active.as_deref()
    }
}

impl EditorContext for CliEditor {
    fn active_document(&self) -> Option<PathBuf> {
        self.active.clone()
    }

    fn workspace_folders(&self) -> Vec<PathBuf> {
        self.folders.clone()
    }

    /// Innermost workspace folder containing `document`
    fn folder_for(&self, document: &Path) -> Option<PathBuf> {
        self.folders
            .iter()
            .filter(|folder| document.starts_with(folder))
            .max_by_key(|folder| folder.components().count())
            .cloned()
    }
}
