//! Python interpreter lookup

use std::path::Path;

/// Why an interpreter lookup produced nothing
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("interpreter lookup is not ready yet")]
    NotInitialized,

    #[error("no python interpreter found")]
    NotFound,

    #[error("interpreter lookup failed: {0}")]
    Failed(String),
}

/// Finds the python interpreter to use for a workspace
pub trait InterpreterLookup {
    /// Best-effort interpreter path for `scope` (usually a workspace folder)
    fn interpreter_path(&self, scope: Option<&Path>) -> Result<String, LookupError>;
}
