use std::io;

/// Errors that can occur while resolving or dispatching a run configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No file is open: open a file or select a configuration with a program")]
    NoFileOpen,

    #[error("No executor configured for {}", describe_extension(.extension))]
    NoExecutor { extension: String },

    #[error(
        "Debugging {} files is not supported automatically; configure the debugger manually",
        describe_extension(.extension)
    )]
    UnsupportedDebugTarget { extension: String },

    #[error("Configuration '{name}' has no program to run")]
    MissingProgram { name: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

fn describe_extension(extension: &str) -> String {
    if extension.is_empty() {
        "files without an extension".to_string()
    } else {
        format!("'{extension}'")
    }
}

/// Result type alias for quickrun operations
pub type Result<T> = std::result::Result<T, Error>;
