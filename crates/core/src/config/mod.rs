//! Run configurations and the stores that hold them

mod memory;
mod settings;

pub use memory::MemoryStore;
pub use settings::{JsonSettingsStore, Settings, SETTINGS_FILE_NAMES};

use crate::{
    error::{Error, Result},
    impl_case_insensitive_deserialize,
};
use serde::{Deserialize, Serialize};

/// Name of the built-in configuration that runs whatever file is active
pub const CURRENT_FILE_NAME: &str = "Current File";

/// How a configuration picks its target file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigKind {
    /// The file active in the editor
    #[default]
    CurrentFile,
    /// The file named by the configuration's `program`
    NamedFile,
}

impl_case_insensitive_deserialize!(
    ConfigKind,
    CurrentFile => "currentfile",
    NamedFile => "namedfile"
);

/// A named description of how to run or debug one target file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ConfigKind,
    /// Path template, may contain `${workspaceFolder}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    /// Executor or command template; looked up by extension when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Passed through to the command line as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

impl RunConfig {
    /// The sentinel configuration for "whatever file is active in the editor"
    pub fn current_file() -> Self {
        Self {
            name: CURRENT_FILE_NAME.to_string(),
            kind: ConfigKind::CurrentFile,
            program: None,
            command: None,
            args: None,
            cwd: None,
        }
    }

    /// A configuration that always targets `program`
    pub fn named_file(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ConfigKind::NamedFile,
            program: Some(program.into()),
            command: None,
            args: None,
            cwd: None,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn with_args(mut self, args: impl Into<String>) -> Self {
        self.args = Some(args.into());
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Whether this is the never-persisted current-file sentinel
    pub fn is_current_file_sentinel(&self) -> bool {
        *self == Self::current_file()
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::ConfigError(
                "configuration name must not be empty".to_string(),
            ));
        }
        if self.kind == ConfigKind::NamedFile
            && self.program.as_deref().is_none_or(|p| p.trim().is_empty())
        {
            return Err(Error::ConfigError(format!(
                "configuration '{}' targets a named file but has no program",
                self.name
            )));
        }
        Ok(())
    }
}
