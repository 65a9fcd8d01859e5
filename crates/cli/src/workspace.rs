//! Settings, remembered selection and context construction for one workspace

use anyhow::{Context, Result};
use quickrun_core::{
    JsonSettingsStore, RunContext,
    interfaces::{ConfigStore, TerminalHost},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::host::{JsonDebugger, PythonLookup};

/// File next to the settings file that remembers the active configuration
pub const STATE_FILE_NAME: &str = ".quickrun-state.json";

/// What is remembered between invocations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
}

/// A workspace folder and the settings file that governs it
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    settings_path: PathBuf,
}

impl Workspace {
    /// Locate the settings for `dir` (default: the current directory)
    pub fn open(dir: Option<&Path>) -> Result<Self> {
        let start = match dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        let start = start
            .canonicalize()
            .with_context(|| format!("Failed to resolve workspace: {}", start.display()))?;

        let settings_path = JsonSettingsStore::find_settings_file(&start)
            .unwrap_or_else(|| start.join(quickrun_core::config::SETTINGS_FILE_NAMES[0]));
        let root = settings_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(start);
        debug!(
            "Workspace root: {} (settings: {})",
            root.display(),
            settings_path.display()
        );

        Ok(Self {
            root,
            settings_path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn folders(&self) -> Vec<PathBuf> {
        vec![self.root.clone()]
    }

    pub fn store(&self) -> Result<JsonSettingsStore> {
        JsonSettingsStore::open(&self.settings_path)
            .with_context(|| format!("Failed to load {}", self.settings_path.display()))
    }

    /// Build a run context with the remembered selection restored
    pub fn context(&self, terminals: Box<dyn TerminalHost>) -> Result<RunContext<JsonSettingsStore>> {
        let store = self.store()?;
        let overrides = store.executor_map();
        let mut context = RunContext::new(store, terminals, Box::new(JsonDebugger))
            .with_overrides(Box::new(overrides))
            .with_interpreter_lookup(Box::new(PythonLookup));

        let state = self.load_state().unwrap_or_else(|e| {
            warn!("Ignoring remembered selection: {:#}", e);
            SelectionState::default()
        });
        if let Some(name) = state.active {
            if context.select_by_name(&name).is_none() {
                info!("Configuration '{}' no longer exists, using Current File", name);
            }
        }

        Ok(context)
    }

    /// Re-read the settings after an out-of-band edit. Returns whether the
    /// active configuration had to be reset.
    pub fn refresh(&self, context: &mut RunContext<JsonSettingsStore>) -> Result<bool> {
        context
            .store_mut()
            .reload()
            .with_context(|| format!("Failed to reload {}", self.settings_path.display()))?;
        let overrides = context.store().executor_map();
        context.set_overrides(Box::new(overrides));
        Ok(context.on_store_changed())
    }

    fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILE_NAME)
    }

    pub fn load_state(&self) -> Result<SelectionState> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(SelectionState::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Remember the context's active configuration for the next invocation
    pub fn remember(&self, context: &RunContext<JsonSettingsStore>) -> Result<()> {
        let active = context.active();
        let state = SelectionState {
            active: (!active.is_current_file()).then(|| active.name().to_string()),
        };
        if self.load_state().ok().as_ref() == Some(&state) {
            return Ok(());
        }

        let path = self.state_path();
        let contents = serde_json::to_string_pretty(&state)?;
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))
    }
}
