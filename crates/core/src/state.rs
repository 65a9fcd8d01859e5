//! The active configuration

use crate::{
    config::RunConfig,
    error::Result,
    interfaces::ConfigStore,
};
use tracing::{debug, info, warn};

/// Which configuration Run and Debug act on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActiveConfiguration {
    /// Whatever file is active in the editor
    #[default]
    CurrentFile,
    /// A configuration from the store
    Named(RunConfig),
}

impl ActiveConfiguration {
    /// Make `config` active. The caller has already found it in the store.
    pub fn select(&mut self, config: RunConfig) {
        let next = if config.is_current_file_sentinel() {
            Self::CurrentFile
        } else {
            Self::Named(config)
        };
        if *self != next {
            debug!("Active configuration: {}", next.name());
        }
        *self = next;
    }

    /// Append `config` to the store, then make it active
    pub fn add(&mut self, store: &mut dyn ConfigStore, config: RunConfig) -> Result<()> {
        if store
            .configurations()
            .iter()
            .any(|existing| existing.name == config.name)
        {
            warn!(
                "A configuration named '{}' already exists; the first one wins on lookups",
                config.name
            );
        }
        store.append(config.clone())?;
        info!("Added configuration '{}'", config.name);
        self.select(config);
        Ok(())
    }

    /// Follow the store after an out-of-band change. The active configuration
    /// picks up edits to its stored entry (first match by name), or falls back
    /// to the current file if the entry was removed. Returns whether it fell
    /// back.
    pub fn on_store_changed(&mut self, snapshot: &[RunConfig]) -> bool {
        let Self::Named(active) = self else {
            return false;
        };
        if let Some(stored) = snapshot.iter().find(|config| config.name == active.name) {
            if *stored != *active {
                debug!("Configuration '{}' changed in the store", active.name);
                *active = stored.clone();
            }
            return false;
        }

        info!(
            "Configuration '{}' no longer exists, switching to {}",
            active.name,
            crate::config::CURRENT_FILE_NAME
        );
        *self = Self::CurrentFile;
        true
    }

    /// The configuration to dispatch with
    pub fn snapshot(&self) -> RunConfig {
        match self {
            Self::CurrentFile => RunConfig::current_file(),
            Self::Named(config) => config.clone(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::CurrentFile => crate::config::CURRENT_FILE_NAME,
            Self::Named(config) => &config.name,
        }
    }

    pub fn is_current_file(&self) -> bool {
        matches!(self, Self::CurrentFile)
    }

    /// Status text shown next to the run button
    pub fn label(&self) -> String {
        format!("▶ {}", self.name())
    }
}
