use crate::{config::RunConfig, error::Result, interfaces::ConfigStore};

/// In-memory configuration store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub configurations: Vec<RunConfig>,
    pub clear_previous_output: bool,
}

impl MemoryStore {
    pub fn new(configurations: Vec<RunConfig>) -> Self {
        Self {
            configurations,
            clear_previous_output: false,
        }
    }

    /// Drop every configuration with the given name, as an out-of-band edit would
    pub fn remove(&mut self, name: &str) {
        self.configurations.retain(|config| config.name != name);
    }
}

impl ConfigStore for MemoryStore {
    fn configurations(&self) -> Vec<RunConfig> {
        self.configurations.clone()
    }

    fn append(&mut self, config: RunConfig) -> Result<()> {
        self.configurations.push(config);
        Ok(())
    }

    fn clear_previous_output(&self) -> bool {
        self.clear_previous_output
    }
}
