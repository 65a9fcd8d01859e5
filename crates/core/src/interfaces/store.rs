//! Configuration store interface

use crate::{config::RunConfig, error::Result};

/// Externally owned, ordered list of run configurations
///
/// The engine only ever appends; entries may disappear out of band, which is
/// why callers re-validate the active configuration after a change.
pub trait ConfigStore {
    /// Current snapshot of stored configurations, in order
    fn configurations(&self) -> Vec<RunConfig>;

    /// Append a configuration and persist it
    fn append(&mut self, config: RunConfig) -> Result<()>;

    /// Whether the terminal should be cleared before each run
    fn clear_previous_output(&self) -> bool;

    /// Re-read the backing storage. Stores without one have nothing to do.
    fn reload(&mut self) -> Result<()> {
        Ok(())
    }
}
