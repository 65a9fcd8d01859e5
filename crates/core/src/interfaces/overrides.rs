//! Executor override source

use std::collections::HashMap;

/// User-supplied executors keyed by file extension (with the leading dot)
pub trait ExecutorOverrides {
    fn lookup(&self, extension: &str) -> Option<String>;
}

/// Override source with no entries
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverrides;

impl ExecutorOverrides for NoOverrides {
    fn lookup(&self, _extension: &str) -> Option<String> {
        None
    }
}

impl ExecutorOverrides for HashMap<String, String> {
    fn lookup(&self, extension: &str) -> Option<String> {
        self.get(extension).cloned()
    }
}
