//! Executor lookup by file extension

use crate::interfaces::ExecutorOverrides;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{trace, warn};

/// Executors used when the override source has no entry
///
/// Literal executors are quoted as one word when they contain a space, so a
/// multi-word entry like `go run` synthesizes `"go run" main.go`. Override it
/// with a template such as `go run "$dir/$fileName"` to get a runnable line.
pub const DEFAULT_EXECUTORS: &[(&str, &str)] = &[
    (".py", "python"),
    (".js", "node"),
    (".ts", "ts-node"),
    (".go", "go run"),
    (".java", "java"),
    (".c", "gcc"),
    (".cpp", "g++"),
    (".sh", "bash"),
    (".rb", "ruby"),
    (".php", "php"),
    (".pl", "perl"),
    (".lua", "lua"),
];

/// Extension of `path` with its leading dot, or an empty string
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Resolves an executor for a file extension
pub struct ExecutorTable<'a> {
    overrides: &'a dyn ExecutorOverrides,
}

impl<'a> ExecutorTable<'a> {
    pub fn new(overrides: &'a dyn ExecutorOverrides) -> Self {
        Self { overrides }
    }

    /// Override source first, then the built-in defaults. `None` is an
    /// ordinary outcome for unknown extensions.
    pub fn resolve(&self, extension: &str) -> Option<String> {
        if let Some(executor) = self.overrides.lookup(extension) {
            trace!("Executor for '{}' from overrides: {}", extension, executor);
            return Some(executor);
        }

        DEFAULT_EXECUTORS
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, executor)| executor.to_string())
    }
}

/// Override source read from the settings file
///
/// Holds the raw JSON object so that entries with non-string values can be
/// ignored at lookup time instead of failing the whole settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExecutorMap(Map<String, Value>);

impl ExecutorMap {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for ExecutorMap {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<'de> Deserialize<'de> for ExecutorMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => {
                warn!("Ignoring executor map: expected an object, found {}", other);
                Ok(Self::default())
            }
        }
    }
}

impl ExecutorOverrides for ExecutorMap {
    fn lookup(&self, extension: &str) -> Option<String> {
        match self.0.get(extension)? {
            Value::String(executor) => Some(executor.clone()),
            other => {
                trace!("Ignoring non-string executor for '{}': {}", extension, other);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::NoOverrides;
    use serde_json::json;
    use std::collections::HashMap;

    fn executor_map(value: Value) -> ExecutorMap {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults() {
        let table = ExecutorTable::new(&NoOverrides);
        assert_eq!(table.resolve(".py").as_deref(), Some("python"));
        assert_eq!(table.resolve(".go").as_deref(), Some("go run"));
        assert_eq!(table.resolve(".cpp").as_deref(), Some("g++"));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = HashMap::from([
            (".py".to_string(), "python3 -u".to_string()),
            (".js".to_string(), "bun".to_string()),
        ]);
        let table = ExecutorTable::new(&overrides);

        for (ext, default) in DEFAULT_EXECUTORS {
            let expected = overrides
                .get(*ext)
                .cloned()
                .unwrap_or_else(|| default.to_string());
            assert_eq!(table.resolve(ext), Some(expected), "extension {ext}");
        }
        assert_eq!(table.resolve(".py").as_deref(), Some("python3 -u"));
    }

    #[test]
    fn test_unknown_extension_is_not_found() {
        let overrides = executor_map(json!({ ".rs": "cargo run" }));
        let table = ExecutorTable::new(&overrides);

        assert_eq!(table.resolve(".xyz"), None);
        assert_eq!(table.resolve(""), None);
        assert_eq!(table.resolve(".PY"), None);
        assert_eq!(table.resolve(".rs").as_deref(), Some("cargo run"));
    }

    #[test]
    fn test_non_string_overrides_are_ignored() {
        let overrides = executor_map(json!({
            ".py": ["python3"],
            ".js": null,
            ".rb": 3,
            ".sh": "zsh"
        }));
        let table = ExecutorTable::new(&overrides);

        assert_eq!(table.resolve(".py").as_deref(), Some("python"));
        assert_eq!(table.resolve(".js").as_deref(), Some("node"));
        assert_eq!(table.resolve(".rb").as_deref(), Some("ruby"));
        assert_eq!(table.resolve(".sh").as_deref(), Some("zsh"));
    }

    #[test]
    fn test_malformed_map_reads_as_empty() {
        let overrides = executor_map(json!("python"));
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("/p/a.py")), ".py");
        assert_eq!(extension_of(Path::new("/p/archive.tar.gz")), ".gz");
        assert_eq!(extension_of(Path::new("/p/Makefile")), "");
    }
}
