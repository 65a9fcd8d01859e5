use crate::{
    config::RunConfig,
    error::{Error, Result},
    executor::ExecutorMap,
    interfaces::ConfigStore,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File names searched for, in order, in each directory
pub const SETTINGS_FILE_NAMES: [&str; 2] = [".quickrun.json", "quickrun.json"];

/// Contents of a settings file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, deserialize_with = "lenient_configurations")]
    pub configurations: Vec<RunConfig>,
    #[serde(default)]
    pub clear_previous_output: bool,
    #[serde(default)]
    pub executor_map_by_file_extension: ExecutorMap,
}

/// Keeps every well-formed entry and skips the rest, so one typo in the
/// settings file doesn't hide all other configurations.
fn lenient_configurations<'de, D>(deserializer: D) -> std::result::Result<Vec<RunConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        warn!("Ignoring 'configurations': expected an array");
        return Ok(Vec::new());
    };

    let mut configurations = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let parsed = serde_json::from_value::<RunConfig>(entry)
            .map_err(Error::from)
            .and_then(|config| config.validate().map(|_| config));
        match parsed {
            Ok(config) => configurations.push(config),
            Err(e) => warn!("Skipping configuration #{}: {}", index, e),
        }
    }
    Ok(configurations)
}

impl Settings {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse {}: {e}", path.display())))
    }
}

/// Configuration store backed by a JSON settings file
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl JsonSettingsStore {
    /// Open the settings file at `path`; a missing file reads as empty settings
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = Self::read(&path)?;
        Ok(Self { path, settings })
    }

    /// Open the nearest settings file above `start`, or plan to create one in `start`
    pub fn discover(start: &Path) -> Result<Self> {
        let path = Self::find_settings_file(start)
            .unwrap_or_else(|| start.join(SETTINGS_FILE_NAMES[0]));
        debug!("Using settings file {}", path.display());
        Self::open(path)
    }

    pub fn find_settings_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in SETTINGS_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }

            current = current.parent()?;
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the settings file
    pub fn root(&self) -> Option<&Path> {
        self.path.parent()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn executor_map(&self) -> ExecutorMap {
        self.settings.executor_map_by_file_extension.clone()
    }

    fn read(path: &Path) -> Result<Settings> {
        if path.exists() {
            Settings::load_from_file(path)
        } else {
            Ok(Settings::default())
        }
    }

    fn read_raw(&self) -> Result<serde_json::Map<String, Value>> {
        if !self.path.exists() {
            return Ok(serde_json::Map::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&contents)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::ConfigError(format!(
                "{} must contain a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl ConfigStore for JsonSettingsStore {
    fn configurations(&self) -> Vec<RunConfig> {
        self.settings.configurations.clone()
    }

    /// Appends to the file as it is on disk right now, leaving entries this
    /// store skipped while loading untouched.
    fn append(&mut self, config: RunConfig) -> Result<()> {
        config.validate()?;

        let mut raw = self.read_raw()?;
        let entry = serde_json::to_value(&config)?;
        match raw
            .entry("configurations")
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(entries) => entries.push(entry),
            _ => {
                return Err(Error::ConfigError(
                    "'configurations' in the settings file is not an array".to_string(),
                ));
            }
        }

        let contents = serde_json::to_string_pretty(&Value::Object(raw))?;
        std::fs::write(&self.path, contents)?;
        debug!("Appended configuration '{}' to {}", config.name, self.path.display());

        self.reload()
    }

    fn clear_previous_output(&self) -> bool {
        self.settings.clear_previous_output
    }

    fn reload(&mut self) -> Result<()> {
        self.settings = Self::read(&self.path)?;
        Ok(())
    }
}
