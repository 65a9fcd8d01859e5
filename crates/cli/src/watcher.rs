//! Settings file watcher
//!
//! Editors often save by writing a temporary file and renaming it over the
//! original, so the parent directory is watched and events are filtered by
//! file name.

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use tracing::{debug, trace, warn};

/// Reports changes to one settings file
pub struct SettingsWatcher {
    // Kept alive for as long as events are wanted.
    _watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    file_name: OsString,
}

impl SettingsWatcher {
    pub fn new(settings_path: &Path) -> Result<Self> {
        let file_name = settings_path
            .file_name()
            .context("Settings path has no file name")?
            .to_os_string();
        let parent: PathBuf = settings_path
            .parent()
            .context("Settings path has no parent directory")?
            .to_path_buf();

        let (tx, events) = channel();
        let mut watcher =
            notify::recommended_watcher(tx).context("Failed to create settings watcher")?;
        watcher
            .watch(&parent, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", parent.display()))?;
        debug!("Watching {} for changes", settings_path.display());

        Ok(Self {
            _watcher: watcher,
            events,
            file_name,
        })
    }

    /// Drain pending events; `true` if any of them touched the settings file
    pub fn changed(&self) -> bool {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(Ok(event)) => changed |= self.is_relevant(&event),
                Ok(Err(e)) => warn!("Settings watcher error: {}", e),
                Err(TryRecvError::Empty) => return changed,
                Err(TryRecvError::Disconnected) => {
                    warn!("Settings watcher stopped");
                    return changed;
                }
            }
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        if !matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) {
            return false;
        }
        let relevant = event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(self.file_name.as_os_str()));
        if relevant {
            trace!("Settings changed: {:?}", event.kind);
        }
        relevant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};

    fn watcher_for(dir: &Path) -> SettingsWatcher {
        SettingsWatcher::new(&dir.join(".quickrun.json")).unwrap()
    }

    #[test]
    fn test_relevance_filters_by_file_name_and_kind() {
        let temp = tempfile::TempDir::new().unwrap();
        let watcher = watcher_for(temp.path());

        let settings = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(temp.path().join(".quickrun.json"));
        let other = Event::new(EventKind::Create(CreateKind::File))
            .add_path(temp.path().join("main.py"));
        let access = Event::new(EventKind::Access(notify::event::AccessKind::Any))
            .add_path(temp.path().join(".quickrun.json"));

        assert!(watcher.is_relevant(&settings));
        assert!(!watcher.is_relevant(&other));
        assert!(!watcher.is_relevant(&access));
    }

    #[test]
    fn test_no_events_means_unchanged() {
        let temp = tempfile::TempDir::new().unwrap();
        let watcher = watcher_for(temp.path());
        assert!(!watcher.changed());
    }
}
