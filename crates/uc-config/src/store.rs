//! Hot-reloadable config snapshots.
//!
//! Readers clone an `Arc<Config>` and clean against it for as long as they
//! like; a reload publishes a whole new snapshot instead of editing the
//! current one.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;

use uc_core::{Cleaner, Config};

use crate::loader::{load, load_or_init, ConfigError};

/// Current config snapshot plus the file it came from.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

#[derive(Debug)]
struct StoreState {
    config: Arc<Config>,
    modified: Option<SystemTime>,
}

impl ConfigStore {
    /// Open the config at `path`, writing the default if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let config = load_or_init(&path)?;
        let modified = modified_time(&path);
        Ok(Self::with_config(path, config, modified))
    }

    /// Wrap an already-loaded config. `reload_if_changed` picks up any later
    /// write to `path`.
    pub fn from_config(path: impl Into<PathBuf>, config: Config) -> Self {
        let path = path.into();
        let modified = modified_time(&path);
        Self::with_config(path, config, modified)
    }

    fn with_config(path: PathBuf, config: Config, modified: Option<SystemTime>) -> Self {
        Self {
            path,
            state: RwLock::new(StoreState {
                config: Arc::new(config),
                modified,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Config> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&state.config)
    }

    /// Reload the file if its modification time moved forward.
    ///
    /// Returns `true` when a new snapshot was published. A file that cannot be
    /// read or parsed (for example while an editor is still writing it) is
    /// logged and the previous snapshot stays in place.
    pub fn reload_if_changed(&self) -> bool {
        let Some(modified) = modified_time(&self.path) else {
            return false;
        };

        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if state.modified.is_some_and(|seen| modified <= seen) {
                return false;
            }
        }

        match load(&self.path) {
            Ok(config) => {
                let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
                state.config = Arc::new(config);
                state.modified = Some(modified);
                log::info!("reloaded config from {}", self.path.display());
                true
            }
            Err(e) => {
                log::warn!("keeping previous config: {e}");
                false
            }
        }
    }

    /// Clean `text` against the current snapshot.
    ///
    /// Builds a throwaway `Cleaner`; loops should hold a `snapshot()` and
    /// reuse one `Cleaner` until the next reload.
    pub fn try_clean(&self, text: &str) -> Option<String> {
        let config = self.snapshot();
        Cleaner::new(&config).clean(text)
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
