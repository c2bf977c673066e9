use super::KeyValueStore;
use crate::game_errors::{GameError, GameResult};
use log::{debug, error, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// JSON-object file store: `{ "highScore_3x3": "4000", ... }`
///
/// The whole file is read once on open and rewritten on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open `path`, degrading to an empty store when the file is missing or unreadable
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::try_open(&path) {
            Ok(store) => store,
            Err(e) => {
                warn!(
                    "⚠️ Score file {} unusable, starting empty: {}",
                    path.display(),
                    e
                );
                Self {
                    path,
                    entries: BTreeMap::new(),
                }
            }
        }
    }

    /// Open `path`, failing on unreadable or malformed content; a missing file is empty
    pub fn try_open(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries: BTreeMap<String, String> = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            BTreeMap::new()
        };
        debug!("Loaded {} score entries from {}", entries.len(), path.display());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all entries to disk
    pub fn flush(&self) -> GameResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, contents).map_err(|e| {
            GameError::StoreError(format!("cannot write {}: {}", self.path.display(), e))
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            error!("❌ Failed to persist {}: {}", key, e);
        }
    }
}
