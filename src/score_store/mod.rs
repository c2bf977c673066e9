// Score store - best completion time per grid size on top of a string key-value store

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use crate::config::GridSize;
use log::{info, warn};

/// Durable string key-value storage
pub trait KeyValueStore {
    /// Read a value; storage failures read as missing
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value; storage failures are logged, never raised
    fn set(&mut self, key: &str, value: String);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        (**self).set(key, value)
    }
}

/// Result of offering a completion time to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Stored; previous best (if any) was slower
    NewBest { previous: Option<u64> },
    /// Not stored; the current record is at least as fast
    NotBest { best: u64 },
}

impl SaveOutcome {
    pub fn is_new_best(&self) -> bool {
        matches!(self, SaveOutcome::NewBest { .. })
    }
}

/// Storage key for a grid size, e.g. `highScore_4x4`
pub fn score_key(size: GridSize) -> String {
    format!("highScore_{}", size)
}

/// Per-size best times
pub struct HighScores<S> {
    store: S,
}

impl<S: KeyValueStore> HighScores<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Best recorded time for `size`; missing or corrupt values read as no record
    pub fn load(&self, size: GridSize) -> Option<u64> {
        let key = score_key(size);
        let raw = self.store.get(&key)?;
        match raw.trim().parse::<u64>() {
            Ok(ms) => Some(ms),
            Err(e) => {
                warn!("⚠️ Ignoring unreadable score {:?} under {}: {}", raw, key, e);
                None
            }
        }
    }

    /// Store `elapsed_ms` if it beats the current record (or there is none)
    pub fn save(&mut self, size: GridSize, elapsed_ms: u64) -> SaveOutcome {
        match self.load(size) {
            Some(best) if elapsed_ms >= best => SaveOutcome::NotBest { best },
            previous => {
                self.store.set(&score_key(size), elapsed_ms.to_string());
                info!(
                    "New best for {}: {} ms (previous {:?})",
                    size, elapsed_ms, previous
                );
                SaveOutcome::NewBest { previous }
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
