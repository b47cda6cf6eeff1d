//! Persistence boundary.
//!
//! The `storage` module defines the [`Storage`] trait, a minimal
//! text-per-key backend, plus a file-backed implementation and an
//! in-memory one for tests and embedding. Every failure at this
//! boundary is swallowed: a missing file, unreadable data or a failed
//! write degrades to "no saved state", never to an error the caller
//! has to handle. The engine must stay usable with zero persistence.

use crate::models::{SavedInput, TimesheetInput};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Storage key for the last-input record.
pub const LAST_INPUT_KEY: &str = "salary_calc_v2";

/// A text value per key. Implementations must be thread-safe because
/// the API layer shares one backend across handlers.
pub trait Storage: Send + Sync {
    /// Returns the stored text, or `None` if the key is absent or
    /// unreadable.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores text under the key. Failures are logged and dropped.
    fn set(&self, key: &str, value: &str);
    /// Removes the key. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// Milliseconds since the Unix epoch.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// One file per key under a data directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Uses `dir` as the data directory, creating it if needed. If
    /// the directory cannot be created every read comes back empty
    /// and every write is dropped, which is the degraded mode the
    /// rest of the crate already expects.
    pub fn new(dir: PathBuf) -> Self {
        if let Err(err) = fs::create_dir_all(&dir) {
            warn!("cannot create data dir {:?}: {err}", dir);
        }
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = fs::write(self.path_for(key), value) {
            warn!("cannot persist {key}: {err}");
        }
    }

    fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }
}

/// Keys held in a mutex-guarded map. Used by tests; also handy when
/// embedding the engine without durable persistence.
#[derive(Default)]
pub struct MemoryStorage {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.map.lock() {
            map.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.map.lock() {
            map.remove(key);
        }
    }
}

/// The most recent input plus its save timestamp, kept for prefill on
/// next load. A single overwritten record under one key.
pub struct LastInputStore {
    storage: Arc<dyn Storage>,
}

impl LastInputStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Overwrites the saved input with a fresh timestamp.
    pub fn save(&self, input: &TimesheetInput) {
        let record = SavedInput {
            input: input.clone(),
            saved_at: now_millis(),
        };
        match serde_json::to_string(&record) {
            Ok(json) => self.storage.set(LAST_INPUT_KEY, &json),
            Err(err) => warn!("cannot serialise last input: {err}"),
        }
    }

    /// Returns the saved record, or `None` when nothing usable is
    /// stored. Corrupt JSON counts as nothing.
    pub fn load(&self) -> Option<SavedInput> {
        let raw = self.storage.get(LAST_INPUT_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn clear(&self) {
        self.storage.remove(LAST_INPUT_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimesheetInput;

    fn temp_storage(name: &str) -> (FileStorage, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("salary_engine_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        (FileStorage::new(dir.clone()), dir)
    }

    #[test]
    fn file_storage_round_trips_text() {
        let (storage, dir) = temp_storage("round_trip");
        assert_eq!(storage.get("k"), None);
        storage.set("k", "value");
        assert_eq!(storage.get("k").as_deref(), Some("value"));
        storage.remove("k");
        assert_eq!(storage.get("k"), None);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn removing_absent_key_is_a_no_op() {
        let (storage, dir) = temp_storage("remove_absent");
        storage.remove("never_set");
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn last_input_store_saves_and_loads() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let store = LastInputStore::new(storage);

        assert!(store.load().is_none());

        let input = TimesheetInput::basic(50000.0, 160.0, 152.0, 24.0);
        store.save(&input);

        let saved = store.load().expect("saved input expected");
        assert_eq!(saved.input, input);
        assert!(saved.saved_at > 0);
    }

    #[test]
    fn last_input_overwrites_previous_record() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let store = LastInputStore::new(storage);

        store.save(&TimesheetInput::basic(40000.0, 160.0, 160.0, 0.0));
        store.save(&TimesheetInput::basic(50000.0, 160.0, 160.0, 0.0));

        let saved = store.load().unwrap();
        assert_eq!(saved.input.salary, 50000.0);
    }

    #[test]
    fn corrupt_last_input_reads_as_absent() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        storage.set(LAST_INPUT_KEY, "{ not json");
        let store = LastInputStore::new(storage);
        assert!(store.load().is_none());
    }

    #[test]
    fn clear_removes_saved_input() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let store = LastInputStore::new(storage);
        store.save(&TimesheetInput::basic(50000.0, 160.0, 160.0, 0.0));
        store.clear();
        assert!(store.load().is_none());
    }
}
