//! Bounded history of past computations.
//!
//! The `history` module owns the persisted sequence of
//! [`HistoryEntry`] records: newest first, capped, stored as one JSON
//! array under a single [`Storage`] key. The ledger is the sole
//! authority over that sequence; it never computes anything, just as
//! the engine never persists anything.

use crate::models::{CombinedTotals, HistoryEntry, TimesheetInput};
use crate::storage::{now_millis, Storage};
use std::sync::Arc;
use tracing::warn;

/// Storage key for the history array.
pub const HISTORY_KEY: &str = "salary_calc_history_v1";

/// Maximum number of entries kept; the oldest beyond this bound are
/// discarded on append.
pub const HISTORY_CAP: usize = 10;

/// Append-bounded log of (input, combined totals) pairs.
pub struct HistoryLedger {
    storage: Arc<dyn Storage>,
}

impl HistoryLedger {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Returns all entries, newest first. Absent or corrupt persisted
    /// state reads as an empty ledger, never as an error.
    pub fn list(&self) -> Vec<HistoryEntry> {
        let Some(raw) = self.storage.get(HISTORY_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    /// Inserts a new entry at the front and truncates to
    /// [`HISTORY_CAP`].
    pub fn append(&self, input: &TimesheetInput, result: &CombinedTotals) {
        let mut entries = self.list();
        entries.insert(
            0,
            HistoryEntry {
                timestamp: now_millis(),
                input: input.clone(),
                result: result.clone(),
            },
        );
        entries.truncate(HISTORY_CAP);
        self.persist(&entries);
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.storage.remove(HISTORY_KEY);
    }

    fn persist(&self, entries: &[HistoryEntry]) {
        match serde_json::to_string(entries) {
            Ok(json) => self.storage.set(HISTORY_KEY, &json),
            Err(err) => warn!("cannot serialise history: {err}"),
        }
    }
}
