//! Bounded, persisted history of past predictions.
//!
//! Entries are kept most-recent-first and capped at [`HISTORY_LIMIT`]. The
//! whole list is stored as one JSON array under [`HISTORY_KEY`]. Storage
//! failures are logged and never reach the caller; a failed write leaves the
//! in-memory list as it was.

use crate::parameters::PondParameters;
use crate::prediction::PredictionResult;
use crate::store::{KeyValueStore, HISTORY_KEY};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Maximum number of entries the ledger keeps.
pub const HISTORY_LIMIT: usize = 10;

/// A single successful prediction with the request that produced it.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Locale formatted time of the prediction
    pub timestamp: String,
    pub params: PondParameters,
    pub results: PredictionResult,
}

impl HistoryEntry {
    pub fn new(params: PondParameters, results: PredictionResult) -> Self {
        Self {
            timestamp: pond_utils::dates::now_timestamp(),
            params,
            results,
        }
    }
}

pub struct HistoryLedger<S> {
    store: S,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> HistoryLedger<S> {
    /// Read the persisted history. Missing or unreadable data gives an empty ledger.
    pub fn load(store: S) -> Self {
        let entries = match store.get_item(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(mut entries) => {
                    entries.truncate(HISTORY_LIMIT);
                    entries
                }
                Err(e) => {
                    warn!("Discarding unreadable prediction history: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Error loading prediction history: {}", e);
                Vec::new()
            }
        };
        info!("Loaded {} history entries", entries.len());
        Self { store, entries }
    }

    /// Prepend an entry, evicting anything past the limit, and persist.
    ///
    /// The in-memory list only changes once the write succeeds, so it
    /// always matches what a later `load` returns.
    pub fn append(&mut self, entry: HistoryEntry) {
        let mut updated = Vec::with_capacity(HISTORY_LIMIT);
        updated.push(entry);
        updated.extend(
            self.entries
                .iter()
                .take(HISTORY_LIMIT - 1)
                .cloned(),
        );

        let json = match serde_json::to_string(&updated) {
            Ok(json) => json,
            Err(e) => {
                warn!("Error serializing prediction history: {}", e);
                return;
            }
        };
        match self.store.set_item(HISTORY_KEY, &json) {
            Ok(()) => self.entries = updated,
            Err(e) => warn!("Error saving prediction: {}", e),
        }
    }

    /// Empty the ledger and delete the stored list.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.remove_item(HISTORY_KEY) {
            warn!("Error clearing prediction history: {}", e);
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
