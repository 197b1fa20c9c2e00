//! Key-value reads and writes against the `kv_store` table.

use crate::Database;
use chrono::Utc;
use pond_core::store::KeyValueStore;
use rusqlite::{params, OptionalExtension};

impl Database {
    /// When a key was last written (RFC 3339, UTC).
    pub fn updated_at(&self, key: &str) -> anyhow::Result<Option<String>> {
        let conn = self.conn.borrow();
        let value = conn
            .query_row(
                "SELECT updated_at FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl KeyValueStore for Database {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let conn = self.conn.borrow();
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        log::debug!("store: wrote {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let removed = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        log::debug!("store: removed {} ({} rows)", key, removed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use pond_core::history::{HistoryEntry, HistoryLedger, HISTORY_LIMIT};
    use pond_core::parameters::ParameterForm;
    use pond_core::prediction::PredictionResult;
    use pond_core::store::{KeyValueStore, HISTORY_KEY};
    use serde_json::json;

    #[test]
    fn get_missing_key_is_none() {
        let db = Database::new().unwrap();
        assert_eq!(db.get_item("nope").unwrap(), None);
        assert_eq!(db.updated_at("nope").unwrap(), None);
    }

    #[test]
    fn set_overwrites_last_write_wins() {
        let db = Database::new().unwrap();
        db.set_item("k", "first").unwrap();
        db.set_item("k", "second").unwrap();
        assert_eq!(db.get_item("k").unwrap().as_deref(), Some("second"));
        assert!(db.updated_at("k").unwrap().is_some());
    }

    #[test]
    fn remove_deletes_and_tolerates_missing() {
        let db = Database::new().unwrap();
        db.set_item("a", "1").unwrap();
        db.set_item("b", "2").unwrap();
        db.remove_item("a").unwrap();
        db.remove_item("a").unwrap();
        assert_eq!(db.get_item("a").unwrap(), None);
        assert_eq!(db.get_item("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn history_ledger_runs_on_sqlite() {
        let db = Database::new().unwrap();
        db.set_item(HISTORY_KEY, "garbage").unwrap();
        let mut ledger = HistoryLedger::load(db.clone());
        assert!(ledger.is_empty());

        let params = ParameterForm::new().build_request().unwrap();
        for score in 0..12 {
            let results: PredictionResult = serde_json::from_value(json!({
                "pond_suitability_label": "Excellent",
                "pond_suitability_score": score as f64,
                "growth_rate": 1.5,
                "survival_rate": 90.0,
                "yield": 5200.0,
                "fcr": 1.3
            }))
            .unwrap();
            ledger.append(HistoryEntry::new(params, results));
        }

        let reloaded = HistoryLedger::load(db.clone());
        assert_eq!(reloaded.len(), HISTORY_LIMIT);
        assert_eq!(reloaded.entries(), ledger.entries());
        assert_eq!(reloaded.entries()[0].results.pond_suitability_score, 11.0);

        ledger.clear();
        assert_eq!(db.get_item(HISTORY_KEY).unwrap(), None);
    }
}
