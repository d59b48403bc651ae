use tracing::warn;

use crate::errors::WstgkitError;
use crate::models::progress::{ProgressEntry, ProgressMap};

use super::Database;

impl Database {
    pub fn set_progress(&self, wstg_id: &str, entry: &ProgressEntry) -> Result<(), WstgkitError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO progress (wstg_id, entry) VALUES (?1, ?2)",
            rusqlite::params![wstg_id, serde_json::to_string(entry)?],
        )
        .map_err(|e| WstgkitError::Database(format!("Failed to save progress: {}", e)))?;
        Ok(())
    }

    /// The full guide progress map. Rows whose stored blob no longer parses
    /// are discarded with a warning rather than failing the whole load.
    pub fn get_progress(&self) -> Result<ProgressMap, WstgkitError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT wstg_id, entry FROM progress")
            .map_err(|e| WstgkitError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| WstgkitError::Database(format!("Query error: {}", e)))?;

        let mut map = ProgressMap::new();
        for row in rows {
            let (wstg_id, raw) =
                row.map_err(|e| WstgkitError::Database(format!("Row error: {}", e)))?;
            match serde_json::from_str::<ProgressEntry>(&raw) {
                Ok(entry) => {
                    map.insert(wstg_id, entry);
                }
                Err(e) => {
                    warn!(wstg_id = %wstg_id, error = %e, "Discarding corrupt progress entry");
                }
            }
        }
        Ok(map)
    }

    pub fn get_progress_entry(&self, wstg_id: &str) -> Result<ProgressEntry, WstgkitError> {
        Ok(self.get_progress()?.remove(wstg_id).unwrap_or_default())
    }
}
