//! Raw key-value queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const SELECT_VALUE_SQL: &str = "SELECT value FROM kv WHERE key = ?1";
const UPSERT_VALUE_SQL: &str = "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_VALUE_SQL: &str = "DELETE FROM kv WHERE key = ?1";
const SELECT_KEYS_SQL: &str = "SELECT key FROM kv ORDER BY key";

impl super::Database {
    /// Reads the raw value stored under `key`.
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_VALUE_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read value")
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn put_value(&mut self, key: &str, value: &str) -> Result<()> {
        let now = Timestamp::now().to_string();
        self.connection
            .execute(UPSERT_VALUE_SQL, params![key, value, now])
            .db_context("Failed to write value")?;
        Ok(())
    }

    /// Stores several values in one transaction.
    pub fn put_values(&mut self, entries: &[(&str, String)]) -> Result<()> {
        let now = Timestamp::now().to_string();
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        for (key, value) in entries {
            tx.execute(UPSERT_VALUE_SQL, params![key, value, &now])
                .db_context("Failed to write value")?;
        }
        tx.commit().db_context("Failed to commit transaction")
    }

    /// Removes `key`. Returns whether an entry existed.
    pub fn remove_value(&mut self, key: &str) -> Result<bool> {
        let removed = self
            .connection
            .execute(DELETE_VALUE_SQL, params![key])
            .db_context("Failed to delete value")?;
        Ok(removed > 0)
    }

    /// Lists all stored keys in ascending order.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_KEYS_SQL)
            .db_context("Failed to prepare key listing")?;
        let keys = stmt
            .query_map([], |row| row.get(0))
            .db_context("Failed to list keys")?
            .collect::<rusqlite::Result<Vec<String>>>()
            .db_context("Failed to read key")?;
        Ok(keys)
    }
}
