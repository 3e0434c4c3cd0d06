//! Database schema initialization.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::super::Database;

    #[test]
    fn test_schema_is_idempotent() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut db = Database::new(temp_file.path()).unwrap();
        db.put_value("journeyMapper_context", "\"Bank\"").unwrap();

        db.initialize_schema().unwrap();

        let columns: Vec<String> = db
            .connection
            .prepare("SELECT name FROM pragma_table_info('kv')")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(columns, ["key", "value", "updated_at"]);
        assert_eq!(
            db.get_value("journeyMapper_context").unwrap().as_deref(),
            Some("\"Bank\"")
        );
    }
}
