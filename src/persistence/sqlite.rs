use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::persistence::slot::{SaveSlot, SaveSlotError};

const SLOT_SCHEMA_VERSION: i64 = 1;

const SLOT_DB_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS slot_meta (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  schema_version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS save_slots (
  slot_key TEXT PRIMARY KEY,
  payload TEXT NOT NULL,
  written_at INTEGER NOT NULL
);
"#;

/// Save slot backed by a local SQLite file.
pub struct SqliteSaveSlot {
    conn: Connection,
}

impl SqliteSaveSlot {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SaveSlotError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, SaveSlotError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, SaveSlotError> {
        let mut slot = Self { conn };
        slot.conn.execute_batch(SLOT_DB_SCHEMA)?;
        slot.ensure_slot_meta()?;
        Ok(slot)
    }

    pub fn keys(&self) -> Result<Vec<String>, SaveSlotError> {
        let mut stmt = self
            .conn
            .prepare("SELECT slot_key FROM save_slots ORDER BY slot_key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }

    fn ensure_slot_meta(&mut self) -> Result<(), SaveSlotError> {
        let schema_version = self
            .conn
            .query_row(
                "SELECT schema_version FROM slot_meta WHERE id = 1",
                [],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;

        match schema_version {
            Some(version) if version == SLOT_SCHEMA_VERSION => Ok(()),
            Some(version) => Err(SaveSlotError::InvalidData(format!(
                "slot_meta version mismatch (schema {}, expected {})",
                version, SLOT_SCHEMA_VERSION
            ))),
            None => {
                self.conn.execute(
                    "INSERT INTO slot_meta (id, schema_version) VALUES (1, ?1)",
                    params![SLOT_SCHEMA_VERSION],
                )?;
                Ok(())
            }
        }
    }
}

impl SaveSlot for SqliteSaveSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SaveSlotError> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM save_slots WHERE slot_key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), SaveSlotError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO save_slots (slot_key, payload, written_at) VALUES (?1, ?2, strftime('%s', 'now'))
             ON CONFLICT(slot_key) DO UPDATE SET payload = excluded.payload, written_at = excluded.written_at",
            params![key, payload],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), SaveSlotError> {
        self.conn
            .execute("DELETE FROM save_slots WHERE slot_key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_overwrite_keeps_one_row() {
        let mut slot = SqliteSaveSlot::open_in_memory().unwrap();
        assert_eq!(slot.read("game").unwrap(), None);

        slot.write("game", "{\"a\":1}").unwrap();
        slot.write("game", "{\"a\":2}").unwrap();

        assert_eq!(slot.read("game").unwrap().as_deref(), Some("{\"a\":2}"));
        assert_eq!(slot.keys().unwrap(), vec!["game".to_string()]);
    }

    #[test]
    fn clear_removes_the_entry() {
        let mut slot = SqliteSaveSlot::open_in_memory().unwrap();
        slot.write("game", "x").unwrap();
        slot.clear("game").unwrap();
        assert_eq!(slot.read("game").unwrap(), None);
    }

    #[test]
    fn reopening_a_file_keeps_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slots.db");
        {
            let mut slot = SqliteSaveSlot::open(&path).unwrap();
            slot.write("game", "persisted").unwrap();
        }
        let slot = SqliteSaveSlot::open(&path).unwrap();
        assert_eq!(slot.read("game").unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn schema_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slots.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(SLOT_DB_SCHEMA).unwrap();
            conn.execute(
                "INSERT INTO slot_meta (id, schema_version) VALUES (1, 99)",
                [],
            )
            .unwrap();
        }
        assert!(matches!(
            SqliteSaveSlot::open(&path),
            Err(SaveSlotError::InvalidData(_))
        ));
    }
}
