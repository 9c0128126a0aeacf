use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveSlotError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    InvalidData(String),
}

/// A durable key-value slot holding serialized saves.
pub trait SaveSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SaveSlotError>;
    fn write(&mut self, key: &str, payload: &str) -> Result<(), SaveSlotError>;
    fn clear(&mut self, key: &str) -> Result<(), SaveSlotError>;
}

/// Process-local slot; contents vanish with the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySaveSlot {
    entries: HashMap<String, String>,
}

impl MemorySaveSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, payload: impl Into<String>) -> Self {
        let mut slot = Self::new();
        slot.entries.insert(key.into(), payload.into());
        slot
    }
}

impl SaveSlot for MemorySaveSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SaveSlotError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), SaveSlotError> {
        self.entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), SaveSlotError> {
        self.entries.remove(key);
        Ok(())
    }
}
