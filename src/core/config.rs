use std::path::PathBuf;

pub const DEFAULT_SAVE_PATH: &str = "./puzzletoon.db";
/// Well-known key the persisted record lives under.
pub const DEFAULT_SLOT_KEY: &str = "puzzletoon-game-storage";

/// Runtime configuration for the state container and its save slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// `None` keeps saves in memory only.
    pub save_path: Option<PathBuf>,
    pub slot_key: String,
    /// Persist after every mutation. When off, only `Game::flush` writes.
    pub write_through: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            save_path: Some(PathBuf::from(DEFAULT_SAVE_PATH)),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            write_through: true,
        }
    }
}

impl EngineConfig {
    pub fn in_memory() -> Self {
        Self {
            save_path: None,
            ..Default::default()
        }
    }
}
