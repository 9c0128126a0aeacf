// Re-export core modules for use by the binary or other consumers
pub mod components;
pub mod core;
pub mod data;
pub mod persistence;
pub mod rules;
pub mod simulation;
pub mod systems;

// Expose the state container and the types needed to drive it
pub use crate::core::config::EngineConfig;
pub use crate::core::serialization::{SaveState, SAVE_VERSION};
pub use crate::core::world::{Game, ProgressionIntent, Snapshot};
pub use crate::persistence::{LoadOutcome, MemorySaveSlot, SaveSlot, SaveSlotError, SqliteSaveSlot};
