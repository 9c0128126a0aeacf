use std::collections::BTreeSet;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::progression::{Emotion, LevelId};

pub const DEFAULT_PLAYER_ID: &str = "player_1";
pub const DEFAULT_PLAYER_NAME: &str = "BrainHero";
pub const STARTING_BRAIN_STARS: u32 = 50;
pub const STARTING_MEMORY_FRAGMENTS: u32 = 10;
pub const STARTING_HINTS: u32 = 3;

/// Purely cosmetic choices; no gameplay rule reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customization {
    pub skin_color: String,
    pub accessory: String,
    pub emotion: Emotion,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            skin_color: "#ffdbaa".to_string(),
            accessory: "none".to_string(),
            emotion: Emotion::Joy,
        }
    }
}

/// The player's identity, currencies and completion record.
///
/// Unlocked worlds are not stored here; they are derived from the ledger.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub experience: u64,
    pub current_emotion: Emotion,
    #[serde(default)]
    pub completed_levels: BTreeSet<LevelId>,
    pub brain_stars: u32,
    pub memory_fragments: u32,
    pub hints: u32,
    #[serde(default)]
    pub customization: Customization,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            id: DEFAULT_PLAYER_ID.to_string(),
            name: DEFAULT_PLAYER_NAME.to_string(),
            level: 1,
            experience: 0,
            current_emotion: Emotion::Joy,
            completed_levels: BTreeSet::new(),
            brain_stars: STARTING_BRAIN_STARS,
            memory_fragments: STARTING_MEMORY_FRAGMENTS,
            hints: STARTING_HINTS,
            customization: Customization::default(),
        }
    }
}
