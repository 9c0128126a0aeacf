use std::collections::HashSet;
use std::fs;
use std::path::Path;

use bevy_ecs::world::World as EcsWorld;
use serde::{Deserialize, Serialize};

use crate::components::player::PlayerProfile;
use crate::components::progression::{World, MAX_STARS};
use crate::components::settings::{Entitlements, Settings};
use crate::persistence::slot::SaveSlotError;
use crate::simulation::progression::ProgressionLedger;

/// Bumping this invalidates every earlier save; there is no migration.
pub const SAVE_VERSION: u32 = 1;

/// The persisted subset of the state container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveState {
    pub version: u32,
    pub player: PlayerProfile,
    pub worlds: Vec<World>,
    pub settings: Settings,
    pub premium: Entitlements,
}

impl Default for SaveState {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            player: PlayerProfile::default(),
            worlds: ProgressionLedger::default().worlds,
            settings: Settings::default(),
            premium: Entitlements::default(),
        }
    }
}

impl SaveState {
    /// Structural checks a decoded save must pass before it replaces live state.
    pub fn validate(&self) -> Result<(), SaveSlotError> {
        if self.worlds.is_empty() {
            return Err(SaveSlotError::InvalidData("save has no worlds".to_string()));
        }
        let mut level_ids = HashSet::new();
        let mut previous_world = None;
        for world in &self.worlds {
            if previous_world.is_some_and(|prev| prev >= world.id) {
                return Err(SaveSlotError::InvalidData(format!(
                    "world {} out of order",
                    world.id
                )));
            }
            previous_world = Some(world.id);

            if world.levels.is_empty() {
                return Err(SaveSlotError::InvalidData(format!(
                    "world {} has no levels",
                    world.id
                )));
            }
            for (index, level) in world.levels.iter().enumerate() {
                if level.level_number != index as u32 + 1 {
                    return Err(SaveSlotError::InvalidData(format!(
                        "world {} level numbering broken at {}",
                        world.id, level.id
                    )));
                }
                if level.world_id != world.id {
                    return Err(SaveSlotError::InvalidData(format!(
                        "level {} filed under world {}",
                        level.id, world.id
                    )));
                }
                if !level_ids.insert(level.id.clone()) {
                    return Err(SaveSlotError::InvalidData(format!(
                        "duplicate level id {}",
                        level.id
                    )));
                }
                if level.stars > MAX_STARS {
                    return Err(SaveSlotError::InvalidData(format!(
                        "level {} has {} stars (max {})",
                        level.id, level.stars, MAX_STARS
                    )));
                }
            }
            if world.completed != world.all_levels_completed() {
                return Err(SaveSlotError::InvalidData(format!(
                    "world {} completion flag disagrees with its levels",
                    world.id
                )));
            }
        }
        Ok(())
    }
}

/// Copy the persisted subset out of the ECS world.
pub fn extract_state_from_world(world: &EcsWorld) -> SaveState {
    SaveState {
        version: SAVE_VERSION,
        player: world.resource::<PlayerProfile>().clone(),
        worlds: world.resource::<ProgressionLedger>().worlds.clone(),
        settings: world.resource::<Settings>().clone(),
        premium: world.resource::<Entitlements>().clone(),
    }
}

/// Replace the persisted subset inside the ECS world.
pub fn apply_state_to_world(state: SaveState, world: &mut EcsWorld) {
    world.insert_resource(state.player);
    world.insert_resource(ProgressionLedger::from_worlds(state.worlds));
    world.insert_resource(state.settings);
    world.insert_resource(state.premium);
}

pub fn save_state_to_json(state: &SaveState) -> serde_json::Result<String> {
    serde_json::to_string(state)
}

pub fn load_state_from_json(data: &str) -> serde_json::Result<SaveState> {
    serde_json::from_str(data)
}

/// Export a save as pretty JSON.
pub fn save_state_to_path<P: AsRef<Path>>(state: &SaveState, path: P) -> Result<(), SaveSlotError> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}

/// Import a save exported by `save_state_to_path`, rejecting other versions.
pub fn load_state_from_path<P: AsRef<Path>>(path: P) -> Result<SaveState, SaveSlotError> {
    let data = fs::read_to_string(&path)?;
    let state = load_state_from_json(&data)?;
    if state.version != SAVE_VERSION {
        return Err(SaveSlotError::InvalidData(format!(
            "save version {} not supported (expected {})",
            state.version, SAVE_VERSION
        )));
    }
    state.validate()?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::progression::LevelId;

    #[test]
    fn default_state_validates() {
        assert!(SaveState::default().validate().is_ok());
    }

    #[test]
    fn duplicate_level_ids_are_rejected() {
        let mut state = SaveState::default();
        state.worlds[0].levels[1].id = LevelId::from("1-1");
        assert!(state.validate().is_err());
    }

    #[test]
    fn gap_in_numbering_is_rejected() {
        let mut state = SaveState::default();
        state.worlds[2].levels.remove(4);
        assert!(state.validate().is_err());
    }

    #[test]
    fn out_of_range_stars_are_rejected() {
        let mut state = SaveState::default();
        state.worlds[0].levels[0].stars = MAX_STARS + 1;
        assert!(state.validate().is_err());
    }

    #[test]
    fn world_completion_flag_must_match_levels() {
        let mut state = SaveState::default();
        state.worlds[1].completed = true;
        assert!(state.validate().is_err());

        let mut state = SaveState::default();
        for level in &mut state.worlds[0].levels {
            level.completed = true;
        }
        assert!(state.validate().is_err());
        state.worlds[0].completed = true;
        assert!(state.validate().is_ok());
    }

    #[test]
    fn json_layout_uses_version_player_worlds_settings_premium() {
        let json = save_state_to_json(&SaveState::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for key in ["version", "player", "worlds", "settings", "premium"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["version"], SAVE_VERSION);
        assert_eq!(value["worlds"][0]["levels"][0]["type"], "emotion-shift");
    }

    #[test]
    fn export_and_import_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        let mut state = SaveState::default();
        state.player.name = "Exported".to_string();
        save_state_to_path(&state, &path).unwrap();
        assert_eq!(load_state_from_path(&path).unwrap(), state);
    }
}
