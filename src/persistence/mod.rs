pub mod slot;
pub mod sqlite;

use bevy_utils::tracing::{info, warn};

use crate::core::serialization::{load_state_from_json, save_state_to_json, SaveState, SAVE_VERSION};

pub use slot::{MemorySaveSlot, SaveSlot, SaveSlotError};
pub use sqlite::SqliteSaveSlot;

/// Why startup ended up with the state it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Restored,
    Missing,
    VersionMismatch { found: Option<u64>, expected: u32 },
    Corrupt(String),
    Unreadable(String),
}

impl LoadOutcome {
    pub fn restored(&self) -> bool {
        matches!(self, LoadOutcome::Restored)
    }
}

/// Read the slot and rebuild state, falling back to fresh defaults on any failure.
pub fn load_or_default(slot: &dyn SaveSlot, key: &str) -> (SaveState, LoadOutcome) {
    let outcome = match slot.read(key) {
        Ok(Some(raw)) => match decode(&raw) {
            Ok(state) => {
                info!("restored save from slot {}", key);
                return (state, LoadOutcome::Restored);
            }
            Err(outcome) => outcome,
        },
        Ok(None) => LoadOutcome::Missing,
        Err(err) => LoadOutcome::Unreadable(err.to_string()),
    };

    if outcome != LoadOutcome::Missing {
        warn!("discarding save in slot {}: {:?}", key, outcome);
    }
    (SaveState::default(), outcome)
}

fn decode(raw: &str) -> Result<SaveState, LoadOutcome> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|err| LoadOutcome::Corrupt(err.to_string()))?;
    let found = value.get("version").and_then(|version| version.as_u64());
    if found != Some(SAVE_VERSION as u64) {
        return Err(LoadOutcome::VersionMismatch {
            found,
            expected: SAVE_VERSION,
        });
    }

    let state = load_state_from_json(raw).map_err(|err| LoadOutcome::Corrupt(err.to_string()))?;
    state
        .validate()
        .map_err(|err| LoadOutcome::Corrupt(err.to_string()))?;
    Ok(state)
}

pub fn write_state(slot: &mut dyn SaveSlot, key: &str, state: &SaveState) -> Result<(), SaveSlotError> {
    let payload = save_state_to_json(state)?;
    slot.write(key, &payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "test-slot";

    #[test]
    fn empty_slot_yields_defaults() {
        let slot = MemorySaveSlot::new();
        let (state, outcome) = load_or_default(&slot, KEY);
        assert_eq!(outcome, LoadOutcome::Missing);
        assert_eq!(state, SaveState::default());
    }

    #[test]
    fn written_state_is_restored() {
        let mut slot = MemorySaveSlot::new();
        let mut state = SaveState::default();
        state.player.hints = 42;
        write_state(&mut slot, KEY, &state).unwrap();

        let (restored, outcome) = load_or_default(&slot, KEY);
        assert!(outcome.restored());
        assert_eq!(restored, state);
    }

    #[test]
    fn garbage_is_treated_as_absent() {
        let slot = MemorySaveSlot::with_entry(KEY, "{not json");
        let (state, outcome) = load_or_default(&slot, KEY);
        assert!(matches!(outcome, LoadOutcome::Corrupt(_)));
        assert_eq!(state, SaveState::default());
    }

    #[test]
    fn other_versions_are_discarded() {
        let mut state = SaveState::default();
        state.version = SAVE_VERSION + 1;
        state.player.brain_stars = 9_999;
        let slot = MemorySaveSlot::with_entry(KEY, save_state_to_json(&state).unwrap());

        let (loaded, outcome) = load_or_default(&slot, KEY);
        assert_eq!(
            outcome,
            LoadOutcome::VersionMismatch {
                found: Some(SAVE_VERSION as u64 + 1),
                expected: SAVE_VERSION
            }
        );
        assert_eq!(loaded.player.brain_stars, 50);
    }

    #[test]
    fn well_formed_json_with_wrong_shape_is_corrupt() {
        let slot = MemorySaveSlot::with_entry(KEY, r#"{"version":1,"player":{}}"#);
        let (_, outcome) = load_or_default(&slot, KEY);
        assert!(matches!(outcome, LoadOutcome::Corrupt(_)));
    }

    #[test]
    fn out_of_range_difficulty_is_corrupt() {
        let mut value = serde_json::to_value(SaveState::default()).unwrap();
        value["worlds"][0]["levels"][0]["difficulty"] = serde_json::json!(9);
        let slot = MemorySaveSlot::with_entry(KEY, value.to_string());
        let (_, outcome) = load_or_default(&slot, KEY);
        assert!(matches!(outcome, LoadOutcome::Corrupt(_)));
    }
}
