pub mod intents;

use bevy_ecs::prelude::*;

use crate::simulation::events::ProgressionLog;

pub use intents::{apply_intent, apply_intents_system, StateMut};

/// System: Starts each mutation pass with an empty event log.
pub fn reset_log_system(mut log: ResMut<ProgressionLog>) {
    log.clear();
}
