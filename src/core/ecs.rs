use bevy_ecs::prelude::*;
use bevy_ecs::schedule::{ExecutorKind, SystemSet};

use crate::components::session::Session;
use crate::core::serialization::{apply_state_to_world, SaveState};
use crate::core::world::ActionQueue;
use crate::simulation::events::ProgressionLog;
use crate::simulation::level_run::LevelRun;
use crate::systems::{apply_intents_system, reset_log_system};

/// Canonical ordering for one mutation pass.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum TickSet {
    Intake,
    Apply,
}

/// Build the ECS world from a persisted (or default) state plus fresh session resources.
pub fn create_world(state: SaveState) -> World {
    let mut world = World::new();
    apply_state_to_world(state, &mut world);
    world.insert_resource(Session::default());
    world.insert_resource(LevelRun::default());
    world.insert_resource(ActionQueue::default());
    world.insert_resource(ProgressionLog::default());
    world
}

/// Build the mutation schedule. One logical writer: the executor runs single-threaded.
pub fn create_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);

    schedule.configure_sets((TickSet::Intake, TickSet::Apply).chain());
    schedule.add_systems((
        reset_log_system.in_set(TickSet::Intake),
        apply_intents_system.in_set(TickSet::Apply),
    ));

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::player::PlayerProfile;
    use crate::components::settings::{Entitlements, Settings};

    #[test]
    fn world_has_every_resource() {
        let world = create_world(SaveState::default());
        assert!(world.contains_resource::<PlayerProfile>());
        assert!(world.contains_resource::<Settings>());
        assert!(world.contains_resource::<Entitlements>());
        assert!(world.contains_resource::<Session>());
        assert!(world.contains_resource::<LevelRun>());
    }
}
