use std::collections::BTreeSet;

use bevy_ecs::prelude::*;
use bevy_utils::tracing::{debug, info};

use crate::components::progression::{Level, LevelId, World, WorldId, MAX_STARS};
use crate::data::catalog::create_initial_worlds;
use crate::simulation::events::{ProgressionEvent, ProgressionLog};

/// Per-world and per-level runtime state layered over the catalog.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ProgressionLedger {
    pub worlds: Vec<World>,
}

impl Default for ProgressionLedger {
    fn default() -> Self {
        Self {
            worlds: create_initial_worlds(),
        }
    }
}

impl ProgressionLedger {
    pub fn from_worlds(worlds: Vec<World>) -> Self {
        Self { worlds }
    }

    pub fn world(&self, id: WorldId) -> Option<&World> {
        self.worlds.iter().find(|world| world.id == id)
    }

    pub fn level(&self, id: &LevelId) -> Option<&Level> {
        self.worlds.iter().find_map(|world| world.level(id))
    }

    /// Derived view; the world flags are the only stored copy.
    pub fn unlocked_world_ids(&self) -> BTreeSet<WorldId> {
        self.worlds
            .iter()
            .filter(|world| world.unlocked)
            .map(|world| world.id)
            .collect()
    }

    fn locate(&self, id: &LevelId) -> Option<(usize, usize)> {
        self.worlds.iter().enumerate().find_map(|(w, world)| {
            world
                .levels
                .iter()
                .position(|level| &level.id == id)
                .map(|l| (w, l))
        })
    }
}

/// The result of one play-through as reported by the level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub stars: u8,
    pub time_secs: u32,
    pub brain_stars: u32,
    pub fragments: u32,
}

impl RunResult {
    /// Star rating as stored on the level.
    pub fn rated_stars(&self) -> u8 {
        self.stars.min(MAX_STARS)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub first_clear: bool,
    pub unlocked_level: Option<LevelId>,
    pub completed_worlds: Vec<WorldId>,
    pub unlocked_worlds: Vec<WorldId>,
}

/// Merge a run into the level's ledger fields, keeping the better of old and new.
///
/// Returns true when the best time improved.
pub fn merge_best(level: &mut Level, result: &RunResult) -> bool {
    level.completed = true;
    level.stars = level.stars.max(result.rated_stars());
    level.brain_stars_collected = level.brain_stars_collected.max(result.brain_stars);
    level.memory_fragments_collected = level
        .memory_fragments_collected
        .max(result.fragments);

    match level.best_time {
        Some(best) if best <= result.time_secs => false,
        _ => {
            level.best_time = Some(result.time_secs);
            true
        }
    }
}

/// Record a completed run: best-of merge, successor unlock, world cascade.
///
/// Returns `None` without touching anything when the level id does not resolve.
pub fn record_completion(
    ledger: &mut ProgressionLedger,
    level_id: &LevelId,
    result: &RunResult,
    log: &mut ProgressionLog,
) -> Option<CompletionOutcome> {
    let (world_idx, level_idx) = ledger.locate(level_id)?;
    let mut outcome = CompletionOutcome::default();

    let world = &mut ledger.worlds[world_idx];
    let level = &mut world.levels[level_idx];
    outcome.first_clear = !level.completed;
    let improved_time = merge_best(level, result);
    let level_number = level.level_number;

    log.push(ProgressionEvent::LevelCompleted {
        level: level_id.clone(),
        stars: result.rated_stars(),
        first_clear: outcome.first_clear,
    });
    if improved_time {
        log.push(ProgressionEvent::NewBestTime {
            level: level_id.clone(),
            secs: result.time_secs,
        });
    }

    if let Some(next) = world
        .levels
        .iter_mut()
        .find(|candidate| candidate.level_number == level_number + 1)
    {
        if !next.unlocked {
            next.unlocked = true;
            debug!("unlocked level {}", next.id);
            log.push(ProgressionEvent::LevelUnlocked {
                level: next.id.clone(),
            });
            outcome.unlocked_level = Some(next.id.clone());
        }
    }

    let (completed, unlocked) = cascade_world_completion(ledger, log);
    outcome.completed_worlds = completed;
    outcome.unlocked_worlds = unlocked;
    Some(outcome)
}

/// Recompute `completed` for every world. A world whose flag flips to true for
/// the first time unlocks the next world by id together with its first level.
pub fn cascade_world_completion(
    ledger: &mut ProgressionLedger,
    log: &mut ProgressionLog,
) -> (Vec<WorldId>, Vec<WorldId>) {
    let newly_completed: Vec<WorldId> = ledger
        .worlds
        .iter_mut()
        .filter(|world| !world.completed && world.all_levels_completed())
        .map(|world| {
            world.completed = true;
            world.id
        })
        .collect();

    let mut unlocked = Vec::new();
    for world_id in &newly_completed {
        info!("world {} completed", world_id);
        log.push(ProgressionEvent::WorldCompleted { world: *world_id });
        let Some(next) = world_id.next() else {
            continue;
        };
        if open_world(ledger, next, log) {
            unlocked.push(next);
        }
    }
    (newly_completed, unlocked)
}

/// Direct unlock that bypasses the completion cascade.
///
/// Returns false when no world has that id.
pub fn unlock_world(
    ledger: &mut ProgressionLedger,
    world_id: WorldId,
    log: &mut ProgressionLog,
) -> bool {
    if ledger.world(world_id).is_none() {
        debug!("unlock_world ignored unknown world {}", world_id);
        return false;
    }
    open_world(ledger, world_id, log);
    true
}

/// Unlock a world and force-unlock its first level. Returns true if the world was locked.
fn open_world(ledger: &mut ProgressionLedger, world_id: WorldId, log: &mut ProgressionLog) -> bool {
    let Some(world) = ledger.worlds.iter_mut().find(|world| world.id == world_id) else {
        return false;
    };
    let was_locked = !world.unlocked;
    world.unlocked = true;
    if was_locked {
        log.push(ProgressionEvent::WorldUnlocked { world: world_id });
    }
    if let Some(first) = world.levels.iter_mut().min_by_key(|level| level.level_number) {
        if !first.unlocked {
            first.unlocked = true;
            log.push(ProgressionEvent::LevelUnlocked {
                level: first.id.clone(),
            });
        }
    }
    was_locked
}
