use bevy_ecs::prelude::*;

use crate::rules::scoring::{brain_stars_for, stars_for_time};
use crate::simulation::progression::RunResult;

pub const REQUIRED_BLOCKS: u32 = 2;
pub const REQUIRED_ORBS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Block,
    Orb,
}

/// In-progress play-through of the current level. Transient, never persisted.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelRun {
    pub elapsed_secs: u32,
    pub blocks_activated: u32,
    pub orbs_collected: u32,
    pub fragments_collected: u32,
    pub emotion_used: bool,
}

impl LevelRun {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn advance(&mut self, secs: u32) {
        self.elapsed_secs = self.elapsed_secs.saturating_add(secs);
    }

    /// Each orb also yields a memory fragment.
    pub fn interact(&mut self, interaction: Interaction) {
        match interaction {
            Interaction::Block => self.blocks_activated += 1,
            Interaction::Orb => {
                self.orbs_collected += 1;
                self.fragments_collected += 1;
            }
        }
    }

    pub fn is_solved(&self) -> bool {
        self.blocks_activated >= REQUIRED_BLOCKS
            && self.orbs_collected >= REQUIRED_ORBS
            && self.emotion_used
    }

    /// Score the run from its elapsed time.
    pub fn result(&self) -> RunResult {
        let stars = stars_for_time(self.elapsed_secs);
        RunResult {
            stars,
            time_secs: self.elapsed_secs,
            brain_stars: brain_stars_for(stars),
            fragments: self.fragments_collected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn puzzle_needs_blocks_orbs_and_emotion() {
        let mut run = LevelRun::default();
        run.interact(Interaction::Block);
        run.interact(Interaction::Block);
        run.interact(Interaction::Orb);
        run.interact(Interaction::Orb);
        assert!(!run.is_solved());
        run.emotion_used = true;
        assert!(run.is_solved());
    }

    #[test]
    fn result_scores_elapsed_time() {
        let mut run = LevelRun::default();
        run.advance(45);
        run.interact(Interaction::Orb);
        let result = run.result();
        assert_eq!(result.stars, 3);
        assert_eq!(result.brain_stars, 30);
        assert_eq!(result.fragments, 1);
        assert_eq!(result.time_secs, 45);
    }
}
