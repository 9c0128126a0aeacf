use crate::components::progression::{
    Difficulty, Emotion, Level, LevelId, PuzzleType, World, WorldId,
};

/// How a world assigns puzzle mechanics to its levels.
#[derive(Debug, Clone, Copy)]
enum Mechanics {
    Fixed(PuzzleType),
    Rotating(&'static [PuzzleType]),
}

/// Difficulty for level index `i` (0-based) is `min(i + offset, 5)`, or a flat rating.
#[derive(Debug, Clone, Copy)]
enum DifficultyCurve {
    Ramp { offset: u32, cap: u32 },
    Flat(u32),
}

struct WorldTemplate {
    id: u32,
    name: &'static str,
    theme: &'static str,
    description: &'static str,
    color: &'static str,
    background: &'static str,
    level_prefix: &'static str,
    level_count: u32,
    mechanics: Mechanics,
    difficulty: DifficultyCurve,
    required_emotion: Option<Emotion>,
}

const DREAM_ROTATION: &[PuzzleType] = &[
    PuzzleType::EmotionShift,
    PuzzleType::MemoryReplay,
    PuzzleType::LightMirror,
    PuzzleType::RubeGoldberg,
];

const WORLD_TEMPLATES: &[WorldTemplate] = &[
    WorldTemplate {
        id: 1,
        name: "Joyful Jungle",
        theme: "Bright rainforest with bouncy platforms",
        description: "Welcome to your first adventure! Learn the basics of emotion-based puzzles.",
        color: "#22c55e",
        background: "gradient-joy",
        level_prefix: "Jungle Joy",
        level_count: 10,
        mechanics: Mechanics::Fixed(PuzzleType::EmotionShift),
        difficulty: DifficultyCurve::Ramp { offset: 1, cap: 3 },
        required_emotion: Some(Emotion::Joy),
    },
    WorldTemplate {
        id: 2,
        name: "Circuit Caves",
        theme: "Technological underground with logic puzzles",
        description: "Master complex machinery and Rube Goldberg contraptions.",
        color: "#3b82f6",
        background: "gradient-energy",
        level_prefix: "Circuit",
        level_count: 10,
        mechanics: Mechanics::Fixed(PuzzleType::RubeGoldberg),
        difficulty: DifficultyCurve::Ramp { offset: 2, cap: 5 },
        required_emotion: Some(Emotion::Curiosity),
    },
    WorldTemplate {
        id: 3,
        name: "Shadow Shores",
        theme: "Mystical beaches with light manipulation",
        description: "Harness the power of light and shadow to solve ancient mysteries.",
        color: "#8b5cf6",
        background: "gradient-mystery",
        level_prefix: "Shadow",
        level_count: 10,
        mechanics: Mechanics::Fixed(PuzzleType::LightMirror),
        difficulty: DifficultyCurve::Ramp { offset: 2, cap: 5 },
        required_emotion: Some(Emotion::Sadness),
    },
    WorldTemplate {
        id: 4,
        name: "Memory Meadows",
        theme: "Nostalgic landscapes with time puzzles",
        description: "Travel through time and replay memories to unlock the future.",
        color: "#f59e0b",
        background: "gradient-cosmic",
        level_prefix: "Memory",
        level_count: 10,
        mechanics: Mechanics::Fixed(PuzzleType::MemoryReplay),
        difficulty: DifficultyCurve::Ramp { offset: 2, cap: 5 },
        required_emotion: None,
    },
    WorldTemplate {
        id: 5,
        name: "MindMelt Volcano",
        theme: "Intense volcanic challenges with time pressure",
        description: "Face the ultimate test of speed and precision in the fiery depths.",
        color: "#ef4444",
        background: "gradient-energy",
        level_prefix: "Volcano",
        level_count: 10,
        mechanics: Mechanics::Fixed(PuzzleType::GravityFlip),
        difficulty: DifficultyCurve::Ramp { offset: 3, cap: 5 },
        required_emotion: Some(Emotion::Anger),
    },
    WorldTemplate {
        id: 6,
        name: "Dreamvoid",
        theme: "Surreal dimension with mixed mechanics",
        description: "Enter the realm where reality bends and emotions shape the world.",
        color: "#a855f7",
        background: "gradient-mystery",
        level_prefix: "Dream",
        level_count: 10,
        mechanics: Mechanics::Rotating(DREAM_ROTATION),
        difficulty: DifficultyCurve::Ramp { offset: 3, cap: 5 },
        required_emotion: None,
    },
    WorldTemplate {
        id: 7,
        name: "Nyro's Core",
        theme: "AI Boss battles and ultimate challenges",
        description: "Face the AI overlord Nyro in the final showdown of minds.",
        color: "#06b6d4",
        background: "gradient-cosmic",
        level_prefix: "Boss",
        level_count: 5,
        mechanics: Mechanics::Fixed(PuzzleType::Boss),
        difficulty: DifficultyCurve::Flat(5),
        required_emotion: None,
    },
];

/// Build the canonical world/level graph.
///
/// Deterministic: every call yields an identical graph. Only world 1 and its
/// first level start unlocked.
pub fn create_initial_worlds() -> Vec<World> {
    WORLD_TEMPLATES.iter().map(build_world).collect()
}

fn build_world(template: &WorldTemplate) -> World {
    let world_id = WorldId(template.id);
    let starts_unlocked = template.id == 1;

    let levels = (0..template.level_count)
        .map(|index| {
            let level_number = index + 1;
            let puzzle_type = match template.mechanics {
                Mechanics::Fixed(kind) => kind,
                Mechanics::Rotating(cycle) => cycle[index as usize % cycle.len()],
            };
            let difficulty = match template.difficulty {
                DifficultyCurve::Ramp { offset, cap } => (index + offset).min(cap),
                DifficultyCurve::Flat(value) => value,
            };
            Level {
                id: LevelId::new(world_id, level_number),
                world_id,
                level_number,
                name: format!("{} {}", template.level_prefix, level_number),
                puzzle_type,
                difficulty: Difficulty::clamped(difficulty),
                required_emotion: template.required_emotion,
                completed: false,
                stars: 0,
                best_time: None,
                brain_stars_collected: 0,
                memory_fragments_collected: 0,
                unlocked: starts_unlocked && index == 0,
            }
        })
        .collect();

    World {
        id: world_id,
        name: template.name.to_string(),
        theme: template.theme.to_string(),
        description: template.description.to_string(),
        color: template.color.to_string(),
        background: template.background.to_string(),
        levels,
        unlocked: starts_unlocked,
        completed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_deterministic() {
        assert_eq!(create_initial_worlds(), create_initial_worlds());
    }

    #[test]
    fn only_first_world_and_level_start_unlocked() {
        let worlds = create_initial_worlds();
        assert_eq!(worlds.len(), 7);
        for world in &worlds {
            assert_eq!(world.unlocked, world.id == WorldId(1));
            assert!(!world.completed);
            for level in &world.levels {
                let expected = world.id == WorldId(1) && level.level_number == 1;
                assert_eq!(level.unlocked, expected, "level {}", level.id);
            }
        }
    }

    #[test]
    fn levels_are_densely_numbered() {
        for world in create_initial_worlds() {
            assert!(!world.levels.is_empty());
            for (index, level) in world.levels.iter().enumerate() {
                assert_eq!(level.level_number, index as u32 + 1);
                assert_eq!(level.world_id, world.id);
            }
        }
    }

    #[test]
    fn difficulty_curves_match_world_tiers() {
        let worlds = create_initial_worlds();
        let jungle: Vec<u8> = worlds[0].levels.iter().map(|l| l.difficulty.get()).collect();
        assert_eq!(jungle, vec![1, 2, 3, 3, 3, 3, 3, 3, 3, 3]);
        assert_eq!(worlds[1].levels[0].difficulty.get(), 2);
        assert_eq!(worlds[4].levels[0].difficulty.get(), 3);
        assert_eq!(worlds[6].levels.len(), 5);
        assert!(worlds[6].levels.iter().all(|l| l.difficulty.get() == 5));
    }

    #[test]
    fn dreamvoid_rotates_mechanics() {
        let worlds = create_initial_worlds();
        let dream = &worlds[5];
        assert_eq!(dream.levels[0].puzzle_type, PuzzleType::EmotionShift);
        assert_eq!(dream.levels[3].puzzle_type, PuzzleType::RubeGoldberg);
        assert_eq!(dream.levels[4].puzzle_type, PuzzleType::EmotionShift);
    }
}
