use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rules::ParseEnumError;

/// Highest star rating a single level can hold.
pub const MAX_STARS: u8 = 3;

/// Stable, globally unique level identifier (`"<world>-<number>"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelId(pub String);

impl LevelId {
    pub fn new(world: WorldId, level_number: u32) -> Self {
        Self(format!("{}-{}", world.0, level_number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LevelId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// World identifier, which doubles as the unlock order (1..N).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WorldId(pub u32);

impl WorldId {
    /// `None` past the last representable id.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PuzzleType {
    EmotionShift,
    MemoryReplay,
    LightMirror,
    RubeGoldberg,
    GravityFlip,
    Boss,
}

impl PuzzleType {
    pub fn as_str(self) -> &'static str {
        match self {
            PuzzleType::EmotionShift => "emotion-shift",
            PuzzleType::MemoryReplay => "memory-replay",
            PuzzleType::LightMirror => "light-mirror",
            PuzzleType::RubeGoldberg => "rube-goldberg",
            PuzzleType::GravityFlip => "gravity-flip",
            PuzzleType::Boss => "boss",
        }
    }
}

/// Emotion used as a puzzle mechanic selector. The engine stores it but never gates on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Emotion {
    #[default]
    Joy,
    Curiosity,
    Sadness,
    Anger,
}

impl Emotion {
    pub const ALL: [Emotion; 4] = [
        Emotion::Joy,
        Emotion::Curiosity,
        Emotion::Sadness,
        Emotion::Anger,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Curiosity => "curiosity",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
        }
    }
}

impl FromStr for Emotion {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "joy" => Ok(Emotion::Joy),
            "curiosity" => Ok(Emotion::Curiosity),
            "sadness" => Ok(Emotion::Sadness),
            "anger" => Ok(Emotion::Anger),
            _ => Err(ParseEnumError {
                value: s.to_string(),
            }),
        }
    }
}

/// Difficulty rating, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Clamp an arbitrary rating into the valid range.
    pub fn clamped(value: u32) -> Self {
        Self(value.clamp(Self::MIN as u32, Self::MAX as u32) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!("difficulty {} out of range", value))
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.0
    }
}

/// A single puzzle: immutable catalog template plus the mutable ledger fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    pub world_id: WorldId,
    pub level_number: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub puzzle_type: PuzzleType,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub required_emotion: Option<Emotion>,

    pub completed: bool,
    pub stars: u8,
    /// Fastest completion in seconds.
    #[serde(default)]
    pub best_time: Option<u32>,
    pub brain_stars_collected: u32,
    pub memory_fragments_collected: u32,
    pub unlocked: bool,
}

/// Top-level content unit holding levels ordered by `level_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    pub id: WorldId,
    pub name: String,
    pub theme: String,
    pub description: String,
    pub color: String,
    pub background: String,
    pub levels: Vec<Level>,
    pub unlocked: bool,
    pub completed: bool,
}

impl World {
    pub fn level(&self, id: &LevelId) -> Option<&Level> {
        self.levels.iter().find(|level| &level.id == id)
    }

    pub fn all_levels_completed(&self) -> bool {
        self.levels.iter().all(|level| level.completed)
    }

    pub fn completed_count(&self) -> usize {
        self.levels.iter().filter(|level| level.completed).count()
    }

    pub fn earned_stars(&self) -> u32 {
        self.levels.iter().map(|level| level.stars as u32).sum()
    }

    pub fn max_stars(&self) -> u32 {
        self.levels.len() as u32 * MAX_STARS as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_id_formats_world_and_number() {
        assert_eq!(LevelId::new(WorldId(3), 7).as_str(), "3-7");
    }

    #[test]
    fn world_id_successor_stops_at_the_last_id() {
        assert_eq!(WorldId(6).next(), Some(WorldId(7)));
        assert_eq!(WorldId(u32::MAX).next(), None);
    }

    #[test]
    fn difficulty_rejects_out_of_range_values() {
        assert!(Difficulty::try_from(0).is_err());
        assert!(Difficulty::try_from(6).is_err());
        assert_eq!(Difficulty::clamped(9).get(), 5);
        assert_eq!(Difficulty::clamped(0).get(), 1);
    }

    #[test]
    fn emotion_parses_lowercase_names() {
        assert_eq!("sadness".parse::<Emotion>().unwrap(), Emotion::Sadness);
        assert!("rage".parse::<Emotion>().is_err());
    }
}
