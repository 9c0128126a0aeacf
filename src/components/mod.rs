pub mod player;
pub mod progression;
pub mod session;
pub mod settings;

pub use player::{Customization, PlayerProfile};
pub use progression::{Difficulty, Emotion, Level, LevelId, PuzzleType, World, WorldId, MAX_STARS};
pub use session::{PlayState, Screen, Session};
pub use settings::{Entitlements, GraphicsQuality, Settings};
