use bevy_ecs::prelude::*;

use crate::components::progression::{LevelId, WorldId};
use crate::data::shop::ShopItem;

/// Something observable that a mutation caused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressionEvent {
    LevelCompleted { level: LevelId, stars: u8, first_clear: bool },
    NewBestTime { level: LevelId, secs: u32 },
    LevelUnlocked { level: LevelId },
    WorldCompleted { world: WorldId },
    WorldUnlocked { world: WorldId },
    UnknownLevel { level: LevelId },
    Purchased { item: ShopItem },
    PurchaseRejected { item: ShopItem, cost: u32, balance: u32 },
    AccessoryEquipped { accessory: String },
    HintUsed { remaining: u32 },
    PremiumUnlocked,
    ProgressReset,
}

impl std::fmt::Display for ProgressionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressionEvent::LevelCompleted {
                level,
                stars,
                first_clear,
            } => {
                let tag = if *first_clear { " (first clear)" } else { "" };
                write!(f, "Level {} completed with {} star(s){}", level, stars, tag)
            }
            ProgressionEvent::NewBestTime { level, secs } => {
                write!(f, "New best time on {}: {}s", level, secs)
            }
            ProgressionEvent::LevelUnlocked { level } => write!(f, "Level {} unlocked", level),
            ProgressionEvent::WorldCompleted { world } => write!(f, "World {} completed", world),
            ProgressionEvent::WorldUnlocked { world } => write!(f, "World {} unlocked", world),
            ProgressionEvent::UnknownLevel { level } => write!(f, "Unknown level {}", level),
            ProgressionEvent::Purchased { item } => write!(f, "Purchased {}", item.label()),
            ProgressionEvent::PurchaseRejected {
                item,
                cost,
                balance,
            } => write!(
                f,
                "Cannot afford {} ({} brain stars, have {})",
                item.label(),
                cost,
                balance
            ),
            ProgressionEvent::AccessoryEquipped { accessory } => {
                write!(f, "Equipped accessory {}", accessory)
            }
            ProgressionEvent::HintUsed { remaining } => {
                write!(f, "Hint used, {} remaining", remaining)
            }
            ProgressionEvent::PremiumUnlocked => write!(f, "Premium unlocked"),
            ProgressionEvent::ProgressReset => write!(f, "Progress reset"),
        }
    }
}

/// Events produced by the most recent mutation. Cleared at the start of each apply.
#[derive(Resource, Debug, Clone, Default)]
pub struct ProgressionLog(pub Vec<ProgressionEvent>);

impl ProgressionLog {
    pub fn push(&mut self, event: ProgressionEvent) {
        self.0.push(event);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
