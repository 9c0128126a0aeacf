pub mod catalog;
pub mod shop;

pub use catalog::create_initial_worlds;
pub use shop::{ShopItem, ShopReward, ACCESSORY_COST, SKIN_COLORS};
