use bevy_utils::tracing::debug;

use crate::components::player::PlayerProfile;
use crate::components::progression::LevelId;
use crate::components::settings::Entitlements;
use crate::data::shop::{ShopItem, ShopReward, ACCESSORY_COST};
use crate::simulation::events::{ProgressionEvent, ProgressionLog};
use crate::simulation::progression::RunResult;

pub const XP_PER_STAR: u64 = 100;

/// Credit a completed run to the player.
///
/// Currencies accumulate on every call, unlike the per-level best-of record.
pub fn credit_completion(player: &mut PlayerProfile, level_id: &LevelId, result: &RunResult) {
    player.brain_stars = player.brain_stars.saturating_add(result.brain_stars);
    player.memory_fragments = player.memory_fragments.saturating_add(result.fragments);
    player.experience = player
        .experience
        .saturating_add(result.rated_stars() as u64 * XP_PER_STAR);
    player.completed_levels.insert(level_id.clone());
}

/// Spending clamps at zero instead of failing.
pub fn spend_hints(player: &mut PlayerProfile, amount: u32) {
    player.hints = player.hints.saturating_sub(amount);
}

pub fn add_hints(player: &mut PlayerProfile, amount: u32) {
    player.hints = player.hints.saturating_add(amount);
}

pub fn spend_brain_stars(player: &mut PlayerProfile, amount: u32) {
    player.brain_stars = player.brain_stars.saturating_sub(amount);
}

pub fn add_brain_stars(player: &mut PlayerProfile, amount: u32) {
    player.brain_stars = player.brain_stars.saturating_add(amount);
}

/// Spend one hint if any remain.
pub fn use_hint(player: &mut PlayerProfile, log: &mut ProgressionLog) -> bool {
    if player.hints == 0 {
        return false;
    }
    spend_hints(player, 1);
    log.push(ProgressionEvent::HintUsed {
        remaining: player.hints,
    });
    true
}

/// Buy a shop item. Unlike the raw spend operations this checks the balance first.
pub fn purchase(
    player: &mut PlayerProfile,
    entitlements: &mut Entitlements,
    item: ShopItem,
    log: &mut ProgressionLog,
) -> bool {
    let cost = item.cost();
    if player.brain_stars < cost {
        debug!("purchase of {} rejected", item.id());
        log.push(ProgressionEvent::PurchaseRejected {
            item,
            cost,
            balance: player.brain_stars,
        });
        return false;
    }

    spend_brain_stars(player, cost);
    match item.reward() {
        ShopReward::Hints(amount) => add_hints(player, amount),
        ShopReward::BrainStars(amount) => add_brain_stars(player, amount),
        ShopReward::Premium => {
            entitlements.unlock_premium();
            log.push(ProgressionEvent::PremiumUnlocked);
        }
    }
    log.push(ProgressionEvent::Purchased { item });
    true
}

pub fn equip_accessory(
    player: &mut PlayerProfile,
    accessory: &str,
    log: &mut ProgressionLog,
) -> bool {
    if player.brain_stars < ACCESSORY_COST {
        return false;
    }
    spend_brain_stars(player, ACCESSORY_COST);
    player.customization.accessory = accessory.to_string();
    log.push(ProgressionEvent::AccessoryEquipped {
        accessory: accessory.to_string(),
    });
    true
}
