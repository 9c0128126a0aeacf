use bevy_ecs::prelude::*;
use bevy_utils::tracing::{debug, info, warn};

use crate::components::player::PlayerProfile;
use crate::components::progression::LevelId;
use crate::components::session::{Screen, Session};
use crate::components::settings::{Entitlements, Settings};
use crate::core::world::{ActionQueue, ProgressionIntent};
use crate::rules::patch::{apply_player_patch, apply_settings_patch};
use crate::simulation::economy;
use crate::simulation::events::{ProgressionEvent, ProgressionLog};
use crate::simulation::level_run::LevelRun;
use crate::simulation::progression::{record_completion, unlock_world, ProgressionLedger, RunResult};

/// Mutable view over every resource an intent may touch.
pub struct StateMut<'a> {
    pub session: &'a mut Session,
    pub player: &'a mut PlayerProfile,
    pub ledger: &'a mut ProgressionLedger,
    pub settings: &'a mut Settings,
    pub premium: &'a mut Entitlements,
    pub run: &'a mut LevelRun,
    pub log: &'a mut ProgressionLog,
}

/// System: Drains queued intents and applies them in order.
#[allow(clippy::too_many_arguments)]
pub fn apply_intents_system(
    mut queue: ResMut<ActionQueue>,
    mut session: ResMut<Session>,
    mut player: ResMut<PlayerProfile>,
    mut ledger: ResMut<ProgressionLedger>,
    mut settings: ResMut<Settings>,
    mut premium: ResMut<Entitlements>,
    mut run: ResMut<LevelRun>,
    mut log: ResMut<ProgressionLog>,
) {
    let mut state = StateMut {
        session: &mut *session,
        player: &mut *player,
        ledger: &mut *ledger,
        settings: &mut *settings,
        premium: &mut *premium,
        run: &mut *run,
        log: &mut *log,
    };
    for intent in queue.0.drain(..) {
        apply_intent(&mut state, intent);
    }
}

pub fn apply_intent(state: &mut StateMut<'_>, intent: ProgressionIntent) {
    match intent {
        ProgressionIntent::SetCurrentScreen(screen) => state.session.current_screen = screen,
        ProgressionIntent::SetCurrentWorld(world) => state.session.current_world = world,
        ProgressionIntent::SetCurrentLevel(level) => state.session.current_level = level,
        ProgressionIntent::SetIsPlaying(playing) => state.session.set_playing(playing),
        ProgressionIntent::SetIsPaused(paused) => state.session.set_paused(paused),
        ProgressionIntent::UpdatePlayer(patch) => apply_player_patch(state.player, patch),
        ProgressionIntent::CompleteLevel { level_id, result } => {
            complete_level(state, &level_id, &result)
        }
        ProgressionIntent::UnlockWorld(world_id) => {
            unlock_world(state.ledger, world_id, state.log);
        }
        ProgressionIntent::ChangeEmotion(emotion) => {
            state.player.current_emotion = emotion;
            if state.session.current_level.is_some() && state.session.clock_running() {
                state.run.emotion_used = true;
            }
        }
        ProgressionIntent::ChooseEmotion(emotion) => {
            state.player.customization.emotion = emotion;
            state.player.current_emotion = emotion;
        }
        ProgressionIntent::SpendHints(amount) => economy::spend_hints(state.player, amount),
        ProgressionIntent::AddHints(amount) => economy::add_hints(state.player, amount),
        ProgressionIntent::SpendBrainStars(amount) => {
            economy::spend_brain_stars(state.player, amount)
        }
        ProgressionIntent::AddBrainStars(amount) => economy::add_brain_stars(state.player, amount),
        ProgressionIntent::UpdateSettings(patch) => apply_settings_patch(state.settings, patch),
        ProgressionIntent::UnlockPremium => {
            state.premium.unlock_premium();
            state.log.push(ProgressionEvent::PremiumUnlocked);
        }
        ProgressionIntent::ResetProgress => reset_progress(state),
        ProgressionIntent::Purchase(item) => {
            economy::purchase(state.player, state.premium, item, state.log);
        }
        ProgressionIntent::EquipAccessory(accessory) => {
            economy::equip_accessory(state.player, &accessory, state.log);
        }
        ProgressionIntent::UseHint => {
            economy::use_hint(state.player, state.log);
        }
        ProgressionIntent::StartRun(level_id) => start_run(state, level_id),
        ProgressionIntent::RestartRun => {
            state.run.reset();
            state.session.set_playing(true);
        }
        ProgressionIntent::TogglePlay => state.session.toggle_play(),
        ProgressionIntent::TickClock(secs) => {
            if state.session.clock_running() {
                state.run.advance(secs);
            }
        }
        ProgressionIntent::Interact(interaction) => {
            if state.session.current_level.is_none() || !state.session.clock_running() {
                debug!("interaction ignored outside a running level");
                return;
            }
            state.run.interact(interaction);
            if state.run.is_solved() {
                finish_run(state);
            }
        }
        ProgressionIntent::LeaveLevel => {
            state.session.current_screen = Screen::Worlds;
            state.session.current_level = None;
            state.session.set_playing(false);
            state.session.set_paused(false);
            state.run.reset();
        }
    }
}

/// Ledger update plus player credit. Credit only follows a successful ledger match.
fn complete_level(state: &mut StateMut<'_>, level_id: &LevelId, result: &RunResult) {
    match record_completion(state.ledger, level_id, result, state.log) {
        Some(outcome) => {
            economy::credit_completion(state.player, level_id, result);
            info!(
                "completed level {} ({} stars, {}s, first clear: {})",
                level_id,
                result.rated_stars(),
                result.time_secs,
                outcome.first_clear
            );
        }
        None => {
            warn!("completeLevel ignored unknown level {}", level_id);
            state.log.push(ProgressionEvent::UnknownLevel {
                level: level_id.clone(),
            });
        }
    }
}

fn start_run(state: &mut StateMut<'_>, level_id: LevelId) {
    let Some(level) = state.ledger.level(&level_id) else {
        warn!("cannot start unknown level {}", level_id);
        return;
    };
    if !level.unlocked {
        debug!("level {} is locked", level_id);
        return;
    }
    state.session.current_world = Some(level.world_id);
    state.session.current_level = Some(level_id);
    state.session.current_screen = Screen::Level;
    state.run.reset();
    state.session.set_playing(true);
}

fn finish_run(state: &mut StateMut<'_>) {
    let Some(level_id) = state.session.current_level.clone() else {
        return;
    };
    let result = state.run.result();
    complete_level(state, &level_id, &result);
    state.session.set_playing(false);
    state.session.current_screen = Screen::Worlds;
    state.run.reset();
}

fn reset_progress(state: &mut StateMut<'_>) {
    *state.player = PlayerProfile::default();
    *state.ledger = ProgressionLedger::default();
    state.session.current_world = None;
    state.session.current_level = None;
    state.run.reset();
    state.log.push(ProgressionEvent::ProgressReset);
    info!("progress reset to catalog defaults");
}
