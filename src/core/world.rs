use std::collections::BTreeSet;
use std::path::Path;

use bevy_ecs::schedule::Schedule;
use bevy_ecs::system::Resource;
use bevy_ecs::world::World as EcsWorld;
use bevy_utils::tracing::{info, warn};

use crate::components::player::PlayerProfile;
use crate::components::progression::{Emotion, Level, LevelId, World, WorldId};
use crate::components::session::{PlayState, Screen, Session};
use crate::components::settings::{Entitlements, Settings};
use crate::core::config::EngineConfig;
use crate::core::ecs::{create_schedule, create_world};
use crate::core::serialization::{
    apply_state_to_world, extract_state_from_world, load_state_from_path, save_state_to_path,
    SaveState,
};
use crate::data::shop::ShopItem;
use crate::persistence::{load_or_default, write_state, LoadOutcome, SaveSlot, SaveSlotError};
use crate::rules::patch::{PlayerPatch, SettingsPatch};
use crate::simulation::events::{ProgressionEvent, ProgressionLog};
use crate::simulation::level_run::{Interaction, LevelRun};
use crate::simulation::progression::{ProgressionLedger, RunResult};

/// Every mutation the state container accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressionIntent {
    SetCurrentScreen(Screen),
    SetCurrentWorld(Option<WorldId>),
    SetCurrentLevel(Option<LevelId>),
    SetIsPlaying(bool),
    SetIsPaused(bool),
    UpdatePlayer(PlayerPatch),
    CompleteLevel { level_id: LevelId, result: RunResult },
    UnlockWorld(WorldId),
    /// Session mechanic selector only; customization is untouched.
    ChangeEmotion(Emotion),
    /// Character screen choice: sets the default emotion and the current one.
    ChooseEmotion(Emotion),
    SpendHints(u32),
    AddHints(u32),
    SpendBrainStars(u32),
    AddBrainStars(u32),
    UpdateSettings(SettingsPatch),
    UnlockPremium,
    ResetProgress,
    Purchase(ShopItem),
    EquipAccessory(String),
    UseHint,
    StartRun(LevelId),
    RestartRun,
    TogglePlay,
    TickClock(u32),
    Interact(Interaction),
    LeaveLevel,
}

/// Resource storing the intents for the next pass.
#[derive(Resource, Default, Debug)]
pub struct ActionQueue(pub Vec<ProgressionIntent>);

/// Owned copy of the whole state, captured after a mutation completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub current_screen: Screen,
    pub current_world: Option<WorldId>,
    pub current_level: Option<LevelId>,
    pub is_playing: bool,
    pub is_paused: bool,
    pub player: PlayerProfile,
    pub worlds: Vec<World>,
    pub settings: Settings,
    pub premium: Entitlements,
    pub run: LevelRun,
    pub events: Vec<ProgressionEvent>,
}

impl Snapshot {
    fn capture(world: &EcsWorld) -> Self {
        let session = world.resource::<Session>();
        Self {
            current_screen: session.current_screen,
            current_world: session.current_world,
            current_level: session.current_level.clone(),
            is_playing: session.is_playing,
            is_paused: session.is_paused,
            player: world.resource::<PlayerProfile>().clone(),
            worlds: world.resource::<ProgressionLedger>().worlds.clone(),
            settings: world.resource::<Settings>().clone(),
            premium: world.resource::<Entitlements>().clone(),
            run: world.resource::<LevelRun>().clone(),
            events: world.resource::<ProgressionLog>().0.clone(),
        }
    }

    pub fn world(&self, id: WorldId) -> Option<&World> {
        self.worlds.iter().find(|world| world.id == id)
    }

    pub fn level(&self, id: &LevelId) -> Option<&Level> {
        self.worlds.iter().find_map(|world| world.level(id))
    }

    /// Derived from the world flags.
    pub fn unlocked_worlds(&self) -> BTreeSet<WorldId> {
        self.worlds
            .iter()
            .filter(|world| world.unlocked)
            .map(|world| world.id)
            .collect()
    }

    pub fn play_state(&self) -> PlayState {
        Session {
            current_screen: self.current_screen,
            current_world: self.current_world,
            current_level: self.current_level.clone(),
            is_playing: self.is_playing,
            is_paused: self.is_paused,
        }
        .play_state()
    }
}

/// The state container: owns all progression state and the save slot behind it.
pub struct Game {
    world: EcsWorld,
    schedule: Schedule,
    slot: Option<Box<dyn SaveSlot>>,
    config: EngineConfig,
    load_outcome: LoadOutcome,
}

impl Game {
    /// Fresh catalog defaults with no durable slot.
    pub fn new() -> Self {
        Self::from_state(SaveState::default(), EngineConfig::in_memory())
    }

    pub fn from_state(state: SaveState, config: EngineConfig) -> Self {
        Self {
            world: create_world(state),
            schedule: create_schedule(),
            slot: None,
            config,
            load_outcome: LoadOutcome::Missing,
        }
    }

    /// Rehydrate from the slot, or start from defaults when it holds nothing usable.
    pub fn open(slot: Box<dyn SaveSlot>, config: EngineConfig) -> Self {
        let (state, outcome) = load_or_default(slot.as_ref(), &config.slot_key);
        let mut game = Self::from_state(state, config);
        game.slot = Some(slot);
        game.load_outcome = outcome;
        game
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Hand the slot back, e.g. to reopen it as a new session.
    pub fn into_slot(self) -> Option<Box<dyn SaveSlot>> {
        self.slot
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.world)
    }

    /// Apply one mutation, write through, and return the resulting snapshot.
    pub fn apply(&mut self, intent: ProgressionIntent) -> Snapshot {
        self.apply_all(vec![intent])
    }

    /// Apply mutations in order as one pass, persisting once at the end.
    pub fn apply_all(&mut self, intents: Vec<ProgressionIntent>) -> Snapshot {
        self.world.resource_mut::<ActionQueue>().0 = intents;
        self.schedule.run(&mut self.world);
        if self.config.write_through {
            if let Err(err) = self.persist() {
                warn!("write-through to slot {} failed: {}", self.config.slot_key, err);
            }
        }
        self.snapshot()
    }

    /// Force a write regardless of the write-through setting.
    pub fn flush(&mut self) -> Result<(), SaveSlotError> {
        self.persist()
    }

    fn persist(&mut self) -> Result<(), SaveSlotError> {
        let Some(slot) = self.slot.as_mut() else {
            return Ok(());
        };
        let state = extract_state_from_world(&self.world);
        write_state(slot.as_mut(), &self.config.slot_key, &state)
    }

    pub fn save_state(&self) -> SaveState {
        extract_state_from_world(&self.world)
    }

    /// Export the persisted subset to a JSON file.
    pub fn export_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), SaveSlotError> {
        save_state_to_path(&self.save_state(), path)
    }

    /// Replace progression, profile, settings and entitlements from an exported file.
    pub fn import_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<Snapshot, SaveSlotError> {
        let state = load_state_from_path(path)?;
        apply_state_to_world(state, &mut self.world);
        {
            let mut session = self.world.resource_mut::<Session>();
            session.current_world = None;
            session.current_level = None;
            session.set_playing(false);
            session.set_paused(false);
            if session.current_screen == Screen::Level {
                session.current_screen = Screen::Worlds;
            }
        }
        self.world.resource_mut::<LevelRun>().reset();
        self.world.resource_mut::<ProgressionLog>().clear();
        info!("imported save into slot {}", self.config.slot_key);
        self.persist()?;
        Ok(self.snapshot())
    }

    pub fn set_current_screen(&mut self, screen: Screen) -> Snapshot {
        self.apply(ProgressionIntent::SetCurrentScreen(screen))
    }

    pub fn set_current_world(&mut self, world: Option<WorldId>) -> Snapshot {
        self.apply(ProgressionIntent::SetCurrentWorld(world))
    }

    pub fn set_current_level(&mut self, level: Option<LevelId>) -> Snapshot {
        self.apply(ProgressionIntent::SetCurrentLevel(level))
    }

    pub fn set_is_playing(&mut self, playing: bool) -> Snapshot {
        self.apply(ProgressionIntent::SetIsPlaying(playing))
    }

    pub fn set_is_paused(&mut self, paused: bool) -> Snapshot {
        self.apply(ProgressionIntent::SetIsPaused(paused))
    }

    pub fn update_player(&mut self, patch: PlayerPatch) -> Snapshot {
        self.apply(ProgressionIntent::UpdatePlayer(patch))
    }

    pub fn complete_level(
        &mut self,
        level_id: impl Into<LevelId>,
        stars: u8,
        time_secs: u32,
        brain_stars: u32,
        fragments: u32,
    ) -> Snapshot {
        self.apply(ProgressionIntent::CompleteLevel {
            level_id: level_id.into(),
            result: RunResult {
                stars,
                time_secs,
                brain_stars,
                fragments,
            },
        })
    }

    pub fn unlock_world(&mut self, world: WorldId) -> Snapshot {
        self.apply(ProgressionIntent::UnlockWorld(world))
    }

    pub fn change_emotion(&mut self, emotion: Emotion) -> Snapshot {
        self.apply(ProgressionIntent::ChangeEmotion(emotion))
    }

    pub fn spend_hints(&mut self, amount: u32) -> Snapshot {
        self.apply(ProgressionIntent::SpendHints(amount))
    }

    pub fn add_hints(&mut self, amount: u32) -> Snapshot {
        self.apply(ProgressionIntent::AddHints(amount))
    }

    pub fn spend_brain_stars(&mut self, amount: u32) -> Snapshot {
        self.apply(ProgressionIntent::SpendBrainStars(amount))
    }

    pub fn add_brain_stars(&mut self, amount: u32) -> Snapshot {
        self.apply(ProgressionIntent::AddBrainStars(amount))
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> Snapshot {
        self.apply(ProgressionIntent::UpdateSettings(patch))
    }

    pub fn unlock_premium(&mut self) -> Snapshot {
        self.apply(ProgressionIntent::UnlockPremium)
    }

    pub fn reset_progress(&mut self) -> Snapshot {
        self.apply(ProgressionIntent::ResetProgress)
    }

    pub fn purchase(&mut self, item: ShopItem) -> Snapshot {
        self.apply(ProgressionIntent::Purchase(item))
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
