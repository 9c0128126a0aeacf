use puzzletoon_progression::components::{
    GraphicsQuality, LevelId, PlayState, Screen, WorldId, MAX_STARS,
};
use puzzletoon_progression::core::config::DEFAULT_SLOT_KEY;
use puzzletoon_progression::rules::SettingsPatch;
use puzzletoon_progression::simulation::LevelRun;
use puzzletoon_progression::{
    EngineConfig, Game, LoadOutcome, MemorySaveSlot, ProgressionIntent, SaveState,
    SqliteSaveSlot,
};
use tempfile::tempdir;

fn memory_config() -> EngineConfig {
    EngineConfig::in_memory()
}

fn progress(game: &mut Game) {
    game.complete_level("1-1", 3, 40, 25, 2);
    game.complete_level("1-2", 1, 150, 10, 0);
    game.update_settings(SettingsPatch {
        graphics_quality: Some(GraphicsQuality::Low),
        language: Some("fr".to_string()),
        ..Default::default()
    });
    game.unlock_premium();
    game.set_current_screen(Screen::Shop);
    game.set_current_level(Some(LevelId::from("1-2")));
}

#[test]
fn memory_slot_survives_a_restart() {
    let mut game = Game::open(Box::new(MemorySaveSlot::new()), memory_config());
    assert_eq!(game.load_outcome(), &LoadOutcome::Missing);
    progress(&mut game);
    let before = game.snapshot();

    let slot = game.into_slot().expect("slot attached");
    let reopened = Game::open(slot, memory_config());
    assert!(reopened.load_outcome().restored());

    let after = reopened.snapshot();
    assert_eq!(after.player, before.player);
    assert_eq!(after.worlds, before.worlds);
    assert_eq!(after.settings, before.settings);
    assert_eq!(after.premium, before.premium);
    assert_eq!(after.unlocked_worlds(), before.unlocked_worlds());
}

#[test]
fn session_state_is_not_persisted() {
    let mut game = Game::open(Box::new(MemorySaveSlot::new()), memory_config());
    progress(&mut game);
    game.set_is_playing(true);

    let reopened = Game::open(game.into_slot().expect("slot attached"), memory_config());
    let snapshot = reopened.snapshot();
    assert_eq!(snapshot.current_screen, Screen::Home);
    assert_eq!(snapshot.current_level, None);
    assert_eq!(snapshot.current_world, None);
    assert!(!snapshot.is_playing);
}

#[test]
fn sqlite_slot_survives_a_restart() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("progress.db");
    let config = EngineConfig {
        save_path: Some(path.clone()),
        ..Default::default()
    };

    let before = {
        let slot = SqliteSaveSlot::open(&path).expect("open slot");
        let mut game = Game::open(Box::new(slot), config.clone());
        progress(&mut game);
        game.snapshot()
    };

    let slot = SqliteSaveSlot::open(&path).expect("reopen slot");
    assert_eq!(slot.keys().expect("keys"), vec![DEFAULT_SLOT_KEY.to_string()]);
    let game = Game::open(Box::new(slot), config);
    assert!(game.load_outcome().restored());
    let after = game.snapshot();
    assert_eq!(after.player, before.player);
    assert_eq!(after.worlds, before.worlds);
    assert_eq!(after.settings.graphics_quality, GraphicsQuality::Low);
    assert!(after.premium.ads_removed);
}

#[test]
fn without_write_through_only_flush_persists() {
    let config = EngineConfig {
        write_through: false,
        ..EngineConfig::in_memory()
    };
    let mut game = Game::open(Box::new(MemorySaveSlot::new()), config.clone());
    game.add_hints(4);
    let slot = game.into_slot().expect("slot attached");
    assert_eq!(slot.read(DEFAULT_SLOT_KEY).expect("read"), None);

    let mut game = Game::open(slot, config.clone());
    game.add_hints(4);
    game.flush().expect("flush");
    let reopened = Game::open(game.into_slot().expect("slot attached"), config);
    assert_eq!(reopened.snapshot().player.hints, 7);
}

#[test]
fn reset_is_persisted_like_any_other_mutation() {
    let mut game = Game::open(Box::new(MemorySaveSlot::new()), memory_config());
    progress(&mut game);
    game.reset_progress();

    let reopened = Game::open(game.into_slot().expect("slot attached"), memory_config());
    let snapshot = reopened.snapshot();
    assert_eq!(snapshot.worlds, SaveState::default().worlds);
    assert_eq!(snapshot.settings.language, "fr");
    assert!(snapshot.premium.is_unlocked);
}

#[test]
fn corrupt_record_falls_back_to_defaults() {
    let slot = MemorySaveSlot::with_entry(DEFAULT_SLOT_KEY, "{ not json");
    let game = Game::open(Box::new(slot), memory_config());
    assert!(matches!(game.load_outcome(), LoadOutcome::Corrupt(_)));
    assert_eq!(game.save_state(), SaveState::default());
}

#[test]
fn version_mismatch_falls_back_to_defaults() {
    let mut record = serde_json::to_value(SaveState::default()).expect("encode");
    record["version"] = serde_json::json!(2);
    record["player"]["brain_stars"] = serde_json::json!(9999);
    let slot = MemorySaveSlot::with_entry(DEFAULT_SLOT_KEY, record.to_string());

    let game = Game::open(Box::new(slot), memory_config());
    assert_eq!(
        game.load_outcome(),
        &LoadOutcome::VersionMismatch {
            found: Some(2),
            expected: 1
        }
    );
    assert_eq!(game.snapshot().player.brain_stars, 50);
}

#[test]
fn structurally_broken_record_falls_back_to_defaults() {
    let mut state = SaveState::default();
    state.worlds[0].levels.clear();
    let slot = MemorySaveSlot::with_entry(
        DEFAULT_SLOT_KEY,
        serde_json::to_string(&state).expect("encode"),
    );

    let game = Game::open(Box::new(slot), memory_config());
    assert!(matches!(game.load_outcome(), LoadOutcome::Corrupt(_)));
    assert_eq!(game.snapshot().worlds, SaveState::default().worlds);
}

#[test]
fn export_then_import_restores_progress() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("export.json");

    let mut source = Game::new();
    progress(&mut source);
    source.export_to_path(&path).expect("export");

    let mut target = Game::new();
    let snapshot = target.import_from_path(&path).expect("import");
    assert_eq!(snapshot.worlds, source.snapshot().worlds);
    assert_eq!(snapshot.player, source.snapshot().player);
    assert!(snapshot.world(WorldId(1)).expect("world 1").levels[2].unlocked);
}

fn slot_holding(state: &SaveState) -> Box<MemorySaveSlot> {
    Box::new(MemorySaveSlot::with_entry(
        DEFAULT_SLOT_KEY,
        serde_json::to_string(state).expect("encode"),
    ))
}

#[test]
fn out_of_range_stars_fall_back_to_defaults() {
    let mut state = SaveState::default();
    state.worlds[0].levels[0].completed = true;
    state.worlds[0].levels[0].stars = 200;

    let game = Game::open(slot_holding(&state), memory_config());
    assert!(matches!(game.load_outcome(), LoadOutcome::Corrupt(_)));
    let snapshot = game.snapshot();
    let first = snapshot.level(&LevelId::from("1-1")).expect("level 1-1");
    assert_eq!(first.stars, 0);
    assert!(first.stars <= MAX_STARS);
}

#[test]
fn inconsistent_world_completion_falls_back_to_defaults() {
    let mut state = SaveState::default();
    state.worlds[0].completed = true;

    let game = Game::open(slot_holding(&state), memory_config());
    assert!(matches!(game.load_outcome(), LoadOutcome::Corrupt(_)));
    assert!(!game.snapshot().world(WorldId(1)).expect("world 1").completed);
}

#[test]
fn restored_world_with_the_highest_id_can_be_completed() {
    let mut state = SaveState::default();
    let mut world = state.worlds.remove(6);
    world.id = WorldId(u32::MAX);
    world.unlocked = true;
    for level in &mut world.levels {
        level.world_id = world.id;
        level.id = LevelId::new(world.id, level.level_number);
        level.unlocked = true;
    }
    state.worlds = vec![world];

    let mut game = Game::open(slot_holding(&state), memory_config());
    assert!(game.load_outcome().restored());

    let mut snapshot = game.snapshot();
    for n in 1..=5 {
        snapshot = game.complete_level(LevelId::new(WorldId(u32::MAX), n), 2, 60, 5, 0);
    }
    assert!(snapshot.world(WorldId(u32::MAX)).expect("last world").completed);
    assert_eq!(snapshot.unlocked_worlds().len(), 1);
}

#[test]
fn import_abandons_the_run_in_progress() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("fresh.json");
    Game::new().export_to_path(&path).expect("export");

    let mut game = Game::new();
    game.complete_level("1-1", 3, 30, 0, 0);
    game.apply(ProgressionIntent::StartRun(LevelId::from("1-2")));
    game.apply(ProgressionIntent::TickClock(12));

    let snapshot = game.import_from_path(&path).expect("import");
    assert!(!snapshot.level(&LevelId::from("1-2")).expect("level 1-2").unlocked);
    assert_eq!(snapshot.current_level, None);
    assert_eq!(snapshot.current_world, None);
    assert_eq!(snapshot.current_screen, Screen::Worlds);
    assert_eq!(snapshot.play_state(), PlayState::Stopped);
    assert_eq!(snapshot.run, LevelRun::default());
}
