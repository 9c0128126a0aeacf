use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use puzzletoon_progression::components::{Emotion, GraphicsQuality, LevelId, Screen, WorldId};
use puzzletoon_progression::core::config::{EngineConfig, DEFAULT_SAVE_PATH, DEFAULT_SLOT_KEY};
use puzzletoon_progression::data::{ShopItem, SKIN_COLORS};
use puzzletoon_progression::rules::{CustomizationPatch, PlayerPatch, SettingsPatch};
use puzzletoon_progression::simulation::Interaction;
use puzzletoon_progression::{
    Game, MemorySaveSlot, ProgressionIntent, SaveSlot, Snapshot, SqliteSaveSlot,
};

/// Interactive shell over the progression engine.
#[derive(Debug, Parser)]
#[command(name = "puzzletoon", version, about)]
struct Cli {
    /// SQLite file holding the save slot.
    #[arg(long, default_value = DEFAULT_SAVE_PATH)]
    save: PathBuf,
    /// Key of the save record inside the slot.
    #[arg(long, default_value = DEFAULT_SLOT_KEY)]
    slot: String,
    /// Keep saves in memory only.
    #[arg(long)]
    memory: bool,
    /// Only write the save on exit.
    #[arg(long)]
    no_write_through: bool,
}

impl Cli {
    fn config(&self) -> EngineConfig {
        EngineConfig {
            save_path: (!self.memory).then(|| self.save.clone()),
            slot_key: self.slot.clone(),
            write_through: !self.no_write_through,
        }
    }
}

const HELP: &str = "Commands: status | worlds | levels <world> | screen <name> | play <level> | toggle | tick [secs] | block | orb | emotion <e> | hint | leave | complete <level> <stars> <secs> <brain> <frags> | unlock <world> | shop | buy <item> | name <text> | skin <n> | accessory <id> | avatar <e> | settings [sound|music|haptic|quality <q>|lang <tag>] | premium | export <path> | import <path> | reset | quit";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    let slot: Box<dyn SaveSlot> = match &config.save_path {
        Some(path) => match SqliteSaveSlot::open(path) {
            Ok(slot) => Box::new(slot),
            Err(err) => {
                eprintln!(
                    "Failed to open save slot at {}: {}. Progress will not survive this session.",
                    path.display(),
                    err
                );
                Box::new(MemorySaveSlot::new())
            }
        },
        None => Box::new(MemorySaveSlot::new()),
    };

    let mut game = Game::open(slot, config);
    println!("PuzzleToon progression shell (save: {:?})", game.load_outcome());
    println!("{}", HELP);
    print_status(&game.snapshot());

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or("").to_lowercase();
        let args: Vec<&str> = parts.collect();

        let intent = match cmd.as_str() {
            "quit" | "exit" => break,
            "help" => {
                println!("{}", HELP);
                continue;
            }
            "status" => {
                print_status(&game.snapshot());
                continue;
            }
            "worlds" => {
                print_worlds(&game.snapshot());
                continue;
            }
            "levels" => {
                match args.first().and_then(|raw| raw.parse::<u32>().ok()) {
                    Some(id) => print_levels(&game.snapshot(), WorldId(id)),
                    None => println!("Usage: levels <world_id>"),
                }
                continue;
            }
            "shop" => {
                print_shop();
                continue;
            }
            "export" => {
                match args.first() {
                    Some(path) => match game.export_to_path(path) {
                        Ok(()) => println!("Exported to {}", path),
                        Err(err) => println!("Export failed: {}", err),
                    },
                    None => println!("Usage: export <path>"),
                }
                continue;
            }
            "import" => {
                match args.first() {
                    Some(path) => match game.import_from_path(path) {
                        Ok(snapshot) => print_status(&snapshot),
                        Err(err) => println!("Import failed: {}", err),
                    },
                    None => println!("Usage: import <path>"),
                }
                continue;
            }
            other => match parse_intent(other, &args) {
                Ok(intent) => intent,
                Err(message) => {
                    println!("{}", message);
                    continue;
                }
            },
        };

        let snapshot = game.apply(intent);
        for event in &snapshot.events {
            println!("  * {}", event);
        }
        print_status(&snapshot);
    }

    if let Err(err) = game.flush() {
        eprintln!("Failed to write final save: {}", err);
    }
}

fn parse_intent(cmd: &str, args: &[&str]) -> Result<ProgressionIntent, String> {
    let arg = |index: usize, usage: &str| -> Result<String, String> {
        args.get(index)
            .map(|value| value.to_string())
            .ok_or_else(|| format!("Usage: {}", usage))
    };
    let number = |index: usize, usage: &str| -> Result<u32, String> {
        arg(index, usage)?
            .parse::<u32>()
            .map_err(|_| format!("Usage: {}", usage))
    };

    let intent = match cmd {
        "screen" => ProgressionIntent::SetCurrentScreen(
            arg(0, "screen <name>")?
                .parse::<Screen>()
                .map_err(|err| err.to_string())?,
        ),
        "play" => ProgressionIntent::StartRun(LevelId(arg(0, "play <level_id>")?)),
        "toggle" => ProgressionIntent::TogglePlay,
        "tick" => ProgressionIntent::TickClock(if args.is_empty() {
            1
        } else {
            number(0, "tick [secs]")?
        }),
        "block" => ProgressionIntent::Interact(Interaction::Block),
        "orb" => ProgressionIntent::Interact(Interaction::Orb),
        "emotion" => ProgressionIntent::ChangeEmotion(parse_emotion(&arg(0, "emotion <e>")?)?),
        "avatar" => ProgressionIntent::ChooseEmotion(parse_emotion(&arg(0, "avatar <e>")?)?),
        "hint" => ProgressionIntent::UseHint,
        "leave" => ProgressionIntent::LeaveLevel,
        "complete" => {
            let usage = "complete <level> <stars> <secs> <brain> <frags>";
            let stars = number(1, usage)?.min(u8::MAX as u32) as u8;
            ProgressionIntent::CompleteLevel {
                level_id: LevelId(arg(0, usage)?),
                result: puzzletoon_progression::simulation::RunResult {
                    stars,
                    time_secs: number(2, usage)?,
                    brain_stars: number(3, usage)?,
                    fragments: number(4, usage)?,
                },
            }
        }
        "unlock" => ProgressionIntent::UnlockWorld(WorldId(number(0, "unlock <world_id>")?)),
        "buy" => ProgressionIntent::Purchase(
            arg(0, "buy <item>")?
                .parse::<ShopItem>()
                .map_err(|err| err.to_string())?,
        ),
        "name" => ProgressionIntent::UpdatePlayer(PlayerPatch::name(args.join(" "))),
        "skin" => {
            let index = number(0, "skin <0-7>")? as usize;
            let color = SKIN_COLORS
                .get(index)
                .ok_or_else(|| "Usage: skin <0-7>".to_string())?;
            ProgressionIntent::UpdatePlayer(PlayerPatch {
                customization: Some(CustomizationPatch {
                    skin_color: Some(color.to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            })
        }
        "accessory" => ProgressionIntent::EquipAccessory(arg(0, "accessory <id>")?),
        "settings" => ProgressionIntent::UpdateSettings(parse_settings(args)?),
        "premium" => ProgressionIntent::UnlockPremium,
        "reset" => ProgressionIntent::ResetProgress,
        _ => return Err(format!("Unknown command: {}", cmd)),
    };
    Ok(intent)
}

fn parse_emotion(raw: &str) -> Result<Emotion, String> {
    raw.parse::<Emotion>().map_err(|err| err.to_string())
}

fn parse_settings(args: &[&str]) -> Result<SettingsPatch, String> {
    let mut patch = SettingsPatch::default();
    match args {
        ["sound", value] => patch.sound_enabled = Some(parse_toggle(value)?),
        ["music", value] => patch.music_enabled = Some(parse_toggle(value)?),
        ["haptic", value] => patch.haptic_enabled = Some(parse_toggle(value)?),
        ["quality", value] => {
            patch.graphics_quality = Some(
                value
                    .parse::<GraphicsQuality>()
                    .map_err(|err| err.to_string())?,
            )
        }
        ["lang", value] => patch.language = Some(value.to_string()),
        _ => return Err("Usage: settings <sound|music|haptic> <on|off> | quality <q> | lang <tag>".to_string()),
    }
    Ok(patch)
}

fn parse_toggle(raw: &str) -> Result<bool, String> {
    match raw {
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        _ => Err(format!("expected on/off, got {}", raw)),
    }
}

fn print_status(snapshot: &Snapshot) {
    let player = &snapshot.player;
    println!(
        "[{}] {} (lvl {}, {} xp) | brain stars {} | fragments {} | hints {} | emotion {} | {:?}",
        snapshot.current_screen.as_str(),
        player.name,
        player.level,
        player.experience,
        player.brain_stars,
        player.memory_fragments,
        player.hints,
        player.current_emotion.as_str(),
        snapshot.play_state(),
    );
    if let Some(level) = &snapshot.current_level {
        println!(
            "  level {} | {}s | blocks {} | orbs {} | emotion used {}",
            level,
            snapshot.run.elapsed_secs,
            snapshot.run.blocks_activated,
            snapshot.run.orbs_collected,
            snapshot.run.emotion_used
        );
    }
}

fn print_worlds(snapshot: &Snapshot) {
    for world in &snapshot.worlds {
        let lock = if world.unlocked { " " } else { "x" };
        let done = if world.completed { "done" } else { "" };
        println!(
            "[{}] {} {} - {}/{} levels, {}/{} stars {}",
            lock,
            world.id,
            world.name,
            world.completed_count(),
            world.levels.len(),
            world.earned_stars(),
            world.max_stars(),
            done
        );
    }
    let unlocked: Vec<String> = snapshot
        .unlocked_worlds()
        .into_iter()
        .map(|id| id.to_string())
        .collect();
    println!("Unlocked worlds: {}", unlocked.join(", "));
}

fn print_levels(snapshot: &Snapshot, world_id: WorldId) {
    let Some(world) = snapshot.world(world_id) else {
        println!("No world {}", world_id);
        return;
    };
    println!("{} - {}", world.name, world.theme);
    for level in &world.levels {
        let lock = if level.unlocked { " " } else { "x" };
        let best = level
            .best_time
            .map(|secs| format!("{}:{:02}", secs / 60, secs % 60))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "[{}] {:<5} {:<14} {:<13} d{} stars {} best {}",
            lock,
            level.id.as_str(),
            level.name,
            level.puzzle_type.as_str(),
            level.difficulty.get(),
            level.stars,
            best
        );
    }
}

fn print_shop() {
    for item in ShopItem::ALL {
        println!("{:<10} {:<16} {} brain stars", item.id(), item.label(), item.cost());
    }
}
