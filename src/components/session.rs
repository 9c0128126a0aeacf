use std::str::FromStr;

use bevy_ecs::prelude::*;

use crate::components::progression::{LevelId, WorldId};
use crate::rules::ParseEnumError;

/// Screens the UI can show. Any screen may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Home,
    Worlds,
    LevelSelect,
    Level,
    Character,
    Shop,
    Settings,
    Pause,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Worlds => "worlds",
            Screen::LevelSelect => "level-select",
            Screen::Level => "level",
            Screen::Character => "character",
            Screen::Shop => "shop",
            Screen::Settings => "settings",
            Screen::Pause => "pause",
        }
    }
}

impl FromStr for Screen {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Screen::Home),
            "worlds" => Ok(Screen::Worlds),
            "level-select" => Ok(Screen::LevelSelect),
            "level" => Ok(Screen::Level),
            "character" => Ok(Screen::Character),
            "shop" => Ok(Screen::Shop),
            "settings" => Ok(Screen::Settings),
            "pause" => Ok(Screen::Pause),
            _ => Err(ParseEnumError {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Stopped,
    Playing,
    Paused,
}

/// Transient session pointers. Never persisted.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub current_screen: Screen,
    pub current_world: Option<WorldId>,
    pub current_level: Option<LevelId>,
    pub is_playing: bool,
    pub is_paused: bool,
}

impl Session {
    /// Starting play also resumes a paused session.
    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
        if playing {
            self.is_paused = false;
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    /// Play button: start when stopped, otherwise flip pause.
    pub fn toggle_play(&mut self) {
        if !self.is_playing {
            self.set_playing(true);
        } else {
            self.is_paused = !self.is_paused;
        }
    }

    /// Pausing while stopped leaves the flag set but still reads as stopped.
    pub fn play_state(&self) -> PlayState {
        match (self.is_playing, self.is_paused) {
            (true, true) => PlayState::Paused,
            (true, false) => PlayState::Playing,
            (false, _) => PlayState::Stopped,
        }
    }

    pub fn clock_running(&self) -> bool {
        self.play_state() == PlayState::Playing
    }
}
