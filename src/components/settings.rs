use std::str::FromStr;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::rules::ParseEnumError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphicsQuality {
    Low,
    Medium,
    #[default]
    High,
    Ultra,
}

impl GraphicsQuality {
    pub fn as_str(self) -> &'static str {
        match self {
            GraphicsQuality::Low => "low",
            GraphicsQuality::Medium => "medium",
            GraphicsQuality::High => "high",
            GraphicsQuality::Ultra => "ultra",
        }
    }
}

impl FromStr for GraphicsQuality {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(GraphicsQuality::Low),
            "medium" => Ok(GraphicsQuality::Medium),
            "high" => Ok(GraphicsQuality::High),
            "ultra" => Ok(GraphicsQuality::Ultra),
            _ => Err(ParseEnumError {
                value: s.to_string(),
            }),
        }
    }
}

/// Audio/graphics preferences. Independent of progression.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
    pub haptic_enabled: bool,
    pub graphics_quality: GraphicsQuality,
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            haptic_enabled: true,
            graphics_quality: GraphicsQuality::High,
            language: "en".to_string(),
        }
    }
}

/// Premium purchase flags. Grants are monotonic: nothing in the engine revokes them.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlements {
    pub is_unlocked: bool,
    pub ads_removed: bool,
    pub season_pass_active: bool,
}

impl Entitlements {
    pub fn unlock_premium(&mut self) {
        self.is_unlocked = true;
        self.ads_removed = true;
    }
}
