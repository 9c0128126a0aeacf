//! Typed partial updates.
//!
//! Every field of a patch *overwrites* the target when present and leaves it
//! untouched when `None`. Nothing here accumulates or keeps a best-of value;
//! those merges live in `simulation::progression` and `simulation::economy`.
//! No range validation is performed: callers pre-validate.

use crate::components::player::{Customization, PlayerProfile};
use crate::components::progression::Emotion;
use crate::components::settings::{GraphicsQuality, Settings};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomizationPatch {
    pub skin_color: Option<String>,
    pub accessory: Option<String>,
    pub emotion: Option<Emotion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub level: Option<u32>,
    pub experience: Option<u64>,
    pub current_emotion: Option<Emotion>,
    pub brain_stars: Option<u32>,
    pub memory_fragments: Option<u32>,
    pub hints: Option<u32>,
    /// Merged field by field into the existing customization.
    pub customization: Option<CustomizationPatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub sound_enabled: Option<bool>,
    pub music_enabled: Option<bool>,
    pub haptic_enabled: Option<bool>,
    pub graphics_quality: Option<GraphicsQuality>,
    pub language: Option<String>,
}

impl PlayerPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn overwrite<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

pub fn apply_customization_patch(target: &mut Customization, patch: CustomizationPatch) {
    overwrite(&mut target.skin_color, patch.skin_color);
    overwrite(&mut target.accessory, patch.accessory);
    overwrite(&mut target.emotion, patch.emotion);
}

pub fn apply_player_patch(player: &mut PlayerProfile, patch: PlayerPatch) {
    overwrite(&mut player.name, patch.name);
    overwrite(&mut player.level, patch.level);
    overwrite(&mut player.experience, patch.experience);
    overwrite(&mut player.current_emotion, patch.current_emotion);
    overwrite(&mut player.brain_stars, patch.brain_stars);
    overwrite(&mut player.memory_fragments, patch.memory_fragments);
    overwrite(&mut player.hints, patch.hints);
    if let Some(customization) = patch.customization {
        apply_customization_patch(&mut player.customization, customization);
    }
}

pub fn apply_settings_patch(settings: &mut Settings, patch: SettingsPatch) {
    overwrite(&mut settings.sound_enabled, patch.sound_enabled);
    overwrite(&mut settings.music_enabled, patch.music_enabled);
    overwrite(&mut settings.haptic_enabled, patch.haptic_enabled);
    overwrite(&mut settings.graphics_quality, patch.graphics_quality);
    overwrite(&mut settings.language, patch.language);
}
