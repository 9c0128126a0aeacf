pub mod patch;
pub mod scoring;

pub use patch::{
    apply_customization_patch, apply_player_patch, apply_settings_patch, CustomizationPatch,
    PlayerPatch, SettingsPatch,
};
pub use scoring::{brain_stars_for, stars_for_time, PAR_TIME_SECS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub value: String,
}

impl std::fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown enum value: {}", self.value)
    }
}

impl std::error::Error for ParseEnumError {}
