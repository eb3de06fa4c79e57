//! Startup configuration: play area, colors, speed, stray target, sound handle.
//!
//! Every field has a default, so an empty JSON object is a valid settings file.
//! `"play_area": null` selects the unbounded variant (player at the origin,
//! strays spawned in `[-10, 10)`, no clamping).

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::bounds::PlayArea;
use crate::entity::{EntityType, Rgba};
use crate::events::SoundHandle;
use crate::game::RestartPolicy;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GameSettings {
    #[serde(default = "default_play_area")]
    pub play_area: Option<PlayArea>,
    #[serde(default)]
    pub colors: EntityColors,
    #[serde(default = "default_movement_speed")]
    pub movement_speed: f32,
    #[serde(default = "default_stray_target")]
    pub stray_target: usize,
    #[serde(default = "default_stick_sound")]
    pub stick_sound: String,
    #[serde(default)]
    pub restart_policy: RestartPolicy,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct EntityColors {
    #[serde(default = "default_player_color")]
    pub player: Rgba,
    #[serde(default = "default_attached_color")]
    pub attached: Rgba,
    #[serde(default = "default_stray_color")]
    pub stray: Rgba,
}

impl EntityColors {
    /// `None` for `EntityType::Null`, which has no presentation.
    pub fn color_for(&self, kind: EntityType) -> Option<Rgba> {
        match kind {
            EntityType::Player => Some(self.player),
            EntityType::Attached => Some(self.attached),
            EntityType::Stray => Some(self.stray),
            EntityType::Null => None,
        }
    }
}

impl Default for EntityColors {
    fn default() -> Self {
        Self {
            player: default_player_color(),
            attached: default_attached_color(),
            stray: default_stray_color(),
        }
    }
}

impl GameSettings {
    pub fn stick_sound_handle(&self) -> SoundHandle {
        SoundHandle::new(&self.stick_sound)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            play_area: default_play_area(),
            colors: EntityColors::default(),
            movement_speed: default_movement_speed(),
            stray_target: default_stray_target(),
            stick_sound: default_stick_sound(),
            restart_policy: RestartPolicy::default(),
            seed: None,
        }
    }
}

pub fn load_settings_from_path(path: &Path) -> Result<GameSettings, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let settings: GameSettings = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse settings JSON {}: {e}", path.display()))?;
    validate_settings(&settings)?;
    Ok(settings)
}

pub fn validate_settings(settings: &GameSettings) -> Result<(), String> {
    if let Some(area) = settings.play_area {
        if !(area.width.is_finite() && area.width > 0.0)
            || !(area.height.is_finite() && area.height > 0.0)
        {
            return Err(format!(
                "Settings validation failed: play_area must be > 0 on both axes (got {} x {})",
                area.width, area.height
            ));
        }
    }
    if !settings.movement_speed.is_finite() || settings.movement_speed < 0.0 {
        return Err(format!(
            "Settings validation failed: movement_speed must be finite and >= 0 (got {})",
            settings.movement_speed
        ));
    }
    if settings.stray_target == 0 {
        return Err("Settings validation failed: stray_target must be >= 1".to_string());
    }
    if settings.stick_sound.trim().is_empty() {
        return Err("Settings validation failed: stick_sound must not be empty".to_string());
    }
    for kind in [EntityType::Player, EntityType::Attached, EntityType::Stray] {
        let Some(color) = settings.colors.color_for(kind) else {
            continue;
        };
        if color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(format!(
                "Settings validation failed: {} color components must be within 0..=1",
                kind.label().to_lowercase()
            ));
        }
    }
    Ok(())
}

const fn default_play_area() -> Option<PlayArea> {
    Some(PlayArea {
        width: 20.0,
        height: 20.0,
    })
}

const fn default_movement_speed() -> f32 {
    0.1
}

const fn default_stray_target() -> usize {
    3
}

fn default_stick_sound() -> String {
    "assets/audio/entity_stick.wav".to_string()
}

const fn default_player_color() -> Rgba {
    [0.95, 0.32, 0.28, 1.0]
}

const fn default_attached_color() -> Rgba {
    [0.98, 0.66, 0.24, 1.0]
}

const fn default_stray_color() -> Rgba {
    [0.55, 0.6, 0.68, 1.0]
}
