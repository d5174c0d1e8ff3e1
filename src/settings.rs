//! Game tuning
//!
//! Every timing knob of a round lives here so levels can be tuned from JSON
//! without touching the simulation.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::GameError;
use crate::consts::*;

/// Tunable parameters for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// RNG seed for safe color selection
    pub seed: u64,

    // === Platforms ===
    /// Vertical distance an unsafe platform sinks
    pub drop_offset: f32,
    /// Animation-time scale for sinking
    pub drop_speed: f32,
    /// Animation-time scale for rising
    pub rise_speed: f32,

    // === Round timing (seconds) ===
    /// Blink-only window before the drop starts
    pub pre_drop_delay: f32,
    /// Drop start to position check
    pub check_delay: f32,
    /// Rise start to next round
    pub settle_delay: f32,

    // === Checks ===
    /// Downward probe length from the player origin
    pub probe_distance: f32,
    /// Trigger tag that ends the game on contact
    pub fail_surface_tag: String,

    // === Blink ===
    pub blink_half_period: f32,
    pub blink_highlight: Vec3,

    // === Session ===
    /// Countdown to a win
    pub game_duration: f32,
    /// Start menu wait before the game scene loads
    pub menu_delay: f32,

    // === Audio ===
    pub master_volume: f32,
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            seed: 0,

            drop_offset: DROP_OFFSET,
            drop_speed: DROP_SPEED,
            rise_speed: RISE_SPEED,

            pre_drop_delay: PRE_DROP_DELAY,
            check_delay: CHECK_DELAY,
            settle_delay: SETTLE_DELAY,

            probe_distance: PROBE_DISTANCE,
            fail_surface_tag: FAIL_SURFACE_TAG.to_string(),

            blink_half_period: BLINK_HALF_PERIOD,
            blink_highlight: BLINK_HIGHLIGHT,

            game_duration: GAME_DURATION,
            menu_delay: MENU_DELAY,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl GameSettings {
    /// Default settings with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings (seed {})", settings.seed);
        Ok(settings)
    }

    /// Read and parse a JSON settings file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the round machine cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("drop_speed", self.drop_speed),
            ("rise_speed", self.rise_speed),
            ("blink_half_period", self.blink_half_period),
            ("game_duration", self.game_duration),
            ("probe_distance", self.probe_distance),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidSettings(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("drop_offset", self.drop_offset),
            ("pre_drop_delay", self.pre_drop_delay),
            ("check_delay", self.check_delay),
            ("settle_delay", self.settle_delay),
            ("menu_delay", self.menu_delay),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GameError::InvalidSettings(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GameError::InvalidSettings(format!(
                    "{name} must be within 0.0..=1.0, got {value}"
                )));
            }
        }

        if self.fail_surface_tag.is_empty() {
            return Err(GameError::InvalidSettings(
                "fail_surface_tag must not be empty".to_string(),
            ));
        }

        // The check is a fixed delay, not a wait on the drop.
        if self.check_delay < self.drop_duration() {
            log::warn!(
                "check_delay {} is shorter than the drop ({}s); players may be checked mid-drop",
                self.check_delay,
                self.drop_duration()
            );
        }

        Ok(())
    }

    /// Wall-clock seconds a drop takes
    pub fn drop_duration(&self) -> f32 {
        1.0 / self.drop_speed
    }

    /// Wall-clock seconds a rise takes
    pub fn rise_duration(&self) -> f32 {
        1.0 / self.rise_speed
    }
}
