//! Lane settings and tuning
//!
//! Loaded from an optional JSON file; every field has a default so partial
//! files are fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scoring::{DEFAULT_GAMES_PER_SERIES, GameMode};

/// Delays on the simulated timeline (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Ball must stay at rest this long (or pins get this long after an exit)
    pub settle_secs: f32,
    /// Pause between a resolved throw and the pin reset
    pub frame_pause_secs: f32,
    /// Pause before the first frame of the next game
    pub game_pause_secs: f32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle_secs: 0.8,
            frame_pause_secs: 1.5,
            game_pause_secs: 2.0,
        }
    }
}

/// Motion and knockdown thresholds used by the lane sensors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Ball speed below which it counts as at rest (m/s)
    pub ball_rest_speed: f32,
    /// Pin linear speed above which it counts as moving (m/s)
    pub pin_moving_speed: f32,
    /// Pin angular speed above which it counts as moving (rad/s)
    pub pin_moving_spin: f32,
    /// Pins allowed to still be moving when a stopped ball completes the throw
    pub max_moving_pins: usize,
    /// Tilt past which a pin is down (radians)
    pub knockdown_tilt: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            ball_rest_speed: 0.01,
            pin_moving_speed: 0.25,
            pin_moving_spin: 0.8,
            max_moving_pins: 1,
            knockdown_tilt: std::f32::consts::FRAC_PI_4,
        }
    }
}

/// Play volume; leaving it ends the throw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneBounds {
    /// Past the pin deck into the pit
    pub pit_z: f32,
    /// Dropped below lane level
    pub floor_y: f32,
    /// Into either gutter
    pub gutter_x: f32,
    /// Rolled back off the approach
    pub approach_z: f32,
}

impl Default for LaneBounds {
    fn default() -> Self {
        Self {
            pit_z: -11.0,
            floor_y: -1.0,
            gutter_x: 1.5,
            approach_z: 12.0,
        }
    }
}

impl LaneBounds {
    /// Whether a position (x across, z down-lane, y height) is outside the play volume
    pub fn is_outside(&self, x: f32, y: f32, z: f32) -> bool {
        z < self.pit_z || y < self.floor_y || x.abs() > self.gutter_x || z > self.approach_z
    }
}

/// Lane settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: GameMode,
    pub games_per_series: usize,

    // === Throw ===
    /// Quick clicks still throw with at least this power (0.0 - 1.0)
    pub min_throw_power: f32,
    /// Power gained per second while charging
    pub power_charge_rate: f32,

    pub timing: Timing,
    pub thresholds: Thresholds,
    pub bounds: LaneBounds,

    /// Seed for the lane's pin scatter jitter
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Singles,
            games_per_series: DEFAULT_GAMES_PER_SERIES,

            min_throw_power: 0.3,
            power_charge_rate: 1.2,

            timing: Timing::default(),
            thresholds: Thresholds::default(),
            bounds: LaneBounds::default(),

            seed: 0x5EED_B0B1,
        }
    }
}

impl Settings {
    /// Defaults with a different roster
    pub fn for_mode(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Settings from `path` if given and valid, defaults otherwise
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load_from(path).unwrap_or_else(|e| {
                log::warn!("{}; using default settings", e);
                Self::default()
            }),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the lane cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.games_per_series == 0 {
            return Err(invalid("games_per_series", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.min_throw_power) {
            return Err(invalid("min_throw_power", "must be within 0.0..=1.0"));
        }
        if !(self.power_charge_rate > 0.0 && self.power_charge_rate.is_finite()) {
            return Err(invalid("power_charge_rate", "must be positive"));
        }

        let t = &self.timing;
        for (field, value) in [
            ("timing.settle_secs", t.settle_secs),
            ("timing.frame_pause_secs", t.frame_pause_secs),
            ("timing.game_pause_secs", t.game_pause_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("{} is not a non-negative duration", value)));
            }
        }

        let th = &self.thresholds;
        if !(th.ball_rest_speed > 0.0) {
            return Err(invalid("thresholds.ball_rest_speed", "must be positive"));
        }
        if !(th.knockdown_tilt > 0.0 && th.knockdown_tilt < std::f32::consts::FRAC_PI_2) {
            return Err(invalid("thresholds.knockdown_tilt", "must be between 0 and 90 degrees"));
        }

        let b = &self.bounds;
        if b.pit_z >= b.approach_z || b.gutter_x <= 0.0 {
            return Err(invalid("bounds", "play volume is empty"));
        }

        Ok(())
    }
}
