//! Pin Deck - A ten-pin bowling lane simulation
//!
//! Core modules:
//! - `scoring`: Frame/game/series scoring and multi-player rotation
//! - `sim`: Throw resolution state machine, lane physics collaborators, tick loop
//! - `app`: Application context owning every component for one playthrough
//! - `settings`: Data-driven timing, thresholds and lane bounds
//! - `summary`: Series summaries and plain-text scorecards

pub mod app;
pub mod error;
pub mod scoring;
pub mod settings;
pub mod sim;
pub mod summary;

pub use app::{BowlingApp, GameSnapshot, PowerMeter};
pub use error::{ConfigError, ScoringError, ThrowError};
pub use scoring::{FrameScore, Game, GameMode, Player, Scorekeeper, Series, ThrowOutcome};
pub use settings::Settings;
pub use summary::SeriesSummary;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted by the loop (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Pins in a full rack
    pub const PIN_COUNT: usize = 10;
    /// Frames per game
    pub const FRAMES_PER_GAME: usize = 10;
    /// Best possible single game
    pub const PERFECT_GAME: u16 = 300;

    /// Lane geometry (metres). Down-lane distance `z` grows toward the bowler
    /// and is stored in `Vec2::y` for top-down positions.
    pub const LANE_HALF_WIDTH: f32 = 1.0;
    pub const HEAD_PIN_Z: f32 = -10.0;
    pub const PIN_SPACING: f32 = 0.3;
    pub const BALL_START_Z: f32 = 9.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.11;
    pub const BALL_MASS: f32 = 6.0;
    /// Impulse at full power (N·s)
    pub const THROW_IMPULSE: f32 = 80.0;

    /// Pin defaults
    pub const PIN_RADIUS: f32 = 0.06;
    pub const PIN_MASS: f32 = 1.5;
}

/// Starting position of a fresh ball on the approach
#[inline]
pub fn ball_start_position() -> Vec2 {
    Vec2::new(0.0, consts::BALL_START_Z)
}

/// Standard triangular rack, head pin first, row by row toward the pit
pub fn rack_positions() -> [Vec2; consts::PIN_COUNT] {
    use consts::{HEAD_PIN_Z, PIN_SPACING};

    let row_depth = PIN_SPACING * 0.866;
    let mut positions = [Vec2::ZERO; consts::PIN_COUNT];
    let mut index = 0;
    for row in 0..4 {
        let z = HEAD_PIN_Z - row as f32 * row_depth;
        for col in 0..=row {
            let x = (col as f32 - row as f32 / 2.0) * PIN_SPACING;
            positions[index] = Vec2::new(x, z);
            index += 1;
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rack_is_symmetric_triangle() {
        let rack = rack_positions();
        assert_eq!(rack[0], Vec2::new(0.0, consts::HEAD_PIN_Z));
        // Back row: pins 7-10
        let back: Vec<f32> = rack[6..].iter().map(|p| p.x).collect();
        assert!((back[0] + back[3]).abs() < 1e-5);
        assert!((back[1] + back[2]).abs() < 1e-5);
        assert!(rack.iter().all(|p| p.y <= consts::HEAD_PIN_Z));
    }
}
