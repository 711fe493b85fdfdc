//! Application context
//!
//! One [`BowlingApp`] owns everything a playthrough needs: settings, the
//! scorekeeper, the throw resolver and the lane physics. Front ends feed it
//! frame deltas and input, then read snapshots and drain events.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::ThrowError;
use crate::scoring::Scorekeeper;
use crate::settings::Settings;
use crate::sim::{GameEvent, LanePhysics, ThrowResolver, TickInput, tick};
use crate::summary::SeriesSummary;

/// Hold-to-charge throw power
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowerMeter {
    level: f32,
    charging: bool,
}

impl PowerMeter {
    pub fn begin(&mut self) {
        self.level = 0.0;
        self.charging = true;
    }

    #[inline]
    pub fn is_charging(&self) -> bool {
        self.charging
    }

    /// Current level (0.0 - 1.0)
    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Add `rate * dt`, capped at full power; returns the new level
    pub fn charge(&mut self, dt: f32, rate: f32) -> f32 {
        if self.charging {
            self.level = (self.level + rate * dt).min(1.0);
        }
        self.level
    }

    /// Stop charging and hand back the throw power, floored at `min_power`
    pub fn release(&mut self, min_power: f32) -> Option<f32> {
        if !self.charging {
            return None;
        }
        let power = self.level.max(min_power).min(1.0);
        self.cancel();
        Some(power)
    }

    pub fn cancel(&mut self) {
        self.level = 0.0;
        self.charging = false;
    }
}

/// Everything a scoreboard or HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub player_name: String,
    pub game_number: usize,
    pub frame_number: u8,
    pub ball_number: u8,
    pub pins_remaining: u8,
    /// Current player's running total for the game in progress
    pub current_score: u16,
    pub is_game_complete: bool,
    pub can_throw: bool,
    pub combined_score: u32,
    pub combined_average: u32,
}

/// A lane, its bowlers and the machinery between them
pub struct BowlingApp<P: LanePhysics> {
    pub settings: Settings,
    pub scores: Scorekeeper,
    pub resolver: ThrowResolver,
    pub physics: P,
    pub power: PowerMeter,
    /// Last aim direction from input
    pub aim: Vec2,
    accumulator: f32,
}

impl<P: LanePhysics> BowlingApp<P> {
    pub fn new(settings: Settings, physics: P) -> Self {
        Self {
            scores: Scorekeeper::new(settings.mode, settings.games_per_series),
            resolver: ThrowResolver::new(&settings),
            settings,
            physics,
            power: PowerMeter::default(),
            aim: Vec2::NEG_Y,
            accumulator: 0.0,
        }
    }

    /// Rack the lane for the first frame
    pub fn start(&mut self) {
        self.resolver.reset(&mut self.physics);
        let player = self.scores.current_player().name.clone();
        log::info!(
            "{} series: {} x {} games",
            self.scores.mode.as_str(),
            self.scores.players.len(),
            self.settings.games_per_series
        );
        self.resolver
            .push_event(GameEvent::Status(format!("{}: frame 1 ready - aim and throw!", player)));
    }

    /// Run as many fixed ticks as `dt` covers; returns how many ran
    ///
    /// One-shot inputs are consumed by the first tick.
    pub fn update(&mut self, dt: f32, input: &mut TickInput) -> u32 {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(self, input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            input.clear_one_shots();
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Throw immediately, bypassing the power meter
    pub fn throw_ball(&mut self, direction: Vec2, power: f32) -> Result<(), ThrowError> {
        self.power.cancel();
        self.resolver.throw_ball(&mut self.physics, direction, power)
    }

    pub fn can_throw(&self) -> bool {
        self.resolver.can_throw(&self.physics)
    }

    pub fn is_series_complete(&self) -> bool {
        self.scores.is_series_complete()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let player = self.scores.current_player();
        GameSnapshot {
            player_name: player.name.clone(),
            game_number: player.series.game_number(),
            frame_number: player.series.current_frame().frame_number,
            ball_number: self.resolver.ball_number(),
            pins_remaining: self.resolver.pins_remaining(),
            current_score: player.series.game_score(),
            is_game_complete: player.series.current_game().is_complete,
            can_throw: self.can_throw(),
            combined_score: self.scores.combined_score(),
            combined_average: self.scores.combined_average(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.resolver.drain_events()
    }

    pub fn summary(&self) -> SeriesSummary {
        SeriesSummary::from(&self.scores)
    }

    /// Start the whole series over
    pub fn reset(&mut self) {
        self.scores.reset();
        self.power.cancel();
        self.accumulator = 0.0;
        self.resolver.reset(&mut self.physics);
        let player = self.scores.current_player().name.clone();
        self.resolver
            .push_event(GameEvent::Status(format!("New series! {}: frame 1 ready", player)));
    }
}
