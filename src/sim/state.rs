//! Throw lifecycle states and the events the resolver emits

use serde::{Deserialize, Serialize};

/// Where the current throw is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThrowState {
    /// Ball on the approach, ready to throw
    #[default]
    Idle,
    /// Power meter charging
    Aiming,
    /// Ball rolling; sensors polled every tick
    InMotion,
    /// Ball at rest, waiting out the settle time
    SettlingAfterStop,
    /// Ball left the lane, pins get the settle time to finish falling
    SettlingAfterExit,
    /// Counting pins and recording the throw
    ResolvingCompletion,
    /// Reset or next game scheduled
    AwaitingFrameTransition,
}

impl ThrowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThrowState::Idle => "idle",
            ThrowState::Aiming => "aiming",
            ThrowState::InMotion => "ball in motion",
            ThrowState::SettlingAfterStop => "settling after stop",
            ThrowState::SettlingAfterExit => "settling after exit",
            ThrowState::ResolvingCompletion => "resolving throw",
            ThrowState::AwaitingFrameTransition => "waiting for reset",
        }
    }

    /// A new throw may start
    #[inline]
    pub fn accepts_throw(&self) -> bool {
        matches!(self, ThrowState::Idle | ThrowState::Aiming)
    }

    /// A thrown ball has not been resolved yet
    #[inline]
    pub fn is_live_throw(&self) -> bool {
        matches!(
            self,
            ThrowState::InMotion
                | ThrowState::SettlingAfterStop
                | ThrowState::SettlingAfterExit
                | ThrowState::ResolvingCompletion
        )
    }
}

/// Deferred work on the resolver's timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Settle timer after the ball left the lane
    CompleteThrow { throw_id: u64 },
    /// Fresh rack
    ResetFull,
    /// Clear knocked pins, keep the standing ones
    ResetKeepStanding,
    /// Every player finished the game: next game or end of series
    FinishGame,
}

/// Summary of one resolved throw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowResult {
    pub pins_knocked_down: u8,
    pub frame_number: u8,
    pub ball_number: u8,
    pub is_frame_complete: bool,
    pub is_strike: bool,
    pub is_spare: bool,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Status line text changed
    Status(String),
    /// Scorecard needs a redraw
    ScorecardChanged,
    /// Power meter level (0.0 - 1.0)
    PowerMeter(f32),
    /// A throw was scored
    ThrowResult(ThrowResult),
    /// Every player finished game `game_number`
    GameComplete { game_number: usize },
    /// Nothing left to bowl
    SeriesComplete { combined_average: u32 },
}
