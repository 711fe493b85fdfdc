//! Ten-pin scoring
//!
//! Pure bookkeeping with no timing or physics:
//! - `frame`: One frame's throws, flags and scorecard marks
//! - `game`: Ten frames, bonus resolution, running total
//! - `series`: A player's fixed-length run of games
//! - `scorekeeper`: Roster and per-frame rotation

pub mod frame;
pub mod game;
pub mod scorekeeper;
pub mod series;

pub use frame::FrameScore;
pub use game::{Game, ThrowOutcome};
pub use scorekeeper::{GameMode, Player, Scorekeeper};
pub use series::{DEFAULT_GAMES_PER_SERIES, Series};
