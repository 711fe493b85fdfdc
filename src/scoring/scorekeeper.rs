//! Multi-player rotation
//!
//! Each player bowls a whole frame (all of its balls) before the cursor
//! moves on; the cursor wraps around the roster.

use serde::{Deserialize, Serialize};

use super::frame::FrameScore;
use super::game::ThrowOutcome;
use super::series::Series;
use crate::error::ScoringError;

/// Roster size/naming preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Singles,
    Doubles,
    Team,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Singles => "Singles",
            GameMode::Doubles => "Doubles",
            GameMode::Team => "Team",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "singles" | "single" | "1" => Some(GameMode::Singles),
            "doubles" | "double" | "2" => Some(GameMode::Doubles),
            "team" | "4" => Some(GameMode::Team),
            _ => None,
        }
    }

    /// Number of players on the roster
    pub fn player_count(&self) -> usize {
        match self {
            GameMode::Singles => 1,
            GameMode::Doubles => 2,
            GameMode::Team => 4,
        }
    }

    /// Display name for roster slot `index`
    pub fn player_name(&self, index: usize) -> String {
        match self {
            GameMode::Singles => "Player 1".to_string(),
            GameMode::Doubles => {
                let name = if index == 0 { "Athlete" } else { "Partner" };
                name.to_string()
            }
            GameMode::Team => {
                if index < 2 {
                    format!("Athlete {}", index + 1)
                } else {
                    format!("Partner {}", index - 1)
                }
            }
        }
    }
}

/// A named roster slot and its series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub series: Series,
}

/// Routes throws to whoever is up and keeps the rotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorekeeper {
    pub mode: GameMode,
    pub players: Vec<Player>,
    pub current_player_index: usize,
    games_per_series: usize,
}

impl Scorekeeper {
    pub fn new(mode: GameMode, games_per_series: usize) -> Self {
        let players = (0..mode.player_count())
            .map(|i| Player {
                name: mode.player_name(i),
                series: Series::new(games_per_series),
            })
            .collect();
        Self {
            mode,
            players,
            current_player_index: 0,
            games_per_series,
        }
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    /// Frame the current player is bowling
    pub fn current_frame(&self) -> &FrameScore {
        self.current_player().series.current_frame()
    }

    /// Record a throw for the current player, rotating once their frame is done
    pub fn try_record_throw(&mut self, pins: u8) -> Result<ThrowOutcome, ScoringError> {
        let index = self.current_player_index;
        let outcome = self.players[index].series.try_record_throw(pins)?;
        if outcome.is_frame_complete {
            self.advance_player();
        }
        Ok(outcome)
    }

    pub fn record_throw(&mut self, pins: u8) -> bool {
        match self.try_record_throw(pins) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("{}: throw rejected: {}", self.current_player().name, e);
                false
            }
        }
    }

    fn advance_player(&mut self) {
        let previous = self.current_player_index;
        self.current_player_index = (previous + 1) % self.players.len();
        if self.players.len() > 1 {
            log::debug!(
                "Rotation: {} -> {}",
                self.players[previous].name,
                self.current_player().name
            );
        }
    }

    /// Every player finished their current game
    pub fn is_round_complete(&self) -> bool {
        self.players.iter().all(|p| p.series.current_game().is_complete)
    }

    /// Round complete and nobody has a game slot left
    pub fn is_series_complete(&self) -> bool {
        self.is_round_complete() && self.players.iter().all(|p| !p.series.can_start_next_game())
    }

    /// Start the next game for every player; cursor returns to the first player
    pub fn start_next_game(&mut self) -> bool {
        if !self.is_round_complete() {
            return false;
        }
        let mut started = false;
        for player in &mut self.players {
            started |= player.series.start_next_game();
        }
        if started {
            self.current_player_index = 0;
            log::info!("Starting game {}", self.current_player().series.game_number());
        }
        started
    }

    /// Sum of every player's current-game score
    pub fn combined_score(&self) -> u32 {
        self.players.iter().map(|p| p.series.game_score() as u32).sum()
    }

    /// Sum of every player's series average
    pub fn combined_average(&self) -> u32 {
        self.players.iter().map(|p| p.series.series_average() as u32).sum()
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.mode, self.games_per_series);
    }
}
