//! One player's series of games

use serde::{Deserialize, Serialize};

use super::frame::FrameScore;
use super::game::{Game, ThrowOutcome};
use crate::error::ScoringError;

/// Default number of games in a series
pub const DEFAULT_GAMES_PER_SERIES: usize = 3;

/// A fixed-length run of games for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub games: Vec<Game>,
    pub current_game_index: usize,
    pub max_games: usize,
}

impl Default for Series {
    fn default() -> Self {
        Self::new(DEFAULT_GAMES_PER_SERIES)
    }
}

impl Series {
    pub fn new(max_games: usize) -> Self {
        let max_games = max_games.max(1);
        let mut games = Vec::with_capacity(max_games);
        games.push(Game::new());
        Self {
            games,
            current_game_index: 0,
            max_games,
        }
    }

    pub fn current_game(&self) -> &Game {
        &self.games[self.current_game_index]
    }

    pub fn current_frame(&self) -> &FrameScore {
        self.current_game().current_frame()
    }

    /// 1-based game number
    #[inline]
    pub fn game_number(&self) -> usize {
        self.current_game_index + 1
    }

    pub fn try_record_throw(&mut self, pins: u8) -> Result<ThrowOutcome, ScoringError> {
        self.games[self.current_game_index].try_record_throw(pins)
    }

    pub fn record_throw(&mut self, pins: u8) -> bool {
        self.games[self.current_game_index].record_throw(pins)
    }

    /// Whether `start_next_game` would succeed right now
    pub fn can_start_next_game(&self) -> bool {
        self.current_game().is_complete && self.games.len() < self.max_games
    }

    /// Begin the next game; false once the series is exhausted or the current game is unfinished
    pub fn start_next_game(&mut self) -> bool {
        if !self.can_start_next_game() {
            return false;
        }
        self.games.push(Game::new());
        self.current_game_index = self.games.len() - 1;
        true
    }

    /// Every game slot played to completion
    pub fn is_complete(&self) -> bool {
        self.games.len() >= self.max_games && self.games.iter().all(|g| g.is_complete)
    }

    /// Current game's running total
    pub fn game_score(&self) -> u16 {
        self.current_game().total_score
    }

    /// Rounded mean of completed games, 0 if none
    pub fn series_average(&self) -> u16 {
        let completed: Vec<u16> = self
            .games
            .iter()
            .filter(|g| g.is_complete)
            .map(|g| g.total_score)
            .collect();
        if completed.is_empty() {
            return 0;
        }
        let total: u32 = completed.iter().map(|&s| s as u32).sum();
        (total as f64 / completed.len() as f64).round() as u16
    }

    /// Sum of completed game totals
    pub fn series_total(&self) -> u32 {
        self.games
            .iter()
            .filter(|g| g.is_complete)
            .map(|g| g.total_score as u32)
            .sum()
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.max_games);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finish_game(series: &mut Series, pins: u8) {
        while !series.current_game().is_complete {
            let standing = series.current_game().pins_standing();
            assert!(series.record_throw(pins.min(standing)));
        }
    }

    #[test]
    fn test_cannot_start_next_game_mid_game() {
        let mut series = Series::new(3);
        series.record_throw(4);
        assert!(!series.start_next_game());
        assert_eq!(series.games.len(), 1);
    }

    #[test]
    fn test_series_exhausts_after_max_games() {
        let mut series = Series::new(2);
        finish_game(&mut series, 10);
        assert!(series.start_next_game());
        assert_eq!(series.game_number(), 2);
        finish_game(&mut series, 0);
        assert!(!series.start_next_game());
        assert!(series.is_complete());
        assert_eq!(series.games.len(), 2);
    }

    #[test]
    fn test_average_rounds_completed_games_only() {
        let mut series = Series::new(3);
        assert_eq!(series.series_average(), 0);

        finish_game(&mut series, 10); // 300
        series.start_next_game();
        // Nine-pin open frames every time: 90
        while !series.current_game().is_complete {
            assert!(series.record_throw(9));
            assert!(series.record_throw(0));
        }
        // 195 exactly
        assert_eq!(series.series_average(), 195);
        series.start_next_game();
        series.record_throw(10);
        // Unfinished third game ignored
        assert_eq!(series.series_average(), 195);
        assert_eq!(series.series_total(), 390);
    }

    #[test]
    fn test_average_rounds_half_up() {
        let mut series = Series::new(2);
        // 1 pin then a gutter each frame: 10
        while !series.current_game().is_complete {
            series.record_throw(1);
            series.record_throw(0);
        }
        series.start_next_game();
        // 11: one extra pin in the last frame
        for _ in 0..9 {
            series.record_throw(1);
            series.record_throw(0);
        }
        series.record_throw(2);
        series.record_throw(0);
        assert_eq!(series.series_average(), 11); // 10.5 rounds up
    }
}
