//! Single-game scoring engine
//!
//! Owns the ten frames of one game. Every recorded throw re-runs the full
//! score pass, so bonus throws landing in later frames resolve earlier
//! strikes and spares without any bookkeeping of pending bonuses.

use serde::{Deserialize, Serialize};

use super::frame::FrameScore;
use crate::consts::{FRAMES_PER_GAME, PIN_COUNT};
use crate::error::ScoringError;

const FULL_RACK: u16 = PIN_COUNT as u16;

/// What a single recorded throw did to its frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowOutcome {
    /// Frame the throw landed in (1..=10)
    pub frame_number: u8,
    /// Ball number within that frame (1..=3)
    pub ball_number: u8,
    pub pins: u8,
    pub is_strike: bool,
    pub is_spare: bool,
    pub is_frame_complete: bool,
    pub is_game_complete: bool,
}

/// One game: exactly ten frames plus the running total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub frames: Vec<FrameScore>,
    pub total_score: u16,
    pub is_complete: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            frames: (1..=FRAMES_PER_GAME as u8).map(FrameScore::new).collect(),
            total_score: 0,
            is_complete: false,
        }
    }

    /// Index of the frame accepting the next throw
    ///
    /// First incomplete frame, or the tenth once every frame is complete.
    pub fn current_frame_index(&self) -> usize {
        let index = self
            .frames
            .iter()
            .position(|f| !f.is_complete)
            .unwrap_or(FRAMES_PER_GAME - 1);
        debug_assert!(
            self.frames[..index].iter().all(|f| f.is_complete),
            "frame {} open before current frame {}",
            index,
            index + 1
        );
        index
    }

    pub fn current_frame(&self) -> &FrameScore {
        &self.frames[self.current_frame_index()]
    }

    /// Pins standing for the next ball (0 once the game is over)
    pub fn pins_standing(&self) -> u8 {
        if self.is_complete {
            0
        } else {
            self.current_frame().pins_standing()
        }
    }

    /// Record a throw, validating it against the pins still standing
    pub fn try_record_throw(&mut self, pins: u8) -> Result<ThrowOutcome, ScoringError> {
        if pins as usize > PIN_COUNT {
            return Err(ScoringError::MalformedPinCount(pins));
        }
        if self.is_complete {
            return Err(ScoringError::GameComplete);
        }

        let index = self.current_frame_index();
        let frame = &mut self.frames[index];
        if frame.is_complete || frame.throws.len() >= frame.max_throws() {
            return Err(ScoringError::GameComplete);
        }

        let standing = frame.pins_standing();
        if pins > standing {
            return Err(ScoringError::ExceedsStanding {
                pins,
                standing,
                frame: frame.frame_number,
            });
        }

        frame.throws.push(pins);
        frame.apply_completion_rules();

        let outcome = ThrowOutcome {
            frame_number: frame.frame_number,
            ball_number: frame.throws.len() as u8,
            pins,
            is_strike: frame.is_strike,
            is_spare: frame.is_spare,
            is_frame_complete: frame.is_complete,
            is_game_complete: false,
        };

        self.calculate_scores();

        log::debug!(
            "Frame {} ball {}: {} pins (total {})",
            outcome.frame_number,
            outcome.ball_number,
            pins,
            self.total_score
        );

        Ok(ThrowOutcome {
            is_game_complete: self.is_complete,
            ..outcome
        })
    }

    /// Record a throw; false if the game is over or the throw was rejected
    pub fn record_throw(&mut self, pins: u8) -> bool {
        match self.try_record_throw(pins) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Throw rejected: {}", e);
                false
            }
        }
    }

    /// Full score pass over all ten frames
    fn calculate_scores(&mut self) {
        let scores: Vec<Option<u16>> = (0..FRAMES_PER_GAME).map(|i| self.frame_score(i)).collect();

        let mut total = 0u16;
        let mut running = Some(0u16);
        for (frame, score) in self.frames.iter_mut().zip(scores) {
            frame.score = score;
            if let Some(score) = score {
                total += score;
            }
            running = match (running, score) {
                (Some(sum), Some(score)) => Some(sum + score),
                _ => None,
            };
            frame.cumulative = running;
        }

        self.total_score = total;
        self.is_complete = self.frames[FRAMES_PER_GAME - 1].is_complete;
    }

    /// Score of frame `i` if every throw it depends on is known
    fn frame_score(&self, i: usize) -> Option<u16> {
        let frame = &self.frames[i];
        if frame.is_tenth() {
            return frame.is_complete.then(|| frame.pin_total());
        }

        let next = &self.frames[i + 1];
        if frame.is_strike {
            match next.throws.as_slice() {
                [a, b, ..] => Some(FULL_RACK + *a as u16 + *b as u16),
                [a] if next.is_strike && i < FRAMES_PER_GAME - 2 => {
                    let after = self.frames[i + 2].first()?;
                    Some(FULL_RACK + *a as u16 + after as u16)
                }
                _ => None,
            }
        } else if frame.is_spare {
            next.first().map(|a| FULL_RACK + a as u16)
        } else if frame.is_complete {
            Some(frame.pin_total())
        } else {
            None
        }
    }
}
