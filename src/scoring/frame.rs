//! A single scoring frame
//!
//! Frames 1-9 hold up to two throws, frame 10 up to three. A frame only
//! knows its own throws; bonus resolution happens in [`super::Game`].

use serde::{Deserialize, Serialize};

use crate::consts::{FRAMES_PER_GAME, PIN_COUNT};

const FULL_RACK: u8 = PIN_COUNT as u8;

/// One frame's recorded throws and derived score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameScore {
    /// 1-based frame number (1..=10)
    pub frame_number: u8,
    /// Pins knocked down per throw, in order
    pub throws: Vec<u8>,
    /// This frame's own score, once every throw it depends on is known
    pub score: Option<u16>,
    /// Running total through this frame, once this and all earlier frames are scored
    pub cumulative: Option<u16>,
    pub is_strike: bool,
    pub is_spare: bool,
    pub is_complete: bool,
}

impl FrameScore {
    pub fn new(frame_number: u8) -> Self {
        Self {
            frame_number,
            throws: Vec::with_capacity(3),
            score: None,
            cumulative: None,
            is_strike: false,
            is_spare: false,
            is_complete: false,
        }
    }

    #[inline]
    pub fn is_tenth(&self) -> bool {
        self.frame_number as usize == FRAMES_PER_GAME
    }

    /// Most throws this frame can ever hold
    #[inline]
    pub fn max_throws(&self) -> usize {
        if self.is_tenth() { 3 } else { 2 }
    }

    /// Sum of all recorded throws
    pub fn pin_total(&self) -> u16 {
        self.throws.iter().map(|&p| p as u16).sum()
    }

    /// First throw, if any
    #[inline]
    pub fn first(&self) -> Option<u8> {
        self.throws.first().copied()
    }

    /// Second throw, if any
    #[inline]
    pub fn second(&self) -> Option<u8> {
        self.throws.get(1).copied()
    }

    /// Pins standing in front of the next ball of this frame
    ///
    /// The tenth frame re-racks after a strike or a spare, so its count
    /// depends on where the previous ball left the deck.
    pub fn pins_standing(&self) -> u8 {
        match self.throws.as_slice() {
            [] => FULL_RACK,
            [t1] if *t1 >= FULL_RACK => FULL_RACK,
            [t1] => FULL_RACK - t1,
            [t1, t2] if self.is_tenth() => {
                if *t1 >= FULL_RACK {
                    if *t2 >= FULL_RACK { FULL_RACK } else { FULL_RACK - t2 }
                } else if t1 + t2 == FULL_RACK {
                    FULL_RACK
                } else {
                    0
                }
            }
            _ => 0,
        }
    }

    /// Re-derive strike/spare/complete flags from the recorded throws
    pub(crate) fn apply_completion_rules(&mut self) {
        let t1 = self.first();
        let t2 = self.second();

        self.is_strike = t1 == Some(FULL_RACK);
        self.is_spare = match (t1, t2) {
            (Some(a), Some(b)) => a < FULL_RACK && a + b == FULL_RACK,
            _ => false,
        };

        self.is_complete = if self.is_tenth() {
            if self.is_strike || self.is_spare {
                self.throws.len() >= 3
            } else {
                self.throws.len() >= 2
            }
        } else {
            self.is_strike || self.throws.len() >= 2
        };
    }

    /// Scorecard marks for each ball slot: `X`, `/`, `-`, a digit, or blank
    pub fn marks(&self) -> Vec<char> {
        let mut marks = vec![' '; self.max_throws()];
        // Pins already down on the current rack before this ball
        let mut rack_down: Option<u8> = None;

        for (slot, &pins) in self.throws.iter().enumerate() {
            marks[slot] = match rack_down {
                None if pins == FULL_RACK => 'X',
                Some(prev) if prev + pins == FULL_RACK => '/',
                _ if pins == 0 => '-',
                _ => char::from_digit(pins as u32, 10).unwrap_or('?'),
            };

            rack_down = match rack_down {
                // Fresh rack: a strike re-racks, otherwise the second ball follows
                None if pins == FULL_RACK => None,
                None => Some(pins),
                // Second ball always ends this rack
                Some(_) => None,
            };
        }

        marks
    }
}
