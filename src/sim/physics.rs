//! Lane physics collaborator
//!
//! The resolver never sees bodies, only per-tick predicates. Pins are
//! addressed by index into a dense, ordered collection: removing a pin
//! shifts every later index down by one.

use glam::Vec2;

use crate::ball_start_position;

/// Everything the throw resolver needs from a ball/pin simulation
///
/// Positions are top-down lane coordinates: `x` across the lane, `y` down
/// the lane (negative toward the pins).
pub trait LanePhysics {
    /// Advance the simulation by `dt` seconds
    fn step(&mut self, dt: f32);

    /// Pins currently on the deck (standing or fallen)
    fn pin_count(&self) -> usize;
    /// Pin tipped past the knockdown tilt or fell off the deck
    fn is_pin_down(&self, pin: usize) -> bool;
    /// Pin still sliding or tumbling above the moving thresholds
    fn is_pin_moving(&self, pin: usize) -> bool;

    /// A ball is on the lane (thrown or waiting on the approach)
    fn has_ball(&self) -> bool;
    fn ball_position(&self) -> Option<Vec2>;
    /// Ball speed below the rest epsilon (false without a ball)
    fn is_ball_at_rest(&self) -> bool;
    /// Ball outside the play volume: pit, gutters, below the lane or back off the approach
    fn has_ball_exited(&self) -> bool;

    /// Impart the throw impulse; `direction` is already unit length, `power` in 0..=1
    fn apply_throw(&mut self, direction: Vec2, power: f32);
    /// Zero the ball's motion and detach it from the simulation
    fn stop_ball(&mut self);

    fn create_ball(&mut self, position: Vec2);
    /// Rack a full set of ten pins
    fn create_pins(&mut self);
    fn remove_pin(&mut self, pin: usize);
    /// Remove the ball and every pin
    fn clear(&mut self);

    /// Fresh rack and a new ball on the approach
    fn reset_full(&mut self) {
        self.clear();
        self.create_pins();
        self.create_ball(ball_start_position());
    }

    /// Clear the knocked pins, leave the standing ones, bring a new ball
    ///
    /// `knocked` must be sorted in descending index order.
    fn reset_keep_standing(&mut self, knocked: &[usize]) {
        debug_assert!(knocked.windows(2).all(|w| w[0] > w[1]), "indices not descending");
        for &pin in knocked {
            if pin < self.pin_count() {
                self.remove_pin(pin);
            }
        }
        self.create_ball(ball_start_position());
    }

    /// Pins on the deck that are not down
    fn standing_pin_count(&self) -> usize {
        (0..self.pin_count()).filter(|&i| !self.is_pin_down(i)).count()
    }

    /// Pins currently above the moving thresholds
    fn moving_pin_count(&self) -> usize {
        (0..self.pin_count()).filter(|&i| self.is_pin_moving(i)).count()
    }
}
