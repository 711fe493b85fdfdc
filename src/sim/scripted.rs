//! Scripted lane for deterministic tests and replays
//!
//! Each throw follows a pre-recorded outcome instead of real dynamics: the
//! ball rolls for a while, knocks down a fixed number of standing pins, then
//! either leaves the lane or comes to rest.

use std::collections::VecDeque;

use glam::Vec2;

use super::physics::LanePhysics;
use crate::consts::PIN_COUNT;

/// Seconds a scripted ball rolls before reaching the pins
const ROLL_SECS: f32 = 0.25;
/// Bounce: at rest for this long, then rolling for this long
const BOUNCE_REST_SECS: f32 = 0.3;
const BOUNCE_ROLL_SECS: f32 = 0.3;

/// How a scripted throw ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// Ball leaves the play volume
    Exit,
    /// Ball stops on the lane
    Rest,
}

/// One pre-recorded throw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedThrow {
    /// Standing pins to knock down (lowest indices first)
    pub knock: u8,
    pub ending: Ending,
    pub roll_secs: f32,
    /// Stop briefly, roll again, then stop for good
    pub bounce: bool,
    /// Knocked pins that keep moving after the hit
    pub lingering_pins: usize,
    pub linger_secs: f32,
    /// Standing pins that topple this long after the hit, whatever the ball does
    pub late_falls: u8,
    pub late_fall_secs: f32,
}

impl ScriptedThrow {
    pub fn exit(knock: u8) -> Self {
        Self {
            knock,
            ending: Ending::Exit,
            roll_secs: ROLL_SECS,
            bounce: false,
            lingering_pins: 0,
            linger_secs: 0.0,
            late_falls: 0,
            late_fall_secs: 0.0,
        }
    }

    pub fn rest(knock: u8) -> Self {
        Self {
            ending: Ending::Rest,
            ..Self::exit(knock)
        }
    }

    pub fn with_bounce(mut self) -> Self {
        self.bounce = true;
        self
    }

    pub fn with_lingering(mut self, pins: usize, secs: f32) -> Self {
        self.lingering_pins = pins;
        self.linger_secs = secs;
        self
    }

    pub fn with_late_fall(mut self, pins: u8, secs: f32) -> Self {
        self.late_falls = pins;
        self.late_fall_secs = secs;
        self
    }

    fn is_at_rest(&self, elapsed: f32) -> bool {
        if self.ending == Ending::Exit || elapsed < self.roll_secs {
            return false;
        }
        if !self.bounce {
            return true;
        }
        let since_hit = elapsed - self.roll_secs;
        !(BOUNCE_REST_SECS..BOUNCE_REST_SECS + BOUNCE_ROLL_SECS).contains(&since_hit)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ScriptedPin {
    down: bool,
    moving_secs: f32,
}

#[derive(Debug, Clone)]
struct ScriptedBall {
    position: Vec2,
    throw: Option<ScriptedThrow>,
    elapsed: f32,
    hit: bool,
}

/// [`LanePhysics`] driven by a queue of [`ScriptedThrow`]s
///
/// Throws past the end of the script are gutter balls.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLane {
    pins: Vec<ScriptedPin>,
    ball: Option<ScriptedBall>,
    script: VecDeque<ScriptedThrow>,
    /// Seconds left and pin count of a pending late fall
    late_fall: Option<(f32, u8)>,
    /// Throws the resolver actually released
    pub throws_applied: usize,
    /// Direction and power of the latest throw
    pub last_throw: Option<(Vec2, f32)>,
}

impl ScriptedLane {
    pub fn new(throws: impl IntoIterator<Item = ScriptedThrow>) -> Self {
        Self {
            script: throws.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Every throw knocks `pins[i]` and rolls into the pit
    pub fn from_pins(pins: impl IntoIterator<Item = u8>) -> Self {
        Self::new(pins.into_iter().map(ScriptedThrow::exit))
    }

    pub fn push_throw(&mut self, throw: ScriptedThrow) {
        self.script.push_back(throw);
    }

    /// Throws not yet used
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    fn hit_pins(&mut self, throw: &ScriptedThrow) {
        let mut lingering = throw.lingering_pins;
        for pin in self.pins.iter_mut().filter(|p| !p.down).take(throw.knock as usize) {
            pin.down = true;
            if lingering > 0 {
                pin.moving_secs = throw.linger_secs;
                lingering -= 1;
            }
        }
        if throw.late_falls > 0 {
            self.late_fall = Some((throw.late_fall_secs, throw.late_falls));
        }
    }

    fn step_late_fall(&mut self, dt: f32) {
        let Some((secs, count)) = self.late_fall else {
            return;
        };
        let secs = secs - dt;
        if secs > 0.0 {
            self.late_fall = Some((secs, count));
            return;
        }
        self.late_fall = None;
        for pin in self.pins.iter_mut().filter(|p| !p.down).take(count as usize) {
            pin.down = true;
        }
    }
}

impl LanePhysics for ScriptedLane {
    fn step(&mut self, dt: f32) {
        for pin in &mut self.pins {
            pin.moving_secs = (pin.moving_secs - dt).max(0.0);
        }
        self.step_late_fall(dt);

        let Some(ball) = self.ball.as_mut() else {
            return;
        };
        let Some(throw) = ball.throw else {
            return;
        };
        ball.elapsed += dt;
        if !ball.hit && ball.elapsed >= throw.roll_secs {
            ball.hit = true;
            ball.position = crate::rack_positions()[0];
            self.hit_pins(&throw);
        }
    }

    fn pin_count(&self) -> usize {
        self.pins.len()
    }

    fn is_pin_down(&self, pin: usize) -> bool {
        self.pins.get(pin).is_some_and(|p| p.down)
    }

    fn is_pin_moving(&self, pin: usize) -> bool {
        self.pins.get(pin).is_some_and(|p| p.moving_secs > 0.0)
    }

    fn has_ball(&self) -> bool {
        self.ball.is_some()
    }

    fn ball_position(&self) -> Option<Vec2> {
        self.ball.as_ref().map(|b| b.position)
    }

    fn is_ball_at_rest(&self) -> bool {
        match &self.ball {
            Some(ScriptedBall { throw: None, .. }) => true,
            Some(ScriptedBall {
                throw: Some(throw),
                elapsed,
                ..
            }) => throw.is_at_rest(*elapsed),
            None => false,
        }
    }

    fn has_ball_exited(&self) -> bool {
        self.ball.as_ref().is_some_and(|b| {
            b.throw
                .is_some_and(|t| t.ending == Ending::Exit && b.elapsed >= t.roll_secs)
        })
    }

    fn apply_throw(&mut self, direction: Vec2, power: f32) {
        let throw = self
            .script
            .pop_front()
            .unwrap_or_else(|| ScriptedThrow::exit(0));
        if let Some(ball) = self.ball.as_mut() {
            ball.throw = Some(throw);
            ball.elapsed = 0.0;
            ball.hit = false;
        }
        self.throws_applied += 1;
        self.last_throw = Some((direction, power));
    }

    fn stop_ball(&mut self) {
        self.ball = None;
    }

    fn create_ball(&mut self, position: Vec2) {
        self.ball = Some(ScriptedBall {
            position,
            throw: None,
            elapsed: 0.0,
            hit: false,
        });
    }

    fn create_pins(&mut self) {
        self.pins = vec![ScriptedPin::default(); PIN_COUNT];
    }

    fn remove_pin(&mut self, pin: usize) {
        if pin < self.pins.len() {
            self.pins.remove(pin);
        }
    }

    fn clear(&mut self) {
        self.pins.clear();
        self.ball = None;
        self.late_fall = None;
    }
}
