//! Top-down lane physics
//!
//! Ball and pins are discs on the lane plane. Pins also carry a tilt angle
//! so they can wobble and topple; a pin tipped past the knockdown tilt, or
//! one that slid off the deck, is down.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::physics::LanePhysics;
use crate::consts::*;
use crate::rack_positions;
use crate::settings::{LaneBounds, Settings, Thresholds};

/// Exponential velocity damping on the oiled lane (1/s)
const BALL_DAMPING: f32 = 0.05;
/// Constant rolling resistance (m/s^2)
const BALL_ROLL_DECEL: f32 = 0.15;
/// Lateral acceleration per unit of spin once past the oil (m/s^2)
const HOOK_ACCEL: f32 = 1.2;
/// Oil pattern ends here; hook only applies beyond it
const OIL_END_Z: f32 = -2.0;
/// Ball sits this far below lane level once in a gutter
const GUTTER_DEPTH: f32 = 0.1;

const PIN_DAMPING: f32 = 3.0;
const PIN_STOP_SPEED: f32 = 0.05;
/// Restitution for ball-pin and pin-pin contacts
const RESTITUTION: f32 = 0.6;
/// Tilt rate gained per unit of velocity change from a hit (rad/m)
const TOPPLE_PER_DV: f32 = 0.6;
/// Past this tilt gravity takes over and the pin falls
const TIP_OVER_TILT: f32 = 0.2;
const TOPPLE_GRAVITY: f32 = 30.0;
const WOBBLE_RESTORE: f32 = 40.0;
const TILT_DAMPING: f32 = 2.0;
/// Random spread on pin scatter direction (radians)
const SCATTER_JITTER: f32 = 0.15;

#[derive(Debug, Clone)]
struct BallBody {
    pos: Vec2,
    vel: Vec2,
    spin: f32,
    in_gutter: bool,
}

impl BallBody {
    fn height(&self) -> f32 {
        if self.in_gutter { -GUTTER_DEPTH } else { 0.0 }
    }
}

#[derive(Debug, Clone)]
struct PinBody {
    pos: Vec2,
    vel: Vec2,
    tilt: f32,
    tilt_rate: f32,
    off_deck: bool,
}

impl PinBody {
    fn standing_at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            tilt: 0.0,
            tilt_rate: 0.0,
            off_deck: false,
        }
    }

    /// Push a hit into tilt so hard hits topple the pin
    fn absorb_hit(&mut self, dv: f32) {
        self.tilt_rate += dv.abs() * TOPPLE_PER_DV;
    }
}

/// Simple deterministic ball and pin simulation
#[derive(Debug, Clone)]
pub struct SimpleLane {
    ball: Option<BallBody>,
    pins: Vec<PinBody>,
    thresholds: Thresholds,
    bounds: LaneBounds,
    /// Spin given to the next thrown ball
    spin: f32,
    rng: Pcg32,
}

impl SimpleLane {
    pub fn new(settings: &Settings) -> Self {
        Self {
            ball: None,
            pins: Vec::new(),
            thresholds: settings.thresholds,
            bounds: settings.bounds,
            spin: 0.0,
            rng: Pcg32::seed_from_u64(settings.seed),
        }
    }

    /// Spin (-1.0 - 1.0) for the next throw; positive hooks toward +x
    pub fn set_spin(&mut self, spin: f32) {
        self.spin = spin.clamp(-1.0, 1.0);
    }

    fn step_ball(&mut self, dt: f32) {
        let Some(ball) = self.ball.as_mut() else {
            return;
        };

        if ball.pos.y < OIL_END_Z && !ball.in_gutter {
            ball.vel.x += ball.spin * HOOK_ACCEL * dt;
        }
        ball.vel *= 1.0 - BALL_DAMPING * dt;
        let speed = ball.vel.length();
        let decel = BALL_ROLL_DECEL * dt;
        ball.vel = if speed <= decel {
            Vec2::ZERO
        } else {
            ball.vel * ((speed - decel) / speed)
        };
        ball.pos += ball.vel * dt;

        let gutter_edge = LANE_HALF_WIDTH + BALL_RADIUS;
        if !ball.in_gutter && ball.pos.x.abs() > LANE_HALF_WIDTH {
            log::debug!("Ball dropped into the gutter at z={:.2}", ball.pos.y);
            ball.in_gutter = true;
        }
        if ball.in_gutter {
            // Gutter channel: no lateral motion, no pins
            ball.pos.x = gutter_edge.copysign(ball.pos.x);
            ball.vel.x = 0.0;
        }
    }

    fn collide_ball_pins(&mut self) {
        let Some(ball) = self.ball.as_mut() else {
            return;
        };
        if ball.in_gutter {
            return;
        }

        let reach = BALL_RADIUS + PIN_RADIUS;
        let inv_mass_sum = 1.0 / BALL_MASS + 1.0 / PIN_MASS;
        for pin in self.pins.iter_mut().filter(|p| !p.off_deck) {
            let offset = pin.pos - ball.pos;
            let dist = offset.length();
            if dist >= reach || dist <= f32::EPSILON {
                continue;
            }
            let normal = offset / dist;
            let approach = (ball.vel - pin.vel).dot(normal);
            if approach > 0.0 {
                let impulse = (1.0 + RESTITUTION) * approach / inv_mass_sum;
                ball.vel -= normal * (impulse / BALL_MASS);
                let jitter = self.rng.random_range(-SCATTER_JITTER..SCATTER_JITTER);
                let dv = impulse / PIN_MASS;
                pin.vel += Vec2::from_angle(jitter).rotate(normal) * dv;
                pin.absorb_hit(dv);
            }
            // Separate along the contact normal
            pin.pos = ball.pos + normal * reach;
        }
    }

    fn collide_pins(&mut self) {
        let reach = PIN_RADIUS * 2.0;
        let count = self.pins.len();
        for i in 0..count {
            for j in (i + 1)..count {
                let (head, tail) = self.pins.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);
                if a.off_deck || b.off_deck {
                    continue;
                }
                let offset = b.pos - a.pos;
                let dist = offset.length();
                if dist >= reach || dist <= f32::EPSILON {
                    continue;
                }
                let normal = offset / dist;
                let approach = (a.vel - b.vel).dot(normal);
                if approach > 0.0 {
                    // Equal masses: each takes half the exchanged velocity
                    let dv = (1.0 + RESTITUTION) * approach * 0.5;
                    a.vel -= normal * dv;
                    b.vel += normal * dv;
                    a.absorb_hit(dv);
                    b.absorb_hit(dv);
                }
                let overlap = (reach - dist) * 0.5;
                a.pos -= normal * overlap;
                b.pos += normal * overlap;
            }
        }
    }

    fn step_pins(&mut self, dt: f32) {
        let max_tilt = std::f32::consts::FRAC_PI_2;
        for (index, pin) in self.pins.iter_mut().enumerate() {
            if pin.off_deck {
                continue;
            }

            pin.pos += pin.vel * dt;
            pin.vel *= (1.0 - PIN_DAMPING * dt).max(0.0);
            if pin.vel.length() < PIN_STOP_SPEED {
                pin.vel = Vec2::ZERO;
            }

            let torque = if pin.tilt > TIP_OVER_TILT {
                TOPPLE_GRAVITY * pin.tilt.sin()
            } else {
                -WOBBLE_RESTORE * pin.tilt
            };
            pin.tilt_rate += torque * dt;
            pin.tilt_rate *= (1.0 - TILT_DAMPING * dt).max(0.0);
            pin.tilt = (pin.tilt + pin.tilt_rate * dt).clamp(0.0, max_tilt);
            if (pin.tilt <= 0.0 && pin.tilt_rate < 0.0) || (pin.tilt >= max_tilt && pin.tilt_rate > 0.0) {
                pin.tilt_rate = 0.0;
            }
            if pin.tilt <= 0.0 && pin.tilt_rate.abs() < PIN_STOP_SPEED {
                pin.tilt_rate = 0.0;
            }

            if pin.pos.y < self.bounds.pit_z || pin.pos.x.abs() > LANE_HALF_WIDTH {
                log::trace!("Pin {} left the deck", index);
                pin.off_deck = true;
                pin.vel = Vec2::ZERO;
                pin.tilt = max_tilt;
                pin.tilt_rate = 0.0;
            }
        }
    }
}

impl LanePhysics for SimpleLane {
    fn step(&mut self, dt: f32) {
        self.step_ball(dt);
        self.collide_ball_pins();
        self.collide_pins();
        self.step_pins(dt);
    }

    fn pin_count(&self) -> usize {
        self.pins.len()
    }

    fn is_pin_down(&self, pin: usize) -> bool {
        self.pins
            .get(pin)
            .is_some_and(|p| p.off_deck || p.tilt > self.thresholds.knockdown_tilt)
    }

    fn is_pin_moving(&self, pin: usize) -> bool {
        self.pins.get(pin).is_some_and(|p| {
            !p.off_deck
                && (p.vel.length() > self.thresholds.pin_moving_speed
                    || p.tilt_rate.abs() > self.thresholds.pin_moving_spin)
        })
    }

    fn has_ball(&self) -> bool {
        self.ball.is_some()
    }

    fn ball_position(&self) -> Option<Vec2> {
        self.ball.as_ref().map(|b| b.pos)
    }

    fn is_ball_at_rest(&self) -> bool {
        self.ball
            .as_ref()
            .is_some_and(|b| b.vel.length() < self.thresholds.ball_rest_speed)
    }

    fn has_ball_exited(&self) -> bool {
        self.ball
            .as_ref()
            .is_some_and(|b| self.bounds.is_outside(b.pos.x, b.height(), b.pos.y))
    }

    fn apply_throw(&mut self, direction: Vec2, power: f32) {
        let spin = self.spin;
        if let Some(ball) = self.ball.as_mut() {
            ball.vel += direction * (THROW_IMPULSE * power / BALL_MASS);
            ball.spin = spin;
        }
    }

    fn stop_ball(&mut self) {
        self.ball = None;
    }

    fn create_ball(&mut self, position: Vec2) {
        self.ball = Some(BallBody {
            pos: position,
            vel: Vec2::ZERO,
            spin: 0.0,
            in_gutter: false,
        });
    }

    fn create_pins(&mut self) {
        self.pins = rack_positions().into_iter().map(PinBody::standing_at).collect();
    }

    fn remove_pin(&mut self, pin: usize) {
        if pin < self.pins.len() {
            self.pins.remove(pin);
        }
    }

    fn clear(&mut self) {
        self.ball = None;
        self.pins.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(lane: &mut SimpleLane, direction: Vec2, power: f32) -> bool {
        lane.reset_full();
        lane.apply_throw(direction.normalize(), power);
        for _ in 0..(6.0 / SIM_DT) as usize {
            lane.step(SIM_DT);
            if lane.has_ball_exited() {
                return true;
            }
        }
        false
    }

    #[test]
    fn test_fresh_rack() {
        let mut lane = SimpleLane::new(&Settings::default());
        lane.reset_full();
        assert_eq!(lane.pin_count(), 10);
        assert_eq!(lane.standing_pin_count(), 10);
        assert!(lane.is_ball_at_rest());
        assert_eq!(lane.moving_pin_count(), 0);
    }

    #[test]
    fn test_straight_throw_scatters_pins() {
        let mut lane = SimpleLane::new(&Settings::default());
        assert!(roll(&mut lane, Vec2::NEG_Y, 1.0));
        assert!(lane.standing_pin_count() < 10);
    }

    #[test]
    fn test_gutter_ball_misses() {
        let mut lane = SimpleLane::new(&Settings::default());
        assert!(roll(&mut lane, Vec2::new(0.3, -1.0), 1.0));
        assert_eq!(lane.standing_pin_count(), 10);
    }

    #[test]
    fn test_backward_throw_exits_approach() {
        let mut lane = SimpleLane::new(&Settings::default());
        assert!(roll(&mut lane, Vec2::Y, 0.5));
        assert_eq!(lane.standing_pin_count(), 10);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut a = SimpleLane::new(&settings);
        let mut b = SimpleLane::new(&settings);
        roll(&mut a, Vec2::new(0.02, -1.0), 0.9);
        roll(&mut b, Vec2::new(0.02, -1.0), 0.9);

        for i in 0..10 {
            assert_eq!(a.is_pin_down(i), b.is_pin_down(i));
            assert_eq!(a.pins[i].pos, b.pins[i].pos);
        }
    }

    #[test]
    fn test_keep_standing_removes_knocked() {
        let mut lane = SimpleLane::new(&Settings::default());
        lane.reset_full();
        lane.reset_keep_standing(&[9, 4, 0]);
        assert_eq!(lane.pin_count(), 7);
        assert!(lane.has_ball());
    }
}
