//! Fixed timestep simulation tick
//!
//! Feeds one tick of player input into the power meter and the resolver,
//! steps the lane, then lets the resolver poll the result.

use glam::Vec2;

use super::physics::LanePhysics;
use super::state::GameEvent;
use crate::app::BowlingApp;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Aim direction (need not be normalized); kept until changed
    pub aim: Option<Vec2>,
    /// Throw button held
    pub charge: bool,
    /// Throw button released this tick
    pub release: bool,
    /// Restart the series
    pub reset: bool,
}

impl TickInput {
    /// Clear one-shot inputs after they were processed
    pub fn clear_one_shots(&mut self) {
        self.release = false;
        self.reset = false;
    }
}

/// Advance the lane by one fixed timestep
pub fn tick<P: LanePhysics>(app: &mut BowlingApp<P>, input: &TickInput, dt: f32) {
    if input.reset {
        app.reset();
        return;
    }

    if let Some(aim) = input.aim {
        app.aim = aim;
    }

    if input.charge {
        if !app.power.is_charging() && app.resolver.begin_aim() {
            app.power.begin();
        }
        if app.power.is_charging() {
            let level = app.power.charge(dt, app.settings.power_charge_rate);
            app.resolver.push_event(GameEvent::PowerMeter(level));
        }
    }

    if input.release {
        if let Some(power) = app.power.release(app.settings.min_throw_power) {
            app.resolver.push_event(GameEvent::PowerMeter(0.0));
            if let Err(e) = app.resolver.throw_ball(&mut app.physics, app.aim, power) {
                log::warn!("Throw rejected: {}", e);
                app.resolver.cancel_aim();
            }
        }
    }

    app.physics.step(dt);
    app.resolver.update(&mut app.physics, &mut app.scores, dt);
}
