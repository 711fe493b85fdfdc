//! Throw resolution state machine
//!
//! Integrates per-tick lane sensors into a single "this throw is over"
//! decision, scores it exactly once, and schedules the pin reset that the
//! just-thrown frame calls for.
//!
//! ```text
//! Idle -> Aiming -> InMotion -> SettlingAfterStop --\
//!                      |   ^_________(bounce)____/   |
//!                      v                             v
//!               SettlingAfterExit -> ResolvingCompletion -> AwaitingFrameTransition -> Idle
//! ```

use std::collections::BTreeSet;

use glam::Vec2;

use super::physics::LanePhysics;
use super::schedule::Scheduler;
use super::state::{GameEvent, PendingAction, ThrowResult, ThrowState};
use crate::consts::{FRAMES_PER_GAME, PIN_COUNT};
use crate::error::ThrowError;
use crate::scoring::{Scorekeeper, ThrowOutcome};
use crate::settings::{Settings, Timing};

const FULL_RACK: u8 = PIN_COUNT as u8;

/// Owns the lifecycle of one throw at a time
#[derive(Debug, Clone)]
pub struct ThrowResolver {
    state: ThrowState,
    timing: Timing,
    max_moving_pins: usize,
    /// Simulated seconds since creation
    clock: f64,
    /// When the ball was first seen at rest in the current stop
    stopped_since: Option<f64>,
    /// Pins seen down during this throw; only ever grows until the reset
    knocked: BTreeSet<usize>,
    /// Next ball of the current frame (1..=3)
    ball_number: u8,
    pins_remaining: u8,
    throw_id: u64,
    resolved_throw: Option<u64>,
    series_over: bool,
    scheduler: Scheduler<PendingAction>,
    events: Vec<GameEvent>,
    last_result: Option<ThrowResult>,
}

impl ThrowResolver {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: ThrowState::Idle,
            timing: settings.timing,
            max_moving_pins: settings.thresholds.max_moving_pins,
            clock: 0.0,
            stopped_since: None,
            knocked: BTreeSet::new(),
            ball_number: 1,
            pins_remaining: FULL_RACK,
            throw_id: 0,
            resolved_throw: None,
            series_over: false,
            scheduler: Scheduler::new(),
            events: Vec::new(),
            last_result: None,
        }
    }

    #[inline]
    pub fn state(&self) -> ThrowState {
        self.state
    }

    #[inline]
    pub fn ball_number(&self) -> u8 {
        self.ball_number
    }

    #[inline]
    pub fn pins_remaining(&self) -> u8 {
        self.pins_remaining
    }

    #[inline]
    pub fn clock(&self) -> f64 {
        self.clock
    }

    #[inline]
    pub fn is_series_over(&self) -> bool {
        self.series_over
    }

    pub fn last_result(&self) -> Option<ThrowResult> {
        self.last_result
    }

    /// Indices of pins knocked down so far this throw
    pub fn knocked_pins(&self) -> Vec<usize> {
        self.knocked.iter().copied().collect()
    }

    /// Deferred actions still waiting to run
    pub fn pending_actions(&self) -> usize {
        self.scheduler.pending()
    }

    /// Whether `throw_ball` would be accepted
    pub fn can_throw<P: LanePhysics>(&self, physics: &P) -> bool {
        self.state.accepts_throw() && !self.series_over && physics.has_ball()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn status(&mut self, message: String) {
        log::debug!("Status: {}", message);
        self.events.push(GameEvent::Status(message));
    }

    /// Start charging a throw
    pub fn begin_aim(&mut self) -> bool {
        if self.state != ThrowState::Idle || self.series_over {
            return false;
        }
        self.state = ThrowState::Aiming;
        true
    }

    pub fn cancel_aim(&mut self) {
        if self.state == ThrowState::Aiming {
            self.state = ThrowState::Idle;
        }
    }

    /// Release the ball
    ///
    /// Rejected without any state change unless idle (or aiming) with a ball
    /// on the approach. Nothing is queued.
    pub fn throw_ball<P: LanePhysics>(
        &mut self,
        physics: &mut P,
        direction: Vec2,
        power: f32,
    ) -> Result<(), ThrowError> {
        if self.series_over {
            return Err(ThrowError::SeriesComplete);
        }
        if !self.state.accepts_throw() {
            log::warn!("Cannot throw while {}", self.state.as_str());
            return Err(ThrowError::NotReady(self.state.as_str()));
        }
        if !physics.has_ball() {
            log::warn!("Cannot throw without a ball");
            return Err(ThrowError::NoBall);
        }
        let direction = direction.try_normalize().ok_or(ThrowError::InvalidDirection)?;
        let power = if power.is_finite() { power.clamp(0.0, 1.0) } else { 0.0 };

        self.throw_id += 1;
        self.knocked.clear();
        self.stopped_since = None;
        self.state = ThrowState::InMotion;
        physics.apply_throw(direction, power);

        log::info!(
            "Throw {}: ball {} at ({:.2}, {:.2}) power {:.0}%",
            self.throw_id,
            self.ball_number,
            direction.x,
            direction.y,
            power * 100.0
        );
        Ok(())
    }

    /// Advance the timeline by `dt` and poll the sensors once
    ///
    /// Call after the physics step for the same tick.
    pub fn update<P: LanePhysics>(&mut self, physics: &mut P, scores: &mut Scorekeeper, dt: f32) {
        self.clock += dt as f64;

        while let Some(action) = self.scheduler.pop_due(self.clock) {
            self.run_action(action, physics, scores);
        }

        match self.state {
            ThrowState::InMotion | ThrowState::SettlingAfterStop => self.poll_motion(physics, scores),
            ThrowState::SettlingAfterExit => self.tally_knocked(physics),
            _ => {}
        }
    }

    fn tally_knocked<P: LanePhysics>(&mut self, physics: &P) {
        for pin in 0..physics.pin_count() {
            if physics.is_pin_down(pin) && self.knocked.insert(pin) {
                log::trace!("Pin {} down", pin);
            }
        }
    }

    fn poll_motion<P: LanePhysics>(&mut self, physics: &mut P, scores: &mut Scorekeeper) {
        self.tally_knocked(physics);

        if !physics.has_ball() || physics.has_ball_exited() {
            if let Some(pos) = physics.ball_position() {
                log::debug!("Ball exited lane at ({:.2}, {:.2})", pos.x, pos.y);
            }
            physics.stop_ball();
            self.stopped_since = None;
            self.state = ThrowState::SettlingAfterExit;
            self.scheduler.schedule(
                self.clock,
                self.timing.settle_secs,
                PendingAction::CompleteThrow {
                    throw_id: self.throw_id,
                },
            );
            return;
        }

        if physics.is_ball_at_rest() {
            let since = *self.stopped_since.get_or_insert(self.clock);
            if self.state == ThrowState::InMotion {
                log::debug!("Ball stopped, waiting for pins to settle");
                self.state = ThrowState::SettlingAfterStop;
            }

            if self.clock - since >= self.timing.settle_secs as f64 {
                let moving = physics.moving_pin_count();
                if moving <= self.max_moving_pins {
                    self.resolve_completion(physics, scores);
                } else {
                    log::trace!("Ball stopped but {} pins still moving", moving);
                }
            }
        } else if self.state == ThrowState::SettlingAfterStop {
            log::debug!("Ball moving again");
            self.stopped_since = None;
            self.state = ThrowState::InMotion;
        }
    }

    /// Count the pins, record the throw and schedule what comes next
    ///
    /// Runs at most once per throw; repeated calls return `None`.
    pub fn resolve_completion<P: LanePhysics>(
        &mut self,
        physics: &mut P,
        scores: &mut Scorekeeper,
    ) -> Option<ThrowResult> {
        if self.resolved_throw == Some(self.throw_id) || !self.state.is_live_throw() {
            log::debug!("Duplicate completion for throw {} ignored", self.throw_id);
            return None;
        }
        self.resolved_throw = Some(self.throw_id);
        self.state = ThrowState::ResolvingCompletion;
        self.stopped_since = None;
        self.tally_knocked(physics);

        let player_index = scores.current_player_index;
        let player = scores.current_player().name.clone();
        let standing = scores.current_player().series.current_game().pins_standing();
        let mut pins = self.knocked.len().min(PIN_COUNT) as u8;
        if pins > standing {
            log::warn!("Lane reports {} pins down with {} standing; clamping", pins, standing);
            pins = standing;
        }

        let outcome = match scores.try_record_throw(pins) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("{}: could not record throw: {}", player, e);
                self.state = ThrowState::AwaitingFrameTransition;
                self.scheduler
                    .schedule(self.clock, self.timing.frame_pause_secs, PendingAction::ResetFull);
                return None;
            }
        };

        let result = ThrowResult {
            pins_knocked_down: pins,
            frame_number: outcome.frame_number,
            ball_number: outcome.ball_number,
            is_frame_complete: outcome.is_frame_complete,
            is_strike: outcome.is_strike,
            is_spare: outcome.is_spare,
        };
        log::info!(
            "{}: frame {} ball {} knocked {} pins (game score {})",
            player,
            outcome.frame_number,
            outcome.ball_number,
            pins,
            scores.players[player_index].series.game_score()
        );

        self.status(throw_message(&player, pins, standing));
        self.events.push(GameEvent::ThrowResult(result));
        self.events.push(GameEvent::ScorecardChanged);
        self.last_result = Some(result);

        self.plan_transition(&outcome, scores);
        Some(result)
    }

    /// Pick the reset the just-thrown frame needs
    fn plan_transition(&mut self, outcome: &ThrowOutcome, scores: &Scorekeeper) {
        let is_tenth = outcome.frame_number as usize == FRAMES_PER_GAME;

        let (next_ball, action) = if !is_tenth {
            if outcome.is_frame_complete {
                (1, PendingAction::ResetFull)
            } else {
                (2, PendingAction::ResetKeepStanding)
            }
        } else if outcome.is_frame_complete {
            if scores.is_round_complete() {
                (1, PendingAction::FinishGame)
            } else {
                (1, PendingAction::ResetFull)
            }
        } else {
            // Same player is still up: a cleared rack gets re-racked
            let standing = scores.current_player().series.current_game().pins_standing();
            let action = if standing == FULL_RACK {
                PendingAction::ResetFull
            } else {
                PendingAction::ResetKeepStanding
            };
            (outcome.ball_number + 1, action)
        };

        log::debug!("Next: ball {} via {:?}", next_ball, action);
        self.ball_number = next_ball;
        self.state = ThrowState::AwaitingFrameTransition;
        self.scheduler
            .schedule(self.clock, self.timing.frame_pause_secs, action);
    }

    fn run_action<P: LanePhysics>(
        &mut self,
        action: PendingAction,
        physics: &mut P,
        scores: &mut Scorekeeper,
    ) {
        match action {
            PendingAction::CompleteThrow { throw_id } => {
                if throw_id == self.throw_id {
                    self.resolve_completion(physics, scores);
                }
            }
            PendingAction::ResetFull => {
                physics.reset_full();
                self.after_reset(physics, scores, false);
            }
            PendingAction::ResetKeepStanding => {
                // Pins that fell after the throw was scored are cleared too
                let down: Vec<usize> = (0..physics.pin_count())
                    .rev()
                    .filter(|&i| self.knocked.contains(&i) || physics.is_pin_down(i))
                    .collect();
                if down.len() > self.knocked.len() {
                    log::warn!(
                        "{} pins fell after the throw was scored",
                        down.len() - self.knocked.len()
                    );
                }
                physics.reset_keep_standing(&down);
                self.after_reset(physics, scores, true);
            }
            PendingAction::FinishGame => self.finish_game(scores),
        }
    }

    fn after_reset<P: LanePhysics>(&mut self, physics: &P, scores: &Scorekeeper, kept_standing: bool) {
        self.knocked.clear();
        self.stopped_since = None;
        self.pins_remaining = physics.standing_pin_count().min(PIN_COUNT) as u8;
        self.state = ThrowState::Idle;

        let expected = scores.current_player().series.current_game().pins_standing();
        if expected != self.pins_remaining {
            log::warn!(
                "Lane has {} pins standing, scorecard expects {}",
                self.pins_remaining,
                expected
            );
        }

        let player = scores.current_player().name.clone();
        let frame = scores.current_frame().frame_number;
        let message = if kept_standing {
            format!(
                "{}: ball {} - knock down the remaining {} pins!",
                player, self.ball_number, self.pins_remaining
            )
        } else if self.ball_number > 1 {
            format!("{}: fresh rack for ball {} of frame {}", player, self.ball_number, frame)
        } else {
            format!("{}: frame {} ready - aim and throw!", player, frame)
        };
        self.status(message);
        self.events.push(GameEvent::ScorecardChanged);
    }

    fn finish_game(&mut self, scores: &mut Scorekeeper) {
        let finished = scores.current_player().series.game_number();
        self.events.push(GameEvent::GameComplete {
            game_number: finished,
        });

        if scores.start_next_game() {
            self.ball_number = 1;
            self.state = ThrowState::AwaitingFrameTransition;
            self.status(format!(
                "Game {} complete! Starting game {}...",
                finished,
                finished + 1
            ));
            self.scheduler
                .schedule(self.clock, self.timing.game_pause_secs, PendingAction::ResetFull);
        } else {
            let combined_average = scores.combined_average();
            self.series_over = true;
            self.state = ThrowState::Idle;
            log::info!("Series complete after {} games", finished);
            self.status(format!("Series complete! Average: {}", combined_average));
            self.events.push(GameEvent::SeriesComplete { combined_average });
        }
    }

    /// Abandon whatever is in flight and rack a fresh frame
    ///
    /// Pending resets and settle timers become no-ops.
    pub fn reset<P: LanePhysics>(&mut self, physics: &mut P) {
        self.scheduler.invalidate();
        self.state = ThrowState::Idle;
        self.stopped_since = None;
        self.knocked.clear();
        self.ball_number = 1;
        self.series_over = false;
        self.last_result = None;
        physics.reset_full();
        self.pins_remaining = physics.standing_pin_count().min(PIN_COUNT) as u8;
        self.events.push(GameEvent::ScorecardChanged);
        log::info!("Lane reset (generation {})", self.scheduler.generation());
    }
}

fn throw_message(player: &str, pins: u8, standing: u8) -> String {
    if pins == FULL_RACK && standing == FULL_RACK {
        format!("{}: STRIKE!", player)
    } else if pins > 0 && pins == standing {
        format!("{}: {} pins - SPARE!", player, pins)
    } else if pins == 0 {
        format!("{}: Miss! Try again!", player)
    } else {
        format!("{}: {} pins knocked down!", player, pins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::scoring::GameMode;
    use crate::sim::scripted::{ScriptedLane, ScriptedThrow};

    struct Rig {
        resolver: ThrowResolver,
        lane: ScriptedLane,
        scores: Scorekeeper,
    }

    impl Rig {
        fn new(mode: GameMode, games: usize, throws: Vec<ScriptedThrow>) -> Self {
            let settings = Settings {
                games_per_series: games,
                ..Settings::for_mode(mode)
            };
            let mut lane = ScriptedLane::new(throws);
            let mut resolver = ThrowResolver::new(&settings);
            resolver.reset(&mut lane);
            Self {
                resolver,
                lane,
                scores: Scorekeeper::new(mode, games),
            }
        }

        fn run(&mut self, secs: f32) {
            let steps = (secs / SIM_DT).ceil() as usize;
            for _ in 0..steps {
                self.step();
            }
        }

        fn step(&mut self) {
            self.lane.step(SIM_DT);
            self.resolver.update(&mut self.lane, &mut self.scores, SIM_DT);
        }

        fn throw(&mut self) -> Result<(), ThrowError> {
            self.resolver.throw_ball(&mut self.lane, Vec2::NEG_Y, 0.7)
        }

        /// Throw and run until the lane is ready again
        fn bowl(&mut self) {
            self.throw().unwrap();
            for _ in 0..2000 {
                self.step();
                if self.resolver.can_throw(&self.lane) || self.resolver.is_series_over() {
                    return;
                }
            }
            panic!("throw never resolved (state {:?})", self.resolver.state());
        }

        fn frames(&self, player: usize) -> Vec<Vec<u8>> {
            self.scores.players[player]
                .series
                .current_game()
                .frames
                .iter()
                .map(|f| f.throws.clone())
                .collect()
        }
    }

    #[test]
    fn test_rejects_throw_unless_idle() {
        let mut rig = Rig::new(GameMode::Singles, 3, vec![ScriptedThrow::exit(3)]);
        assert!(rig.throw().is_ok());
        assert_eq!(rig.resolver.state(), ThrowState::InMotion);
        assert_eq!(rig.throw(), Err(ThrowError::NotReady("ball in motion")));
        assert_eq!(rig.lane.throws_applied, 1);
    }

    #[test]
    fn test_rejects_invalid_direction_and_missing_ball() {
        let mut rig = Rig::new(GameMode::Singles, 3, vec![]);
        assert_eq!(
            rig.resolver.throw_ball(&mut rig.lane, Vec2::ZERO, 0.5),
            Err(ThrowError::InvalidDirection)
        );
        rig.lane.stop_ball();
        assert_eq!(rig.throw(), Err(ThrowError::NoBall));
        assert_eq!(rig.resolver.state(), ThrowState::Idle);
    }

    #[test]
    fn test_exit_settles_then_keeps_standing_pins() {
        let mut rig = Rig::new(GameMode::Singles, 3, vec![ScriptedThrow::exit(7)]);
        rig.throw().unwrap();
        rig.run(0.3);
        assert_eq!(rig.resolver.state(), ThrowState::SettlingAfterExit);
        assert!(!rig.lane.has_ball());

        rig.run(0.85);
        assert_eq!(rig.resolver.state(), ThrowState::AwaitingFrameTransition);
        assert_eq!(rig.resolver.ball_number(), 2);
        assert_eq!(rig.frames(0)[0], vec![7]);

        rig.run(1.6);
        assert_eq!(rig.resolver.state(), ThrowState::Idle);
        assert_eq!(rig.resolver.pins_remaining(), 3);
        assert_eq!(rig.lane.pin_count(), 3);
        assert!(rig.lane.has_ball());
    }

    #[test]
    fn test_stopped_ball_waits_for_settle_and_bounce_resets_timer() {
        let mut rig = Rig::new(GameMode::Singles, 3, vec![ScriptedThrow::rest(4).with_bounce()]);
        rig.throw().unwrap();
        rig.run(0.3);
        assert_eq!(rig.resolver.state(), ThrowState::SettlingAfterStop);

        // Ball rolls again before the settle time elapses
        rig.run(0.35);
        assert_eq!(rig.resolver.state(), ThrowState::InMotion);

        rig.run(0.3);
        assert_eq!(rig.resolver.state(), ThrowState::SettlingAfterStop);
        assert!(rig.frames(0)[0].is_empty());

        rig.run(0.9);
        assert_eq!(rig.frames(0)[0], vec![4]);
    }

    #[test]
    fn test_moving_pins_hold_completion() {
        let mut rig = Rig::new(
            GameMode::Singles,
            3,
            vec![ScriptedThrow::rest(5).with_lingering(2, 2.0)],
        );
        rig.throw().unwrap();
        rig.run(1.5);
        assert_eq!(rig.resolver.state(), ThrowState::SettlingAfterStop);
        assert!(rig.frames(0)[0].is_empty());

        rig.run(1.0);
        assert_eq!(rig.frames(0)[0], vec![5]);
    }

    #[test]
    fn test_duplicate_completion_is_ignored() {
        let mut rig = Rig::new(GameMode::Singles, 3, vec![ScriptedThrow::exit(6)]);
        rig.throw().unwrap();
        rig.run(0.3);

        let first = rig.resolver.resolve_completion(&mut rig.lane, &mut rig.scores);
        let second = rig.resolver.resolve_completion(&mut rig.lane, &mut rig.scores);
        assert_eq!(first.map(|r| r.pins_knocked_down), Some(6));
        assert_eq!(second, None);

        // The settle timer fires later and must not record again
        rig.run(2.0);
        assert_eq!(rig.frames(0)[0], vec![6]);
        assert_eq!(rig.resolver.ball_number(), 2);
    }

    #[test]
    fn test_reset_mid_motion_discards_pending_completion() {
        let mut rig = Rig::new(GameMode::Singles, 3, vec![ScriptedThrow::exit(9)]);
        rig.throw().unwrap();
        rig.run(0.3);
        assert_eq!(rig.resolver.pending_actions(), 1);

        rig.resolver.reset(&mut rig.lane);
        assert_eq!(rig.resolver.pending_actions(), 0);
        rig.run(2.0);

        assert_eq!(rig.resolver.state(), ThrowState::Idle);
        assert!(rig.frames(0).iter().all(|f| f.is_empty()));
        assert_eq!(rig.lane.pin_count(), 10);
    }

    #[test]
    fn test_reset_during_frame_pause_cancels_keep_standing() {
        let mut rig = Rig::new(GameMode::Singles, 3, vec![ScriptedThrow::exit(7)]);
        rig.throw().unwrap();
        rig.run(1.2);
        assert_eq!(rig.resolver.state(), ThrowState::AwaitingFrameTransition);
        assert_eq!(rig.resolver.ball_number(), 2);
        assert_eq!(rig.resolver.pending_actions(), 1);

        rig.resolver.reset(&mut rig.lane);
        rig.run(3.0);

        // Stale keep-standing reset must not strip the fresh rack
        assert_eq!(rig.resolver.state(), ThrowState::Idle);
        assert_eq!(rig.resolver.ball_number(), 1);
        assert_eq!(rig.lane.pin_count(), 10);
        assert_eq!(rig.resolver.pins_remaining(), 10);
    }

    #[test]
    fn test_reset_during_frame_pause_cancels_finish_game() {
        let throws = (0..12).map(|_| ScriptedThrow::exit(10)).collect();
        let mut rig = Rig::new(GameMode::Singles, 1, throws);
        for _ in 0..11 {
            rig.bowl();
        }
        rig.throw().unwrap();
        rig.run(1.2);
        assert_eq!(rig.resolver.state(), ThrowState::AwaitingFrameTransition);
        assert!(rig.scores.is_round_complete());
        rig.resolver.drain_events();

        rig.resolver.reset(&mut rig.lane);
        rig.run(4.0);

        let events = rig.resolver.drain_events();
        assert!(!events.iter().any(|e| matches!(
            e,
            GameEvent::GameComplete { .. } | GameEvent::SeriesComplete { .. }
        )));
        assert!(!rig.resolver.is_series_over());
        assert_eq!(rig.resolver.state(), ThrowState::Idle);
    }

    #[test]
    fn test_pin_falling_after_scoring_is_not_credited_to_next_ball() {
        let mut rig = Rig::new(
            GameMode::Singles,
            3,
            vec![ScriptedThrow::exit(9).with_late_fall(1, 1.0), ScriptedThrow::exit(0)],
        );

        rig.bowl();
        assert_eq!(rig.frames(0)[0], vec![9]);
        // The late pin fell during the pause and was cleared with the others
        assert_eq!(rig.lane.pin_count(), 0);
        assert_eq!(rig.resolver.pins_remaining(), 0);

        rig.bowl();
        let frame = &rig.scores.players[0].series.current_game().frames[0];
        assert_eq!(frame.throws, vec![9, 0]);
        assert!(!frame.is_spare);
        assert!(frame.is_complete);
    }

    #[test]
    fn test_tenth_frame_reset_table() {
        // Nine gutter frames, then X, 3, 7
        let mut throws: Vec<ScriptedThrow> = (0..18).map(|_| ScriptedThrow::exit(0)).collect();
        throws.extend([ScriptedThrow::exit(10), ScriptedThrow::exit(3), ScriptedThrow::exit(7)]);
        let mut rig = Rig::new(GameMode::Singles, 2, throws);

        for _ in 0..18 {
            rig.bowl();
        }
        assert_eq!(rig.scores.current_frame().frame_number, 10);

        rig.bowl();
        assert_eq!(rig.resolver.ball_number(), 2);
        assert_eq!(rig.resolver.pins_remaining(), 10);

        rig.bowl();
        assert_eq!(rig.resolver.ball_number(), 3);
        assert_eq!(rig.resolver.pins_remaining(), 7);

        rig.bowl();
        assert_eq!(rig.scores.players[0].series.game_number(), 2);
        assert_eq!(rig.scores.players[0].series.games[0].total_score, 20);
        assert_eq!(rig.resolver.ball_number(), 1);
        assert_eq!(rig.resolver.pins_remaining(), 10);
    }

    #[test]
    fn test_tenth_frame_double_gets_fresh_rack() {
        let mut throws: Vec<ScriptedThrow> = (0..18).map(|_| ScriptedThrow::exit(0)).collect();
        throws.extend([ScriptedThrow::exit(10), ScriptedThrow::exit(10)]);
        let mut rig = Rig::new(GameMode::Singles, 1, throws);
        for _ in 0..20 {
            rig.bowl();
        }
        assert_eq!(rig.resolver.ball_number(), 3);
        assert_eq!(rig.resolver.pins_remaining(), 10);
    }

    #[test]
    fn test_series_end_blocks_throws() {
        let throws = (0..12).map(|_| ScriptedThrow::exit(10)).collect();
        let mut rig = Rig::new(GameMode::Singles, 1, throws);
        for _ in 0..12 {
            rig.bowl();
        }
        assert!(rig.resolver.is_series_over());
        assert!(rig.scores.is_series_complete());
        assert_eq!(rig.scores.players[0].series.games[0].total_score, 300);
        assert_eq!(rig.throw(), Err(ThrowError::SeriesComplete));

        let events = rig.resolver.drain_events();
        assert!(events.contains(&GameEvent::SeriesComplete { combined_average: 300 }));
    }

    #[test]
    fn test_doubles_alternate_frames() {
        let throws = [3, 4, 2, 5, 10, 1]
            .into_iter()
            .map(ScriptedThrow::exit)
            .collect();
        let mut rig = Rig::new(GameMode::Doubles, 3, throws);
        for _ in 0..6 {
            rig.bowl();
        }
        assert_eq!(rig.frames(0)[0], vec![3, 4]);
        assert_eq!(rig.frames(1)[0], vec![2, 5]);
        assert_eq!(rig.frames(0)[1], vec![10]);
        assert_eq!(rig.frames(1)[1], vec![1]);
        assert_eq!(rig.scores.current_player_index, 1);
        assert_eq!(rig.resolver.ball_number(), 2);
    }

    #[test]
    fn test_throw_messages() {
        assert_eq!(throw_message("P", 10, 10), "P: STRIKE!");
        assert_eq!(throw_message("P", 4, 4), "P: 4 pins - SPARE!");
        assert_eq!(throw_message("P", 0, 10), "P: Miss! Try again!");
        assert_eq!(throw_message("P", 6, 10), "P: 6 pins knocked down!");
    }
}
