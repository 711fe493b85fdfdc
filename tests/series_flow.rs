//! End-to-end series flow through the public API

use glam::Vec2;

use pin_deck::scoring::GameMode;
use pin_deck::sim::{GameEvent, ScriptedLane, ScriptedThrow, SimpleLane, TickInput};
use pin_deck::{BowlingApp, Settings, ThrowError};

const FRAME_DT: f32 = 1.0 / 60.0;

fn scripted_app(mode: GameMode, games: usize, pins: Vec<u8>) -> BowlingApp<ScriptedLane> {
    let settings = Settings {
        games_per_series: games,
        ..Settings::for_mode(mode)
    };
    let mut app = BowlingApp::new(settings, ScriptedLane::from_pins(pins));
    app.start();
    app
}

/// Throw once and run until the lane is ready again
fn bowl<P: pin_deck::sim::LanePhysics>(app: &mut BowlingApp<P>, power: f32) {
    app.throw_ball(Vec2::NEG_Y, power).unwrap();
    let mut input = TickInput::default();
    for _ in 0..2000 {
        app.update(FRAME_DT, &mut input);
        if app.can_throw() || app.resolver.is_series_over() {
            return;
        }
    }
    panic!("lane never became ready");
}

#[test]
fn perfect_game_scores_300() {
    let mut app = scripted_app(GameMode::Singles, 1, vec![10; 12]);
    for _ in 0..12 {
        bowl(&mut app, 1.0);
    }

    let game = &app.scores.players[0].series.games[0];
    assert!(game.is_complete);
    assert_eq!(game.total_score, 300);
    assert!(app.is_series_complete());
    assert_eq!(app.throw_ball(Vec2::NEG_Y, 1.0), Err(ThrowError::SeriesComplete));

    let summary = app.summary();
    assert_eq!(summary.players[0].game_scores, vec![300]);
    assert_eq!(summary.max_possible, 300);
}

#[test]
fn gutter_series_has_three_zero_games() {
    let mut app = scripted_app(GameMode::Singles, 3, vec![0; 60]);
    let mut completed = Vec::new();
    for _ in 0..60 {
        bowl(&mut app, 0.5);
        for event in app.drain_events() {
            if let GameEvent::GameComplete { game_number } = event {
                completed.push(game_number);
            }
        }
    }

    assert_eq!(completed, vec![1, 2, 3]);
    assert!(app.resolver.is_series_over());
    let series = &app.scores.players[0].series;
    assert_eq!(series.games.len(), 3);
    assert!(series.games.iter().all(|g| g.total_score == 0));
    assert!(series.games[0].frames.iter().all(|f| !f.is_strike && !f.is_spare));
}

#[test]
fn doubles_rotate_after_each_frame() {
    let mut app = scripted_app(GameMode::Doubles, 3, vec![3, 4, 8, 1, 10, 5]);
    assert_eq!(app.snapshot().player_name, "Athlete");

    bowl(&mut app, 0.8);
    assert_eq!(app.snapshot().player_name, "Athlete");
    bowl(&mut app, 0.8);
    assert_eq!(app.snapshot().player_name, "Partner");
    bowl(&mut app, 0.8);
    bowl(&mut app, 0.8);
    assert_eq!(app.snapshot().player_name, "Athlete");

    // A strike ends the frame after one ball
    bowl(&mut app, 0.8);
    let snap = app.snapshot();
    assert_eq!((snap.player_name.as_str(), snap.frame_number), ("Partner", 2));

    bowl(&mut app, 0.8);
    // Strike still waiting on its bonus balls
    assert_eq!(app.scores.players[0].series.game_score(), 7);
    assert_eq!(app.scores.players[1].series.game_score(), 9);
}

#[test]
fn team_game_waits_for_every_player() {
    // Four players, one game each: 10 frames x 4 players, all 9-0
    let mut app = scripted_app(GameMode::Team, 1, [9, 0].repeat(40));
    for turn in 0..80 {
        bowl(&mut app, 0.8);
        let done = app
            .drain_events()
            .into_iter()
            .any(|e| matches!(e, GameEvent::SeriesComplete { .. }));
        assert_eq!(done, turn == 79);
    }

    let summary = app.summary();
    assert_eq!(summary.players.len(), 4);
    assert!(summary.players.iter().all(|p| p.game_scores == vec![90]));
    assert_eq!(summary.combined_average, 360);
    assert_eq!(summary.max_possible, 1200);
}

#[test]
fn spare_and_ninth_frame_strike_bonuses() {
    let mut pins = vec![5, 5, 3, 0];
    pins.extend([0; 12]);
    pins.extend([10, 4, 4]);
    let mut app = scripted_app(GameMode::Singles, 3, pins);
    for _ in 0..19 {
        bowl(&mut app, 0.8);
    }

    let game = &app.scores.players[0].series.games[0];
    assert_eq!(game.frames[0].score, Some(13));
    assert_eq!(game.frames[8].score, Some(18));
    assert_eq!(game.total_score, 13 + 3 + 18 + 8);
    assert_eq!(app.snapshot().game_number, 2);
}

#[test]
fn throw_result_events_describe_each_ball() {
    let mut app = scripted_app(GameMode::Singles, 3, vec![6, 4]);
    app.drain_events();

    bowl(&mut app, 0.8);
    bowl(&mut app, 0.8);
    let results: Vec<_> = app
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::ThrowResult(r) => Some(r),
            _ => None,
        })
        .collect();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].pins_knocked_down, 6);
    assert!(!results[0].is_frame_complete);
    assert_eq!(results[1].pins_knocked_down, 4);
    assert!(results[1].is_spare && results[1].is_frame_complete);
}

#[test]
fn lingering_pins_still_count_once() {
    let settings = Settings::default();
    let lane = ScriptedLane::new([ScriptedThrow::rest(8).with_lingering(3, 1.0).with_bounce()]);
    let mut app = BowlingApp::new(settings, lane);
    app.start();
    bowl(&mut app, 0.8);

    let frame = &app.scores.players[0].series.games[0].frames[0];
    assert_eq!(frame.throws, vec![8]);
    assert_eq!(app.snapshot().pins_remaining, 2);
}

#[test]
fn simple_lane_plays_a_frame() {
    let settings = Settings::default();
    let lane = SimpleLane::new(&settings);
    let mut app = BowlingApp::new(settings, lane);
    app.start();

    bowl(&mut app, 1.0);
    let first = app.scores.players[0].series.games[0].frames[0].throws.clone();
    assert_eq!(first.len(), 1);
    assert!(first[0] > 0);

    if first[0] < 10 {
        assert_eq!(app.snapshot().pins_remaining, 10 - first[0]);
        bowl(&mut app, 1.0);
    }
    assert!(app.scores.players[0].series.games[0].frames[0].is_complete);
    assert_eq!(app.snapshot().frame_number, 2);
}
