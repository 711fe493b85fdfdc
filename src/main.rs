//! Pin Deck entry point
//!
//! Plays a full series on the simulated lane with a seeded bowler and prints
//! the scorecards.
//!
//! Usage: `pin-deck [settings.json] [singles|doubles|team]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use pin_deck::scoring::GameMode;
    use pin_deck::sim::{GameEvent, SimpleLane, TickInput};
    use pin_deck::summary::render_scorecard;
    use pin_deck::{BowlingApp, Settings};

    /// Give up if the series has not finished after this much simulated time
    const MAX_SIM_SECS: f32 = 3600.0;
    const FRAME_DT: f32 = 1.0 / 60.0;

    env_logger::init();
    log::info!("Pin Deck (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut settings = Settings::load(args.first().map(Path::new));
    if let Some(mode) = args.get(1) {
        match GameMode::from_str(mode) {
            Some(mode) => settings.mode = mode,
            None => log::warn!("Unknown mode '{}', keeping {}", mode, settings.mode.as_str()),
        }
    }

    let mut bowler = Pcg32::seed_from_u64(settings.seed.wrapping_add(1));
    let lane = SimpleLane::new(&settings);
    let mut app = BowlingApp::new(settings, lane);
    app.start();

    let mut input = TickInput::default();
    let mut target_power: Option<f32> = None;
    let mut elapsed = 0.0;

    while !app.resolver.is_series_over() {
        if elapsed > MAX_SIM_SECS {
            log::error!("Series did not finish after {} simulated seconds", MAX_SIM_SECS);
            break;
        }

        match target_power {
            None if app.can_throw() => {
                let aim = Vec2::new(bowler.random_range(-0.03..0.03), -1.0);
                app.physics.set_spin(bowler.random_range(-0.4..0.4));
                target_power = Some(bowler.random_range(0.6..1.0));
                input.aim = Some(aim);
                input.charge = true;
            }
            Some(target) if app.power.level() >= target => {
                input.charge = false;
                input.release = true;
                target_power = None;
            }
            _ => {}
        }

        app.update(FRAME_DT, &mut input);
        elapsed += FRAME_DT;
        if input.charge && !app.power.is_charging() {
            // Lane was not ready for us; try again next frame
            input.charge = false;
            target_power = None;
        }

        for event in app.drain_events() {
            match event {
                GameEvent::Status(message) => println!("{}", message),
                GameEvent::GameComplete { game_number } => {
                    println!("\n=== Game {} ===", game_number);
                    for player in &app.scores.players {
                        if let Some(game) = player.series.games.get(game_number - 1) {
                            println!(
                                "{}\n{}\n",
                                player.name,
                                pin_deck::summary::render_game(game)
                            );
                        }
                    }
                }
                GameEvent::SeriesComplete { .. } => {
                    println!();
                    for player in &app.scores.players {
                        log::debug!("{}", render_scorecard(player));
                    }
                    println!("{}", app.summary());
                }
                _ => {}
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is the wasm surface
}
