//! Pillar Dash entry point
//!
//! Runs the simulation headless in idle mode and prints the final frame.

use pillar_dash::Settings;
use pillar_dash::sim::{GameEvent, GameState, RunSummary, Snapshot, TickInput, tick};
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    resets: u32,
    runs: &'a [RunSummary],
    frame: Snapshot,
}

fn main() {
    env_logger::init();
    log::info!("Pillar Dash (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Could not load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let ticks = settings.demo_ticks;
    let mut state = GameState::new(settings);
    log::info!("Game initialized with seed: {}", state.seed);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut spawned = 0u64;
    for _ in 0..ticks {
        tick(&mut state, &input);
        for event in state.drain_events() {
            match event {
                GameEvent::ObstacleSpawned { .. } => spawned += 1,
                GameEvent::RunEnded(summary) => log::info!(
                    "Run {} survived {:.2}s",
                    summary.run,
                    summary.ticks_survived as f32 * pillar_dash::consts::SIM_DT
                ),
                _ => {}
            }
        }
    }
    log::info!("Simulated {} ticks, {} pairs spawned", ticks, spawned);

    let report = Report {
        seed: state.seed,
        resets: state.resets,
        runs: &state.runs,
        frame: state.snapshot(),
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to serialize report: {}", e);
            std::process::exit(1);
        }
    }
}
