//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::contact::{detect_contacts, handle_contact};
use super::input::{InputPhase, InputSample, on_input};
use super::pipeline::{advance_obstacles, tick_spawner};
use super::state::{GameState, RunState};
use crate::consts::*;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Samples received since the previous tick, in arrival order
    pub samples: Vec<InputSample>,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// How far ahead of the body the autopilot looks for the opening
const AUTOPILOT_LOOKAHEAD: f32 = 40.0;
/// Autopilot press strength
const AUTOPILOT_INTENSITY: f32 = 5.0;
/// Autopilot stops pressing once rising faster than this
const AUTOPILOT_MAX_CLIMB: f32 = 150.0;

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    for sample in &input.samples {
        on_input(state, sample);
    }
    if input.idle_mode {
        if let Some(sample) = autopilot_sample(state) {
            on_input(state, &sample);
        }
    }

    state.time_ticks += 1;

    if state.run_state.is_running() {
        state.run_ticks += 1;
        let max_speed = state.settings.max_vertical_speed;
        state.body.integrate(SIM_DT, max_speed);
        advance_obstacles(state);
    }

    tick_spawner(state);

    if state.run_state.is_running() {
        for pair_id in detect_contacts(state) {
            handle_contact(state, pair_id);
        }
    }
}

/// Pick the sample a simple player would give this tick
///
/// Starts a run whenever stopped; while running, presses when the body sits
/// below the centre of the opening just ahead of it.
pub fn autopilot_sample(state: &GameState) -> Option<InputSample> {
    let body = &state.body;
    match state.run_state {
        RunState::Stopped => Some(InputSample::new(InputPhase::Began, body.pos, 0.0)),
        RunState::Running => {
            let field_height = state.settings.field_height;
            let scroll_speed = state.scroll_speed();
            let lookahead_x = body.pos.x + AUTOPILOT_LOOKAHEAD;

            let target_y = state
                .obstacles
                .iter()
                .min_by(|a, b| {
                    let da = (a.center_x(scroll_speed) - lookahead_x).abs();
                    let db = (b.center_x(scroll_speed) - lookahead_x).abs();
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|pair| {
                    let (bottom, top) = pair.opening(field_height);
                    (bottom + top) / 2.0
                })
                .unwrap_or(field_height / 2.0);

            (body.pos.y < target_y && body.vel.y < AUTOPILOT_MAX_CLIMB)
                .then(|| InputSample::new(InputPhase::Moved, body.pos, AUTOPILOT_INTENSITY))
        }
    }
}
