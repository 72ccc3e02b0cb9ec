//! Input handling
//!
//! Each sample's intensity maps to an upward impulse of `intensity²`, so
//! light touches barely move the body and firm ones throw it upward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, RunState};
use crate::consts::MAX_INPUT_INTENSITY;

/// Phase of a touch/pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// One input sample from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputSample {
    pub phase: InputPhase,
    /// Field coordinates of the touch
    pub location: Vec2,
    /// Pressure, expected in `[0, MAX_INPUT_INTENSITY]`
    pub intensity: f32,
}

impl InputSample {
    pub fn new(phase: InputPhase, location: Vec2, intensity: f32) -> Self {
        Self {
            phase,
            location,
            intensity,
        }
    }
}

/// What a sample did to the game
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEffect {
    /// A new run started; the sample's impulse was applied after the reset
    Started { impulse: f32 },
    /// Vertical velocity changed by this amount
    Impulse(f32),
    /// No physical effect
    Ignored,
}

/// Velocity change for a sample intensity
#[inline]
pub fn impulse_for(intensity: f32) -> f32 {
    let f = if intensity.is_finite() {
        intensity.clamp(0.0, MAX_INPUT_INTENSITY)
    } else {
        0.0
    };
    f * f
}

/// Route one input sample through the run state machine
pub fn on_input(state: &mut GameState, sample: &InputSample) -> InputEffect {
    match sample.phase {
        InputPhase::Ended => {
            state.pointer = None;
            InputEffect::Ignored
        }
        // A cancelled touch still pushes the body, but never starts a run
        InputPhase::Cancelled => {
            state.pointer = None;
            match state.run_state {
                RunState::Running => InputEffect::Impulse(apply_impulse(state, sample.intensity)),
                RunState::Stopped => InputEffect::Ignored,
            }
        }
        InputPhase::Began | InputPhase::Moved => {
            state.pointer = Some(sample.location);
            match (state.run_state, sample.phase) {
                (RunState::Stopped, InputPhase::Began) => {
                    start_run(state);
                    let impulse = apply_impulse(state, sample.intensity);
                    InputEffect::Started { impulse }
                }
                (RunState::Stopped, _) => InputEffect::Ignored,
                (RunState::Running, _) => InputEffect::Impulse(apply_impulse(state, sample.intensity)),
            }
        }
    }
}

fn start_run(state: &mut GameState) {
    state.reset();
    state.run_state = RunState::Running;
    log::info!("Run {} started (tick {})", state.resets, state.time_ticks);
    state.events.push(GameEvent::RunStarted { run: state.resets });
}

/// Apply a sample's impulse, returning the actual change after the speed cap
fn apply_impulse(state: &mut GameState, intensity: f32) -> f32 {
    let before = state.body.vel.y;
    state
        .body
        .apply_impulse(impulse_for(intensity), state.settings.max_vertical_speed);
    state.body.vel.y - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::contact::handle_contact;
    use crate::sim::gap::GapState;

    fn new_state() -> GameState {
        GameState::new(Settings {
            seed: Some(2024),
            ..Default::default()
        })
    }

    fn sample(phase: InputPhase, intensity: f32) -> InputSample {
        InputSample::new(phase, Vec2::new(100.0, 100.0), intensity)
    }

    #[test]
    fn test_impulse_is_quadratic() {
        assert_eq!(impulse_for(0.0), 0.0);
        assert_eq!(impulse_for(0.5), 0.25);
        assert_eq!(impulse_for(2.0), 4.0);
    }

    #[test]
    fn test_impulse_clamps_intensity() {
        assert_eq!(impulse_for(-3.0), 0.0);
        assert_eq!(impulse_for(100.0), MAX_INPUT_INTENSITY * MAX_INPUT_INTENSITY);
        assert_eq!(impulse_for(f32::NAN), 0.0);
    }

    #[test]
    fn test_began_while_stopped_starts_run() {
        let mut state = new_state();
        state.gap = GapState {
            previous_lower_height: 5.0,
            previous_upper_height: 6.0,
        };

        let effect = on_input(&mut state, &sample(InputPhase::Began, 2.0));
        assert_eq!(effect, InputEffect::Started { impulse: 4.0 });
        assert_eq!(state.run_state, RunState::Running);
        assert_eq!(state.resets, 1);
        assert_eq!(state.gap, GapState::default());
        // Reset zeroed velocity before the impulse landed
        assert_eq!(state.body.vel.y, 4.0);
    }

    #[test]
    fn test_moved_while_running_adds_impulse() {
        let mut state = new_state();
        on_input(&mut state, &sample(InputPhase::Began, 0.0));
        state.body.vel.y = -30.0;

        let effect = on_input(&mut state, &sample(InputPhase::Moved, 2.0));
        assert_eq!(effect, InputEffect::Impulse(4.0));
        assert_eq!(state.body.vel.y, -26.0);
        assert_eq!(state.resets, 1);
    }

    #[test]
    fn test_began_while_running_does_not_reset() {
        let mut state = new_state();
        on_input(&mut state, &sample(InputPhase::Began, 1.0));
        on_input(&mut state, &sample(InputPhase::Began, 1.0));
        assert_eq!(state.resets, 1);
        assert_eq!(state.body.vel.y, 2.0);
    }

    #[test]
    fn test_moved_while_stopped_is_ignored() {
        let mut state = new_state();
        let effect = on_input(&mut state, &sample(InputPhase::Moved, 3.0));
        assert_eq!(effect, InputEffect::Ignored);
        assert_eq!(state.run_state, RunState::Stopped);
        assert_eq!(state.body.vel.y, 0.0);
        assert_eq!(state.pointer, Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_ended_has_no_physical_effect() {
        let mut state = new_state();
        on_input(&mut state, &sample(InputPhase::Began, 1.0));
        let vel = state.body.vel;

        assert_eq!(on_input(&mut state, &sample(InputPhase::Ended, 5.0)), InputEffect::Ignored);
        assert_eq!(state.body.vel, vel);
        assert_eq!(state.run_state, RunState::Running);
        assert_eq!(state.pointer, None);
    }

    #[test]
    fn test_cancelled_while_running_adds_impulse() {
        let mut state = new_state();
        on_input(&mut state, &sample(InputPhase::Began, 0.0));
        let before = state.body.vel.y;

        let effect = on_input(&mut state, &sample(InputPhase::Cancelled, 2.0));
        assert_eq!(effect, InputEffect::Impulse(4.0));
        assert_eq!(state.body.vel.y, before + 4.0);
        assert_eq!(state.run_state, RunState::Running);
        assert_eq!(state.pointer, None);
    }

    #[test]
    fn test_cancelled_while_stopped_does_not_start() {
        let mut state = new_state();
        let effect = on_input(&mut state, &sample(InputPhase::Cancelled, 2.0));
        assert_eq!(effect, InputEffect::Ignored);
        assert_eq!(state.run_state, RunState::Stopped);
        assert_eq!(state.resets, 0);
        assert_eq!(state.body.vel.y, 0.0);
    }

    #[test]
    fn test_double_contact_then_single_reset() {
        let mut state = new_state();
        on_input(&mut state, &sample(InputPhase::Began, 1.0));
        handle_contact(&mut state, 1);
        handle_contact(&mut state, 2);
        assert_eq!(state.run_state, RunState::Stopped);
        assert_eq!(state.speed(), 0.0);

        on_input(&mut state, &sample(InputPhase::Began, 1.0));
        assert_eq!(state.resets, 2);
        assert_eq!(state.run_state, RunState::Running);
    }
}
