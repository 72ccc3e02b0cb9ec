//! Body/obstacle contacts
//!
//! A contact freezes the run. Only the body is tested against obstacles;
//! obstacles never interact with each other and the field edges are open.

use super::collision::circle_rect_overlap;
use super::state::{GameEvent, GameState, RunState, RunSummary};

/// Find pairs the body started touching since the last check
///
/// Updates each pair's `in_contact` flag so a continuing overlap is
/// reported once.
pub fn detect_contacts(state: &mut GameState) -> Vec<u32> {
    if !state.body.collision_enabled {
        return Vec::new();
    }

    let scroll_speed = state.scroll_speed();
    let (pos, radius) = (state.body.pos, state.body.radius);
    let mut begun = Vec::new();

    for pair in &mut state.obstacles {
        let touching = pair
            .rects(scroll_speed)
            .iter()
            .any(|rect| circle_rect_overlap(pos, radius, rect));
        if touching && !pair.in_contact {
            begun.push(pair.id);
        }
        pair.in_contact = touching;
    }

    begun
}

/// React to the body touching a pair
///
/// Stops the run and freezes the body. Safe to call any number of times:
/// only the call that ends a live run has any effect.
pub fn handle_contact(state: &mut GameState, pair_id: u32) {
    if state.run_state != RunState::Running {
        log::debug!("Contact with pair {} while stopped", pair_id);
        return;
    }

    state.body.collision_enabled = false;
    state.events.push(GameEvent::Contact { id: pair_id });

    state.run_state = RunState::Stopped;
    let summary = RunSummary {
        run: state.resets,
        ticks_survived: state.run_ticks,
        obstacles_spawned: state.spawned_this_run,
    };
    log::info!(
        "Run {} ended on pair {} after {} ticks",
        summary.run,
        pair_id,
        summary.ticks_survived
    );
    state.runs.push(summary);
    state.events.push(GameEvent::RunEnded(summary));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LANE_WIDTH;
    use crate::settings::Settings;
    use crate::sim::gap::ObstacleGeometry;
    use crate::sim::state::ObstaclePair;
    use glam::Vec2;

    fn running_state() -> GameState {
        let mut state = GameState::new(Settings {
            seed: Some(99),
            ..Default::default()
        });
        state.reset();
        state.run_state = RunState::Running;
        state
    }

    /// A pair whose lower pillar reaches the body's height at x
    fn pair_at(id: u32, x: f32, lower_height: f32) -> ObstaclePair {
        ObstaclePair::new(
            id,
            ObstacleGeometry {
                lower_height,
                upper_height: 10.0,
                lane_width: LANE_WIDTH,
                spawn_x: x,
                spawn_y_lower: lower_height / 2.0,
                spawn_y_upper: 475.0,
            },
        )
    }

    #[test]
    fn test_detects_overlap_once() {
        let mut state = running_state();
        let x = state.body.pos.x;
        state.obstacles.push(pair_at(1, x, 300.0));
        state.obstacles.push(pair_at(2, x + 200.0, 300.0));

        assert_eq!(detect_contacts(&mut state), vec![1]);
        assert!(detect_contacts(&mut state).is_empty());
    }

    #[test]
    fn test_clear_opening_has_no_contact() {
        let mut state = running_state();
        let x = state.body.pos.x;
        state.obstacles.push(pair_at(1, x, 100.0));
        assert!(detect_contacts(&mut state).is_empty());
    }

    #[test]
    fn test_contact_stops_run() {
        let mut state = running_state();
        state.run_ticks = 42;
        handle_contact(&mut state, 7);

        assert_eq!(state.run_state, RunState::Stopped);
        assert_eq!(state.speed(), 0.0);
        assert!(!state.body.collision_enabled);
        assert_eq!(
            state.runs,
            vec![RunSummary {
                run: 1,
                ticks_survived: 42,
                obstacles_spawned: 0,
            }]
        );
    }

    #[test]
    fn test_repeated_contacts_are_harmless() {
        let mut state = running_state();
        handle_contact(&mut state, 1);
        handle_contact(&mut state, 2);

        assert_eq!(state.run_state, RunState::Stopped);
        assert_eq!(state.runs.len(), 1);
        let ended = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::RunEnded(_)))
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn test_contact_while_stopped_is_noop() {
        let mut state = GameState::new(Settings {
            seed: Some(5),
            ..Default::default()
        });
        let before = state.body.pos;
        handle_contact(&mut state, 3);
        assert_eq!(state.run_state, RunState::Stopped);
        assert!(state.runs.is_empty());
        assert_eq!(state.body.pos, before);
        assert!(state.body.collision_enabled);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_disabled_collision_skips_detection() {
        let mut state = running_state();
        state.body.collision_enabled = false;
        state.obstacles.push(pair_at(1, state.body.pos.x, 400.0));
        assert!(detect_contacts(&mut state).is_empty());
        assert_eq!(state.body.pos, Vec2::new(640.0 / 3.0, 240.0));
    }
}
