//! Obstacle scrolling and spawning
//!
//! The spawn timer never pauses: pairs keep appearing at the right edge even
//! while the run is stopped, they just do not move until it resumes.

use super::gap::next_gap;
use super::state::{GameEvent, GameState, ObstaclePair};
use crate::consts::*;

/// Advance the spawn timer by one tick, spawning when it fires
///
/// Returns the new pair's ID if one was spawned.
pub fn tick_spawner(state: &mut GameState) -> Option<u32> {
    let spawned = if state.spawn_countdown == 0 {
        state.spawn_countdown = SPAWN_INTERVAL_TICKS;
        Some(spawn_pair(state))
    } else {
        None
    };
    state.spawn_countdown -= 1;
    spawned
}

/// Generate the next pair and append it at the right edge
pub fn spawn_pair(state: &mut GameState) -> u32 {
    let (geometry, next) = next_gap(state.gap, &state.gap_params, &mut state.rng);
    state.gap = next;

    if state.obstacles.len() >= state.settings.max_live_obstacles {
        let dropped = state.obstacles.remove(0);
        log::warn!(
            "Obstacle cap ({}) reached, dropping pair {}",
            state.settings.max_live_obstacles,
            dropped.id
        );
        state
            .events
            .push(GameEvent::ObstacleDiscarded { id: dropped.id });
    }

    let id = state.next_obstacle_id();
    state.obstacles.push(ObstaclePair::new(id, geometry));
    state.spawned_this_run += 1;
    state.events.push(GameEvent::ObstacleSpawned { id, geometry });
    log::trace!(
        "Spawned pair {}: lower={:.1} upper={:.1}",
        id,
        geometry.lower_height,
        geometry.upper_height
    );
    id
}

/// Scroll every live pair one tick and discard the ones that finished
///
/// Only called while running; ages are the pairs' scroll progress.
pub fn advance_obstacles(state: &mut GameState) {
    for pair in &mut state.obstacles {
        pair.age_ticks += 1;
    }

    let events = &mut state.events;
    state.obstacles.retain(|pair| {
        if pair.age_ticks >= OBSTACLE_LIFETIME_TICKS {
            events.push(GameEvent::ObstacleDiscarded { id: pair.id });
            false
        } else {
            true
        }
    });
}
