//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles oldest first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod contact;
pub mod gap;
pub mod input;
pub mod pipeline;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_rect_overlap};
pub use contact::{detect_contacts, handle_contact};
pub use gap::{GapDraws, GapParams, GapState, ObstacleGeometry, next_gap};
pub use input::{InputEffect, InputPhase, InputSample, impulse_for, on_input};
pub use pipeline::{advance_obstacles, spawn_pair, tick_spawner};
pub use state::{
    Body, GameEvent, GameState, ObstaclePair, ObstacleView, RunState, RunSummary, Snapshot,
};
pub use tick::{TickInput, autopilot_sample, tick};
