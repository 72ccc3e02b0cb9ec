//! Gap sequence generation
//!
//! Each obstacle pair's heights are a random walk from the previous pair's:
//! both heights are scaled by an independent multiplier, one side
//! occasionally gets a large bonus, and any overflow past the usable field
//! height is shaved off both sides equally.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Settings;

/// Heights of the last emitted pair, the seed for the next one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapState {
    pub previous_lower_height: f32,
    pub previous_upper_height: f32,
}

impl Default for GapState {
    fn default() -> Self {
        Self {
            previous_lower_height: DEFAULT_GAP_HEIGHT,
            previous_upper_height: DEFAULT_GAP_HEIGHT,
        }
    }
}

/// Geometry of one spawned pair (lower anchored at the bottom edge, upper at the top)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleGeometry {
    pub lower_height: f32,
    pub upper_height: f32,
    pub lane_width: f32,
    /// Horizontal centre of both rectangles at spawn (the right field edge)
    pub spawn_x: f32,
    /// Vertical centre of the lower rectangle
    pub spawn_y_lower: f32,
    /// Vertical centre of the upper rectangle
    pub spawn_y_upper: f32,
}

/// Fixed inputs of the generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapParams {
    pub field_width: f32,
    pub field_height: f32,
    pub min_opening: f32,
    pub lane_width: f32,
}

impl GapParams {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            field_width: settings.field_width,
            field_height: settings.field_height,
            min_opening: MIN_OPENING_SIZE,
            lane_width: LANE_WIDTH,
        }
    }

    /// Combined height both obstacles may occupy
    #[inline]
    pub fn height_limit(&self) -> f32 {
        self.field_height - self.min_opening
    }
}

/// Source of the generator's random draws
///
/// Any `rand::Rng` qualifies; tests can script exact sequences.
pub trait GapDraws {
    /// Uniform multiplier in `[HEIGHT_MULTIPLIER_MIN, HEIGHT_MULTIPLIER_MAX]`
    fn height_multiplier(&mut self) -> f32;
    /// Uniform roll in `0..BONUS_ROLL_SIDES`
    fn bonus_roll(&mut self) -> u32;
}

impl<R: Rng> GapDraws for R {
    fn height_multiplier(&mut self) -> f32 {
        self.random_range(HEIGHT_MULTIPLIER_MIN..=HEIGHT_MULTIPLIER_MAX)
    }

    fn bonus_roll(&mut self) -> u32 {
        self.random_range(0..BONUS_ROLL_SIDES)
    }
}

/// Compute the next pair from the previous one
///
/// Pure given the draws: identical draws from an identical `state` always
/// produce the same geometry.
pub fn next_gap<D: GapDraws + ?Sized>(
    state: GapState,
    params: &GapParams,
    draws: &mut D,
) -> (ObstacleGeometry, GapState) {
    let mut lower = state.previous_lower_height * draws.height_multiplier();
    let mut upper = state.previous_upper_height * draws.height_multiplier();

    match draws.bonus_roll() {
        0 => lower += BONUS_HEIGHT,
        1 => upper += BONUS_HEIGHT,
        _ => {}
    }

    // A field shorter than the opening leaves no room at all
    let limit = params.height_limit().max(0.0);
    let total = lower + upper;
    if total > limit {
        let overflow = (total - limit) / 2.0;
        lower = (lower - overflow).max(0.0);
        upper = (upper - overflow).max(0.0);

        // One side hit the floor and the other alone still overflows
        lower = lower.min(limit);
        upper = upper.min(limit);
    }

    let geometry = ObstacleGeometry {
        lower_height: lower,
        upper_height: upper,
        lane_width: params.lane_width,
        spawn_x: params.field_width,
        spawn_y_lower: lower / 2.0,
        spawn_y_upper: params.field_height - upper / 2.0,
    };
    let next = GapState {
        previous_lower_height: lower,
        previous_upper_height: upper,
    };
    (geometry, next)
}
