//! Pillar Dash - a single-lane, auto-scrolling gap-pillar game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gap generation, scrolling, contacts, run state)
//! - `settings`: Data-driven field size and tuning, loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;

    /// Body defaults
    pub const BODY_RADIUS: f32 = 20.0;
    /// Smallest opening a pair may leave, relative to the body size
    pub const MIN_OPENING_SIZE: f32 = BODY_RADIUS * 1.5;
    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = -750.0;
    /// Upper bound of an input sample's intensity (device force range)
    pub const MAX_INPUT_INTENSITY: f32 = 20.0 / 3.0;

    /// Obstacle defaults
    pub const LANE_WIDTH: f32 = 25.0;
    /// Seed heights for the first pair of every run
    pub const DEFAULT_GAP_HEIGHT: f32 = 200.0;
    /// Random-walk multiplier range applied to the previous heights
    pub const HEIGHT_MULTIPLIER_MIN: f32 = 0.76;
    pub const HEIGHT_MULTIPLIER_MAX: f32 = 1.25;
    /// A bonus roll is drawn from `0..BONUS_ROLL_SIDES`
    pub const BONUS_ROLL_SIDES: u32 = 20;
    /// Height added to one side when the bonus roll hits
    pub const BONUS_HEIGHT: f32 = 200.0;

    /// Spawn cadence: 0.05 s at 60 Hz
    pub const SPAWN_INTERVAL_TICKS: u32 = 3;
    /// Scroll duration: 3 s at 60 Hz
    pub const OBSTACLE_LIFETIME_TICKS: u32 = 3 * SIM_HZ;
    /// Distance travelled past the left edge before discard
    pub const SCROLL_OVERSHOOT: f32 = 200.0;
}
