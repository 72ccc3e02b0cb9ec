//! Game state and core simulation types
//!
//! Everything the tick mutates lives in `GameState`; renderers only read it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::gap::{GapParams, GapState, ObstacleGeometry};
use crate::consts::*;
use crate::settings::Settings;

/// Whether the current run is live
///
/// `Stopped` is both the state before the first input and the state after a
/// contact. Physics integration and obstacle scrolling only happen while
/// `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

impl RunState {
    /// Speed multiplier applied to the body and the obstacle scroller
    #[inline]
    pub fn speed(self) -> f32 {
        match self {
            RunState::Running => 1.0,
            RunState::Stopped => 0.0,
        }
    }

    #[inline]
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }
}

/// The controllable body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Cleared on contact so a frozen body reports nothing further
    pub collision_enabled: bool,
}

impl Body {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            radius: BODY_RADIUS,
            collision_enabled: true,
        }
    }

    /// Put the body back at its spawn point, at rest
    pub fn respawn(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
        self.collision_enabled = true;
    }

    /// Add an upward impulse, keeping vertical speed within `max_speed`
    pub fn apply_impulse(&mut self, dv: f32, max_speed: f32) {
        self.vel.y = (self.vel.y + dv).clamp(-max_speed, max_speed);
    }

    /// Semi-implicit Euler step under gravity
    pub fn integrate(&mut self, dt: f32, max_speed: f32) {
        self.vel.y = (self.vel.y + GRAVITY * dt).clamp(-max_speed, max_speed);
        self.pos += self.vel * dt;
    }
}

/// One live obstacle pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub id: u32,
    pub geometry: ObstacleGeometry,
    /// Ticks spent scrolling (frozen while stopped)
    pub age_ticks: u32,
    /// Whether the body overlapped this pair on the last contact check
    #[serde(default)]
    pub in_contact: bool,
}

impl ObstaclePair {
    pub fn new(id: u32, geometry: ObstacleGeometry) -> Self {
        Self {
            id,
            geometry,
            age_ticks: 0,
            in_contact: false,
        }
    }

    /// Current horizontal centre, given the scroller's speed
    pub fn center_x(&self, scroll_speed: f32) -> f32 {
        self.geometry.spawn_x - scroll_speed * self.age_ticks as f32 * SIM_DT
    }

    /// Lower and upper rectangles at the current scroll offset
    pub fn rects(&self, scroll_speed: f32) -> [Rect; 2] {
        let x = self.center_x(scroll_speed);
        let g = &self.geometry;
        [
            Rect::from_center(
                Vec2::new(x, g.spawn_y_lower),
                Vec2::new(g.lane_width, g.lower_height),
            ),
            Rect::from_center(
                Vec2::new(x, g.spawn_y_upper),
                Vec2::new(g.lane_width, g.upper_height),
            ),
        ]
    }

    /// Bottom and top of the opening between the two rectangles
    pub fn opening(&self, field_height: f32) -> (f32, f32) {
        (
            self.geometry.lower_height,
            field_height - self.geometry.upper_height,
        )
    }
}

/// Outcome of a finished run (kept in memory only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// 1-based run number
    pub run: u32,
    pub ticks_survived: u64,
    pub obstacles_spawned: u32,
}

/// Notifications for the rendering collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began (after reset)
    RunStarted { run: u32 },
    /// A pair was created at the right edge
    ObstacleSpawned { id: u32, geometry: ObstacleGeometry },
    /// A pair finished scrolling and was dropped
    ObstacleDiscarded { id: u32 },
    /// The body began touching a pair
    Contact { id: u32 },
    /// A contact ended the live run
    RunEnded(RunSummary),
}

/// Per-frame view for renderers
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time_ticks: u64,
    pub run_state: RunState,
    pub speed: f32,
    pub body_pos: Vec2,
    pub body_vel: Vec2,
    pub pointer: Option<Vec2>,
    pub obstacles: Vec<ObstacleView>,
}

/// One pair as drawn
#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub lower: Rect,
    pub upper: Rect,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Field size and tuning
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Generator RNG
    pub rng: Pcg32,
    /// Fixed generator inputs derived from settings
    pub gap_params: GapParams,
    /// Heights of the last spawned pair
    pub gap: GapState,
    pub body: Body,
    pub run_state: RunState,
    /// Live pairs, oldest first
    pub obstacles: Vec<ObstaclePair>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks until the spawn timer next fires
    pub spawn_countdown: u32,
    /// Ticks the current run has been live
    pub run_ticks: u64,
    /// Pairs spawned since the last reset
    pub spawned_this_run: u32,
    /// Number of resets performed
    pub resets: u32,
    /// Finished runs
    pub runs: Vec<RunSummary>,
    /// Last input position, cleared on release
    pub pointer: Option<Vec2>,
    /// Pending notifications (drained by the host)
    pub events: Vec<GameEvent>,
    /// Next obstacle ID
    next_id: u32,
}

impl GameState {
    /// Create a stopped game for the given settings
    ///
    /// A missing seed is drawn from the thread RNG.
    pub fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let gap_params = GapParams::from_settings(&settings);
        let body = Body::new(Self::spawn_point_for(&settings));
        Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            gap_params,
            gap: GapState::default(),
            body,
            run_state: RunState::Stopped,
            obstacles: Vec::new(),
            time_ticks: 0,
            spawn_countdown: 0,
            run_ticks: 0,
            spawned_this_run: 0,
            resets: 0,
            runs: Vec::new(),
            pointer: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    fn spawn_point_for(settings: &Settings) -> Vec2 {
        Vec2::new(settings.field_width / 3.0, settings.field_height / 2.0)
    }

    /// Where the body starts every run
    pub fn spawn_point(&self) -> Vec2 {
        Self::spawn_point_for(&self.settings)
    }

    /// Horizontal scroll speed of live pairs (units/s)
    ///
    /// A pair travels `field_width + SCROLL_OVERSHOOT` over its lifetime.
    pub fn scroll_speed(&self) -> f32 {
        (self.settings.field_width + SCROLL_OVERSHOOT) / (OBSTACLE_LIFETIME_TICKS as f32 * SIM_DT)
    }

    /// Speed multiplier of the body and scroller (1 while running, 0 otherwise)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.run_state.speed()
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Return the game to its pre-run configuration
    ///
    /// Called from `Stopped` on the leading edge of a new input. Live pairs
    /// are dropped outright, without discard events.
    pub fn reset(&mut self) {
        let spawn = self.spawn_point();
        self.body.respawn(spawn);
        self.obstacles.clear();
        self.gap = GapState::default();
        self.run_ticks = 0;
        self.spawned_this_run = 0;
        self.resets += 1;
        log::debug!("Reset #{}: body at {:?}", self.resets, spawn);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Build the renderer's view of the current frame
    pub fn snapshot(&self) -> Snapshot {
        let scroll_speed = self.scroll_speed();
        Snapshot {
            time_ticks: self.time_ticks,
            run_state: self.run_state,
            speed: self.speed(),
            body_pos: self.body.pos,
            body_vel: self.body.vel,
            pointer: self.pointer,
            obstacles: self
                .obstacles
                .iter()
                .map(|pair| {
                    let [lower, upper] = pair.rects(scroll_speed);
                    ObstacleView {
                        id: pair.id,
                        lower,
                        upper,
                    }
                })
                .collect(),
        }
    }
}
