//! Collision geometry
//!
//! The body is a circle and every obstacle is an axis-aligned rectangle, so
//! overlap reduces to the distance from the circle centre to the closest
//! point of the rectangle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// A zero-area rectangle has nothing to collide with
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    /// Closest point inside the rectangle to `point`
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}

/// Check whether a circle overlaps a rectangle
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    if rect.is_empty() {
        return false;
    }
    let closest = rect.closest_point(center);
    (center - closest).length_squared() < radius * radius
}
