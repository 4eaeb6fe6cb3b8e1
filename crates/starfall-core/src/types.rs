//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{FIELD_HEIGHT, FIELD_WIDTH};

/// Axis-aligned bounding box used for all collision tests.
/// Stored as a center point plus half-extents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f32,
}

impl Aabb {
    /// Build a box from a center point and a full width/height size.
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    /// Overlap test. Boxes that merely touch at an edge count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let d = (other.center - self.center).abs();
        let reach = self.half + other.half;
        d.x <= reach.x && d.y <= reach.y
    }

    /// Whether a point lies inside the box (edges inclusive).
    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half.x && d.y <= self.half.y
    }
}

impl SimTime {
    /// Seconds per tick at the nominal tick rate, before time scaling.
    pub fn base_dt(&self) -> f32 {
        1.0 / crate::constants::TICK_RATE as f32
    }

    /// Advance by one tick of the given (already scaled) duration.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Whether a point has left the play field by more than `margin` on any side.
pub fn outside_field(point: Vec2, margin: f32) -> bool {
    point.x < -margin
        || point.x > FIELD_WIDTH + margin
        || point.y < -margin
        || point.y > FIELD_HEIGHT + margin
}

/// Clamp a point to the play field, keeping `half` of slack from each edge.
pub fn clamp_to_field(point: Vec2, half: Vec2) -> Vec2 {
    Vec2::new(
        point.x.clamp(half.x, FIELD_WIDTH - half.x),
        point.y.clamp(half.y, FIELD_HEIGHT - half.y),
    )
}

/// Wrap an angle to the half-open interval [-PI, PI).
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + std::f32::consts::PI).rem_euclid(std::f32::consts::TAU);
    wrapped - std::f32::consts::PI
}
