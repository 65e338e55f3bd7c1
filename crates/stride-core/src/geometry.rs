//! Ray/plane geometry and angle helpers

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Below this |cos| a ray is treated as parallel to a plane
const PARALLEL_EPSILON: f32 = 1e-6;

/// A half-line in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`. A zero direction falls back to -Y.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: normalize_or(direction, Vec3::NEG_Y),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersect with a plane.
    ///
    /// Returns `None` when the ray is parallel to the plane or the plane is
    /// behind the ray origin.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Vec3> {
        let denom = plane.normal.dot(self.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (plane.point - self.origin).dot(plane.normal) / denom;
        if t < 0.0 || !t.is_finite() {
            return None;
        }
        Some(self.at(t))
    }
}

/// An infinite plane given by a point and a unit normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    /// Create a plane, normalizing `normal`. A zero normal falls back to +Y.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normalize_or(normal, Vec3::Y),
        }
    }

    /// Horizontal plane passing through `point`
    pub fn horizontal(point: Vec3) -> Self {
        Self {
            point,
            normal: Vec3::Y,
        }
    }

    /// Signed distance from the plane along its normal
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.point).dot(self.normal)
    }
}

/// Normalize `v`, or return `fallback` when `v` is zero, tiny, or not finite
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(fallback)
}

/// Signed angle in radians from `from` to `to`, measured about `axis`.
///
/// Both vectors are projected onto the plane perpendicular to `axis` first.
/// Positive angles follow the right-hand rule around `axis`. Returns 0 when
/// either projection is degenerate.
pub fn signed_angle(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let axis = normalize_or(axis, Vec3::Y);
    let from = from - axis * from.dot(axis);
    let to = to - axis * to.dot(axis);
    if from.length_squared() < f32::EPSILON || to.length_squared() < f32::EPSILON {
        return 0.0;
    }
    let sin = from.cross(to).dot(axis);
    let cos = from.dot(to);
    sin.atan2(cos)
}

/// Rotate `point` about `pivot` by `angle` radians around `axis`
pub fn rotate_around(point: Vec3, pivot: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let rotation = Quat::from_axis_angle(normalize_or(axis, Vec3::Y), angle);
    pivot + rotation * (point - pivot)
}
