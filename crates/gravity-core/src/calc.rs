//! Small numeric helpers shared by the pipeline stages.

use glam::{Quat, Vec3};

/// Position of `v` between `a` and `b`, clamped to \[0, 1\].
///
/// Returns 0 when `a == b`.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, v: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((v - a) / (b - a)).clamp(0.0, 1.0)
}

#[inline]
pub fn round_to_decimals(value: f32, round_factor: f32) -> f32 {
    (value * round_factor).round() / round_factor
}

#[inline]
pub fn equal_within(round_factor: f32, v1: f32, v2: f32) -> bool {
    round_to_decimals(v1, round_factor) == round_to_decimals(v2, round_factor)
}

pub fn vector_equal_within(round_factor: f32, v1: Vec3, v2: Vec3) -> bool {
    equal_within(round_factor, v1.x, v2.x)
        && equal_within(round_factor, v1.y, v2.y)
        && equal_within(round_factor, v1.z, v2.z)
}

/// Logarithmic ease `ln(value * k + 1)`; a negative `log_max_x` mirrors the curve below zero.
#[inline]
pub fn scaled_smooth_max(value: f32, log_max_x: f32) -> f32 {
    if log_max_x < 0.0 {
        return -(value * log_max_x.abs() + 1.0).ln();
    }
    (value * log_max_x + 1.0).ln()
}

/// Express `point` in the local frame of an origin (right, up, forward components).
pub fn relative_position(origin_pos: Vec3, origin_rot: Quat, point: Vec3) -> Vec3 {
    let distance = point - origin_pos;
    let right = (origin_rot * Vec3::X).normalize();
    let up = (origin_rot * Vec3::Y).normalize();
    let forward = (origin_rot * Vec3::Z).normalize();
    Vec3::new(distance.dot(right), distance.dot(up), distance.dot(forward))
}

/// Axis-aligned extents of a point cloud, measured in the origin's local frame.
///
/// An empty cloud has zero size.
pub fn bounds_size(origin_pos: Vec3, origin_rot: Quat, points: &[Vec3]) -> Vec3 {
    if points.is_empty() {
        return Vec3::ZERO;
    }
    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for p in points {
        let local = relative_position(origin_pos, origin_rot, *p);
        min = min.min(local);
        max = max.max(local);
    }
    max - min
}
