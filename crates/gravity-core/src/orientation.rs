//! Decoding a body orientation into the two signed signals the effect
//! calculators work with.
//!
//! - `roll` in \[-1, 1\]: +1 = rolled 90 degrees left, -1 = rolled 90 degrees right
//! - `pitch` in \[-2, 2\]: 0 = upright, +1 = horizontal face down,
//!   -1 = horizontal face up, ±2 = upside down

use crate::calc::inverse_lerp;
use crate::error::{GravityError, Result};
use glam::Quat;
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationSample {
    pub roll: f32,
    pub pitch: f32,
}

impl OrientationSample {
    /// Decode a host orientation. Non-unit quaternions are normalized first.
    pub fn from_quat(q: Quat) -> Result<Self> {
        let q = checked_unit(q)?;
        Ok(Self {
            roll: roll(q),
            pitch: pitch(q),
        })
    }
}

/// Roll component of a unit quaternion, in \[-1, 1\].
pub fn roll(q: Quat) -> f32 {
    let [x, y, z, w] = q.to_array();
    let sin_roll = (2.0 * x * y + 2.0 * z * w).clamp(-1.0, 1.0);
    2.0 * inverse_lerp_to_pi(sin_roll.asin())
}

/// Pitch component of a unit quaternion, in \[-2, 2\].
pub fn pitch(q: Quat) -> f32 {
    let [x, y, z, w] = q.to_array();
    let angle = (2.0 * x * w - 2.0 * y * z).atan2(1.0 - 2.0 * x * x - 2.0 * z * z);
    2.0 * inverse_lerp_to_pi(angle)
}

// [0, π] -> [0, 1], mirrored for negative input; exact at 0, ±π/2, ±π.
#[inline]
fn inverse_lerp_to_pi(val: f32) -> f32 {
    if val > 0.0 {
        return inverse_lerp(0.0, PI, val);
    }
    -inverse_lerp(0.0, -PI, val)
}

fn checked_unit(q: Quat) -> Result<Quat> {
    let len = q.length();
    if !q.is_finite() || !len.is_finite() || len < 1e-6 {
        return Err(GravityError::InvalidOrientation(q.to_array()));
    }
    Ok(q / len)
}
