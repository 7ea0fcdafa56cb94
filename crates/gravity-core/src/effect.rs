//! Directional effect calculators.
//!
//! Pure functions of (pitch, roll, [`Multiplier`]) returning effect
//! magnitudes. The pitch domain is split at -1, 0 and 1; every branch meets
//! its neighbour at the split value so parameters never jump when the body
//! crosses from one zone into the next.

use crate::calc::inverse_lerp;
use crate::constants::{DEPTH_DIFF_CEILING, HORIZONTAL_ANGLE_CEILING_DEG, VERTICAL_ANGLE_CEILING_DEG};

/// Live scalar derived from an intensity control, optionally shaped by a curve.
///
/// `extra` and `opposite_extra` couple a secondary axis into the effect; a
/// missing value behaves like 1.
#[derive(Clone, Copy, Debug)]
pub struct Multiplier {
    main: f32,
    pub extra: Option<f32>,
    pub opposite_extra: Option<f32>,
    curve: Option<fn(f32) -> f32>,
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Multiplier {
    pub fn new(value: f32) -> Self {
        Self {
            main: value,
            extra: None,
            opposite_extra: None,
            curve: None,
        }
    }

    pub fn with_curve(value: f32, curve: fn(f32) -> f32) -> Self {
        Self {
            main: curve(value),
            extra: None,
            opposite_extra: None,
            curve: Some(curve),
        }
    }

    pub fn set_value(&mut self, value: f32) {
        self.main = match self.curve {
            Some(curve) => curve(value),
            None => value,
        };
    }

    #[inline]
    pub fn main(&self) -> f32 {
        self.main
    }
}

/// Which of a zone pair an up/down effect is computed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coupling {
    Same,
    Opposite,
}

/// A body rolled fully onto its side has no well-defined up/down pose.
#[inline]
pub fn roll_multiplier(roll: f32) -> f32 {
    1.0 - roll.abs()
}

/// Roll effect, symmetric for left/right. Halved because the mass and
/// secondary terms of the mapper contribute equally.
#[inline]
pub fn roll_effect(roll: f32, multiplier: &Multiplier) -> f32 {
    roll.abs() * multiplier.main() / 2.0
}

/// Up/down component: 1 when upright or fully inverted, 0 when horizontal.
pub fn up_down_adjust(pitch: f32) -> f32 {
    if pitch >= 0.0 {
        // upright, leaning forward
        if pitch < 1.0 {
            return 1.0 - pitch;
        }
        // upside down
        return pitch - 1.0;
    }
    // upright, leaning back
    if pitch >= -1.0 {
        return 1.0 + pitch;
    }
    // upside down
    -pitch - 1.0
}

/// Forward/back component: 0 when upright or fully inverted, 1 when horizontal.
pub fn depth_adjust(pitch: f32) -> f32 {
    if pitch >= 0.0 {
        if pitch < 1.0 {
            return pitch;
        }
        return 2.0 - pitch;
    }
    if pitch >= -1.0 {
        return -pitch;
    }
    2.0 + pitch
}

pub fn up_down_effect(pitch: f32, roll: f32, multiplier: &Multiplier, coupling: Coupling) -> f32 {
    let extra = match coupling {
        Coupling::Same => multiplier.extra,
        Coupling::Opposite => multiplier.opposite_extra,
    };
    up_down_adjust(pitch) * roll_multiplier(roll) * multiplier.main() * extra.unwrap_or(1.0) / 2.0
}

pub fn depth_effect(pitch: f32, roll: f32, multiplier: &Multiplier) -> f32 {
    depth_adjust(pitch) * roll_multiplier(roll) * multiplier.main() / 2.0
}

/// Peaks when the body lies horizontal: `2 * (0.5 - |pitch|)` scaled by roll.
pub fn diff_from_horizontal(pitch: f32, roll: f32) -> f32 {
    let diff = if pitch >= 0.0 { 0.5 - pitch } else { 0.5 + pitch };
    2.0 * diff * roll_multiplier(roll)
}

// ---------------- Positional-difference effects ----------------

/// Vertical angle (degrees) between the region and its rest position.
#[inline]
pub fn vertical_angle_effect(angle: f32, multiplier: f32) -> f32 {
    inverse_lerp(0.0, VERTICAL_ANGLE_CEILING_DEG, multiplier * angle.abs())
}

#[inline]
pub fn horizontal_angle_effect(angle: f32, multiplier: f32) -> f32 {
    inverse_lerp(0.0, HORIZONTAL_ANGLE_CEILING_DEG, multiplier * angle.abs())
}

#[inline]
pub fn depth_diff_effect(distance: f32, multiplier: f32) -> f32 {
    inverse_lerp(0.0, DEPTH_DIFF_CEILING, multiplier * distance.abs())
}
