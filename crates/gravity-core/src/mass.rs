//! Mass estimation from the soft region's bounding geometry.
//!
//! The region is approximated by the ellipsoid inscribed in its bounding box.
//! The volume is converted to a synthetic mass with a power law that grows
//! faster than linear, compensating for the larger outer shell and hard
//! colliders of bigger instances.

use crate::calc::round_to_decimals;
use crate::constants::*;
use glam::Vec3;
use std::f32::consts::PI;

/// Stateless volume/mass fit. Holds no host handles; the caller samples the
/// bounding box and atom scale and passes them in.
#[derive(Clone, Copy, Debug, Default)]
pub struct MassEstimator;

impl MassEstimator {
    /// Mass for a bounding box (meters) at a uniform atom scale. Unclamped.
    pub fn calculate(&self, bounds_size: Vec3, atom_scale: f32) -> f32 {
        volume_to_mass(estimate_volume(bounds_size, clamp_atom_scale(atom_scale)))
    }

    pub fn estimate(&self, bounds_size: Vec3, atom_scale: f32) -> MassEstimate {
        MassEstimate::from_volume(estimate_volume(bounds_size, clamp_atom_scale(atom_scale)))
    }
}

/// Ellipsoid volume in cm³ with the z extent compensated for atom scale.
/// Out-of-domain scales are bounded silently; per-frame callers rely on that.
pub fn estimate_volume(size: Vec3, atom_scale: f32) -> f32 {
    let size = size.max(Vec3::ZERO);
    let z = size.z * atom_scale_factor(bounded_atom_scale(atom_scale));
    CM3_PER_M3 * (4.0 * PI * (size.x / 2.0) * (size.y / 2.0) * (z / 2.0)) / 3.0
}

#[inline]
pub fn volume_to_mass(volume: f32) -> f32 {
    ((volume * VOLUME_TO_MASS_FACTOR) / 1000.0).powf(VOLUME_TO_MASS_EXPONENT)
}

/// Scales the z extent to the apparent size when the whole body is rescaled;
/// hard colliders grow faster than the soft tissue around them.
///
/// Only meaningful inside \[`ATOM_SCALE_MIN`, `ATOM_SCALE_MAX`\]; see [`clamp_atom_scale`].
pub fn atom_scale_factor(scale: f32) -> f32 {
    if scale == 1.0 {
        return 1.0;
    }
    let adjustment = 1.0 - scale.powi(3).log10().abs();
    if scale > 1.0 {
        scale * adjustment
    } else {
        scale / adjustment
    }
}

/// Keep the atom scale inside the domain where the compensation curve is
/// positive and its denominator is well away from zero.
#[inline]
pub fn bounded_atom_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(ATOM_SCALE_MIN, ATOM_SCALE_MAX)
    } else {
        1.0
    }
}

/// [`bounded_atom_scale`] with a warning when the input was out of domain.
pub fn clamp_atom_scale(scale: f32) -> f32 {
    let clamped = bounded_atom_scale(scale);
    if clamped != scale {
        log::warn!("[mass] atom scale {scale:.3} outside [{ATOM_SCALE_MIN}, {ATOM_SCALE_MAX}], using {clamped:.3}");
    }
    clamped
}

/// Back-projects a mass estimate onto the legacy size slider scale.
#[inline]
pub fn legacy_scale(mass: f32) -> f32 {
    LEGACY_SCALE_SLOPE * mass - LEGACY_SCALE_OFFSET
}

/// Normalize a clamped mass to \[0, 1\] across the supported range.
#[inline]
pub fn normalized_mass(mass: f32) -> f32 {
    (mass - MASS_MIN) / (MASS_MAX - MASS_MIN)
}

/// Result of one mass estimation.
///
/// `clamped_mass` is what the rest of the pipeline consumes; `mass` only
/// feeds diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassEstimate {
    pub raw_volume: f32,
    pub mass: f32,
    pub clamped_mass: f32,
}

impl Default for MassEstimate {
    fn default() -> Self {
        Self {
            raw_volume: 0.0,
            mass: 0.0,
            clamped_mass: MASS_MIN,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MassClamp {
    InRange,
    Excess(f32),
    Shortage(f32),
}

impl MassEstimate {
    pub fn from_volume(volume: f32) -> Self {
        let mass = volume_to_mass(volume);
        Self {
            raw_volume: volume,
            mass,
            clamped_mass: mass.clamp(MASS_MIN, MASS_MAX),
        }
    }

    /// Excess/shortage rounded to three decimals.
    pub fn clamping(&self) -> MassClamp {
        if self.mass > MASS_MAX {
            MassClamp::Excess(round_to_decimals(self.mass - MASS_MAX, STATUS_ROUND_FACTOR))
        } else if self.mass < MASS_MIN {
            MassClamp::Shortage(round_to_decimals(MASS_MIN - self.mass, STATUS_ROUND_FACTOR))
        } else {
            MassClamp::InRange
        }
    }

    /// Human-readable status line; empty when the estimate is in range.
    pub fn status(&self) -> String {
        match self.clamping() {
            MassClamp::InRange => String::new(),
            MassClamp::Excess(v) => {
                format!("Estimated mass is {v} over the {MASS_MAX:.3} maximum.\n")
            }
            MassClamp::Shortage(v) => {
                format!("Estimated mass is {v} below the {MASS_MIN:.3} minimum.\n")
            }
        }
    }
}
