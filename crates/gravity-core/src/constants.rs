use std::time::Duration;

// Shared tuning constants for the gravity pipeline.

// Mass estimate bounds (what downstream consumers see)
pub const MASS_MIN: f32 = 0.1;
pub const MASS_MAX: f32 = 2.0;

// Intensity control ranges (user-facing units)
pub const SOFTNESS_MIN: f32 = 0.0;
pub const SOFTNESS_MAX: f32 = 100.0;
pub const SOFTNESS_DEFAULT: f32 = 50.0;
pub const GRAVITY_MIN: f32 = 0.0;
pub const GRAVITY_MAX: f32 = 100.0;
pub const GRAVITY_DEFAULT: f32 = 50.0;
pub const ERECTION_MIN: f32 = 0.0;
pub const ERECTION_MAX: f32 = 1.0;

// Volume and mass fit
pub const CM3_PER_M3: f32 = 1_000_000.0;
pub const VOLUME_TO_MASS_FACTOR: f32 = 0.82; // k in ((v * k) / 1000)^p
pub const VOLUME_TO_MASS_EXPONENT: f32 = 1.2; // p, > 1 so mass outgrows volume

// Legacy single-slider scale, kept bit-for-bit for save compatibility
pub const LEGACY_SCALE_SLOPE: f32 = 1.21;
pub const LEGACY_SCALE_OFFSET: f32 = 0.03;

// Atom scale domain for the z-extent compensation curve. The curve's
// denominator 1 - |log10(s^3)| reaches zero near s = 0.464 and s = 2.154.
pub const ATOM_SCALE_MIN: f32 = 0.75;
pub const ATOM_SCALE_MAX: f32 = 1.5;

// Mass refinement sequence
pub const REFRESH_PASSES: usize = 6;
pub const REFRESH_PASS_DELAY: Duration = Duration::from_millis(120);

// Relative-position inverse interpolation ceilings
pub const VERTICAL_ANGLE_CEILING_DEG: f32 = 75.0;
pub const HORIZONTAL_ANGLE_CEILING_DEG: f32 = 60.0;
pub const DEPTH_DIFF_CEILING: f32 = 1.0 / 12.0;

// Morph weights are clamped to this magnitude
pub const MORPH_VALUE_LIMIT: f32 = 1.33;

// Gravity curve: ln(x * k + 1) with k = e - 1 gives curve(1) == 1
pub const GRAVITY_LOG_MAX_X: f32 = std::f32::consts::E - 1.0;

// Static physics: how much the third intensity input firms "nipple" params
pub const ERECTION_FIRMNESS: f32 = 0.5;

// Rounding factors (1000 = three decimals)
pub const SCALE_ROUND_FACTOR: f32 = 1000.0;
pub const MORPH_ROUND_FACTOR: f32 = 1000.0;
pub const STATUS_ROUND_FACTOR: f32 = 1000.0;

// Host parameter receiving the clamped mass (all modes except touch optimized)
pub const MASS_PARAM_NAME: &str = "mass";
