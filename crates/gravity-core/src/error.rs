//! Library error type.

use thiserror::Error;

/// Errors raised by the gravity pipeline.
///
/// Per-tick failures bubble up to [`crate::UpdateOrchestrator::tick`], which
/// logs them and disables continuous updates instead of retrying.
#[derive(Debug, Error)]
pub enum GravityError {
    /// The host supplied an orientation with NaN/infinite components or zero length.
    #[error("invalid orientation quaternion {0:?}")]
    InvalidOrientation([f32; 4]),

    /// A mapped value was not finite; nothing was written to the target.
    #[error("non-finite value {value} for '{param}' in zone {zone}")]
    NonFiniteValue {
        zone: &'static str,
        param: String,
        value: f32,
    },

    #[error("failed to parse mode settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("unknown mode '{0}'")]
    UnknownMode(String),

    #[error("unknown zone key '{0}'")]
    UnknownZone(String),
}

pub type Result<T> = std::result::Result<T, GravityError>;
