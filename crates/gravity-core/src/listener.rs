//! Change detection on host signals that invalidate the mass estimate.

use crate::calc::round_to_decimals;
use crate::constants::SCALE_ROUND_FACTOR;

/// Remembers the last observed value. The first observation only primes the
/// listener and never counts as a change.
#[derive(Clone, Debug, Default)]
pub struct ChangeListener<T> {
    last: Option<T>,
}

impl<T: PartialEq + Copy> ChangeListener<T> {
    pub fn new() -> Self {
        Self { last: None }
    }

    pub fn observe(&mut self, value: T) -> bool {
        let changed = matches!(self.last, Some(last) if last != value);
        self.last = Some(value);
        changed
    }

    pub fn last(&self) -> Option<T> {
        self.last
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// Atom scale listener; sub-millesimal jitter is not a change.
#[derive(Clone, Debug, Default)]
pub struct ScaleListener {
    inner: ChangeListener<i64>,
}

impl ScaleListener {
    pub fn observe(&mut self, scale: f32) -> bool {
        let key = (round_to_decimals(scale, SCALE_ROUND_FACTOR) * SCALE_ROUND_FACTOR) as i64;
        self.inner.observe(key)
    }
}

pub type ShapeListener = ChangeListener<u64>;
