//! Interfaces to the host application.
//!
//! The core never owns host objects. It samples the host through
//! [`BodyHost`] once per tick and writes simulation parameters through a
//! [`ParameterStore`]. An optional [`ValueObserver`] (e.g. a tuning UI) is
//! handed in by the composition root.

use fnv::FnvHashMap;
use glam::{Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParamHandle(pub u32);

/// Named float parameters (soft-physics coefficients, morph weights).
pub trait ParameterStore {
    fn resolve(&self, name: &str) -> Option<ParamHandle>;
    /// Current value; unknown handles read as 0.
    fn get(&self, handle: ParamHandle) -> f32;
    fn set(&mut self, handle: ParamHandle, value: f32);
}

/// Optional tuning/inspection capability.
pub trait ValueObserver {
    /// Called after every value the mapper writes or resets.
    fn value_changed(&mut self, zone: &'static str, param: &str, value: f32);

    fn debug_info(&mut self, _text: &str) {}

    /// Gravity adjustments are skipped (and their zones reset) while false.
    fn adjustment_enabled(&self) -> bool {
        true
    }
}

/// Positional differences between the soft region and its rest pose, one
/// value per side. Angles in degrees, depth in length units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionDiffs {
    pub angle_y_left: f32,
    pub angle_y_right: f32,
    pub depth_diff_left: f32,
    pub depth_diff_right: f32,
    pub angle_x_left: f32,
    pub angle_x_right: f32,
}

/// Everything the orchestrator samples from the host each tick.
pub trait BodyHost {
    fn orientation(&self) -> Quat;
    /// Bounding box extents (meters) of the soft region.
    fn bounds_size(&self) -> Vec3;
    fn atom_scale(&self) -> f32;
    /// Changes whenever the shape-morph set changes.
    fn shape_revision(&self) -> u64;
    fn position_diffs(&self) -> PositionDiffs;
    fn params(&mut self) -> &mut dyn ParameterStore;
}

/// Write path used by every config: store first, then the observer.
pub struct TargetWriter<'a> {
    store: &'a mut dyn ParameterStore,
    observer: Option<&'a mut (dyn ValueObserver + 'static)>,
}

impl<'a> TargetWriter<'a> {
    pub fn new(
        store: &'a mut dyn ParameterStore,
        observer: Option<&'a mut (dyn ValueObserver + 'static)>,
    ) -> Self {
        Self { store, observer }
    }

    #[inline]
    pub fn get(&self, handle: ParamHandle) -> f32 {
        self.store.get(handle)
    }

    pub fn write(&mut self, zone: &'static str, param: &str, handle: ParamHandle, value: f32) {
        self.store.set(handle, value);
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.value_changed(zone, param, value);
        }
    }

    pub fn debug_info(&mut self, text: &str) {
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.debug_info(text);
        }
    }

    pub fn adjustment_enabled(&self) -> bool {
        self.observer
            .as_deref()
            .map_or(true, |observer| observer.adjustment_enabled())
    }
}

/// Simple host-side store keyed by name; used by the native host and tests.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    handles: FnvHashMap<String, ParamHandle>,
    values: Vec<f32>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) a parameter and return its handle.
    pub fn insert(&mut self, name: &str, value: f32) -> ParamHandle {
        if let Some(&handle) = self.handles.get(name) {
            self.values[handle.0 as usize] = value;
            return handle;
        }
        let handle = ParamHandle(self.values.len() as u32);
        self.values.push(value);
        self.handles.insert(name.to_string(), handle);
        handle
    }

    pub fn value(&self, name: &str) -> Option<f32> {
        self.handles
            .get(name)
            .and_then(|h| self.values.get(h.0 as usize))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ParameterStore for InMemoryStore {
    fn resolve(&self, name: &str) -> Option<ParamHandle> {
        self.handles.get(name).copied()
    }

    fn get(&self, handle: ParamHandle) -> f32 {
        self.values.get(handle.0 as usize).copied().unwrap_or(0.0)
    }

    fn set(&mut self, handle: ParamHandle, value: f32) {
        if let Some(slot) = self.values.get_mut(handle.0 as usize) {
            *slot = value;
        }
    }
}
