// Scripted host and helpers shared by the integration tests.

#![allow(dead_code)]

use glam::{Quat, Vec3};
use gravity_core::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub const EPS: f32 = 1e-5;
pub const FRAME: Duration = Duration::from_millis(16);

pub fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() < eps
}

pub struct ScriptedHost {
    pub orientation: Quat,
    pub bounds: Vec3,
    pub atom_scale: f32,
    pub shape_revision: u64,
    pub diffs: PositionDiffs,
    pub store: InMemoryStore,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self {
            orientation: Quat::IDENTITY,
            bounds: Vec3::new(0.14, 0.12, 0.10),
            atom_scale: 1.0,
            shape_revision: 0,
            diffs: PositionDiffs::default(),
            store: InMemoryStore::new(),
        }
    }

    pub fn with_params(params: &[(&str, f32)]) -> Self {
        let mut host = Self::new();
        for (name, value) in params {
            host.store.insert(name, *value);
        }
        host
    }

    pub fn value(&self, name: &str) -> f32 {
        self.store
            .value(name)
            .unwrap_or_else(|| panic!("parameter '{name}' not registered"))
    }

    /// Roll/pitch angles in radians, composed like the decoder expects.
    pub fn set_pose(&mut self, roll: f32, pitch: f32) {
        self.orientation = Quat::from_rotation_z(roll) * Quat::from_rotation_x(pitch);
    }
}

impl BodyHost for ScriptedHost {
    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn bounds_size(&self) -> Vec3 {
        self.bounds
    }

    fn atom_scale(&self) -> f32 {
        self.atom_scale
    }

    fn shape_revision(&self) -> u64 {
        self.shape_revision
    }

    fn position_diffs(&self) -> PositionDiffs {
        self.diffs
    }

    fn params(&mut self) -> &mut dyn ParameterStore {
        &mut self.store
    }
}

/// Observer that records every write; clones share the same log.
#[derive(Clone, Default)]
pub struct Recorder {
    pub writes: Rc<RefCell<Vec<(String, String, f32)>>>,
    pub debug: Rc<RefCell<Vec<String>>>,
    pub disabled: bool,
}

impl Recorder {
    pub fn count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl ValueObserver for Recorder {
    fn value_changed(&mut self, zone: &'static str, param: &str, value: f32) {
        self.writes
            .borrow_mut()
            .push((zone.to_string(), param.to_string(), value));
    }

    fn debug_info(&mut self, text: &str) {
        self.debug.borrow_mut().push(text.to_string());
    }

    fn adjustment_enabled(&self) -> bool {
        !self.disabled
    }
}

/// Tick until the mass refinement finishes; panics if it never does.
pub fn run_refresh(controller: &mut UpdateOrchestrator, host: &mut ScriptedHost) -> usize {
    for ticks in 1..=500 {
        controller.tick(FRAME, host);
        if controller.refresh_status() == RefreshStatus::Done {
            return ticks;
        }
    }
    panic!("refresh did not finish, status {:?}", controller.refresh_status());
}
