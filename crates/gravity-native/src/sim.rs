//! Scripted body used by the headless host.

use fnv::FnvHashSet;
use glam::{Quat, Vec3};
use gravity_core::calc::bounds_size;
use gravity_core::constants::MASS_PARAM_NAME;
use gravity_core::{relative_pos_group, BodyHost, InMemoryStore, ModeSettings, ParameterStore, PositionDiffs};
use rand::prelude::*;
use std::f32::consts::PI;

const POINT_COUNT: usize = 256;
const REST_RADII: Vec3 = Vec3::new(0.07, 0.06, 0.05); // meters
const JITTER: f32 = 0.0004;
const GROWTH_START_SEC: f32 = 3.0;
const GROWTH_END_SEC: f32 = 3.5;
const GROWTH_AMOUNT: f32 = 0.15;
const RESCALE_AT_SEC: f32 = 6.0;
const RESCALED_ATOM_SCALE: f32 = 1.1;

pub struct SimulatedBody {
    time: f32,
    origin: Vec3,
    orientation: Quat,
    atom_scale: f32,
    growth: f32,
    shape_revision: u64,
    bounds: Vec3,
    local_points: Vec<Vec3>,
    store: InMemoryStore,
    rng: StdRng,
}

impl SimulatedBody {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        // points on the rest ellipsoid
        let local_points = (0..POINT_COUNT)
            .map(|_| {
                let theta = rng.gen_range(0.0..(2.0 * PI));
                let z: f32 = rng.gen_range(-1.0..1.0);
                let r = (1.0 - z * z).sqrt();
                Vec3::new(r * theta.cos(), r * theta.sin(), z) * REST_RADII
            })
            .collect();
        Self {
            time: 0.0,
            origin: Vec3::new(0.0, 1.3, 0.1),
            orientation: Quat::IDENTITY,
            atom_scale: 1.0,
            growth: 1.0,
            shape_revision: 0,
            bounds: REST_RADII * 2.0,
            local_points,
            store: InMemoryStore::new(),
            rng,
        }
    }

    /// Register every parameter a mode can address so names resolve.
    pub fn register_params(&mut self, settings: &ModeSettings) {
        let mut names: FnvHashSet<String> = FnvHashSet::default();
        for params in settings.gravity_physics.values() {
            names.extend(params.keys().cloned());
        }
        for morphs in settings.gravity_morphs.values() {
            names.extend(morphs.keys().cloned());
        }
        for (group, morphs) in &settings.relative_pos_morphs {
            let Some(zones) = relative_pos_group(group) else {
                continue;
            };
            for morph in morphs.keys() {
                names.extend(zones.iter().map(|(_, suffix)| format!("{morph}{suffix}")));
            }
        }
        for params in settings.static_physics.values() {
            names.extend(params.keys().cloned());
        }
        names.insert(MASS_PARAM_NAME.to_string());

        let mut names = names.into_iter().collect::<Vec<_>>();
        names.sort();
        for name in &names {
            if self.store.resolve(name).is_none() {
                self.store.insert(name, rest_value(name));
            }
        }
        log::info!("[host] registered {} parameters", names.len());
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance the script: a slow tumble, one growth spurt and one rescale.
    pub fn step(&mut self, dt: f32) {
        self.time += dt;
        let t = self.time;

        let pitch = 2.2 * (t * 0.35).sin();
        let roll = 1.2 * (t * 0.6).sin();
        self.orientation = Quat::from_rotation_z(roll) * Quat::from_rotation_x(pitch);

        if (GROWTH_START_SEC..GROWTH_END_SEC).contains(&t) {
            let progress = (t - GROWTH_START_SEC) / (GROWTH_END_SEC - GROWTH_START_SEC);
            self.growth = 1.0 + GROWTH_AMOUNT * progress;
            self.shape_revision += 1;
        }
        if t >= RESCALE_AT_SEC {
            self.atom_scale = RESCALED_ATOM_SCALE;
        }

        let points = self.world_points();
        self.bounds = bounds_size(self.origin, self.orientation, &points);
    }

    fn world_points(&mut self) -> Vec<Vec3> {
        let jitter = Vec3::new(
            self.rng.gen_range(-JITTER..JITTER),
            self.rng.gen_range(-JITTER..JITTER),
            self.rng.gen_range(-JITTER..JITTER),
        );
        self.local_points
            .iter()
            .map(|p| self.origin + self.orientation * (*p * self.growth * self.atom_scale) + jitter)
            .collect()
    }
}

fn rest_value(name: &str) -> f32 {
    match name {
        "centerOfGravityPercent" => 0.5,
        "softVerticesDistanceLimit" => 0.02,
        MASS_PARAM_NAME => 0.5,
        _ => 0.0,
    }
}

impl BodyHost for SimulatedBody {
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
        let t = self.time;
        PositionDiffs {
            angle_y_left: 20.0 * t.sin(),
            angle_y_right: 18.0 * (t + 0.3).sin(),
            depth_diff_left: 0.03 * (t * 0.7).cos(),
            depth_diff_right: 0.028 * (t * 0.7 + 0.2).cos(),
            angle_x_left: 15.0 * (t * 0.5).sin(),
            angle_x_right: -15.0 * (t * 0.5).sin(),
        }
    }

    fn params(&mut self) -> &mut dyn ParameterStore {
        &mut self.store
    }
}
