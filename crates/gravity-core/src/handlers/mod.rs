//! Per-family handlers. Each owns the config set for one family of targets
//! and knows how to route the current pose into its zones.

pub mod gravity_morph;
pub mod gravity_physics;
pub mod relative_pos_morph;
pub mod static_physics;

pub use gravity_morph::*;
pub use gravity_physics::*;
pub use relative_pos_morph::*;
pub use static_physics::*;

use crate::direction::{Direction, Zone};
use crate::error::Result;
use crate::host::{ParamHandle, ParameterStore, PositionDiffs, TargetWriter};
use crate::mapper::{ConfigSet, ZoneParam};
use crate::mass::MassEstimate;
use crate::orchestrator::{ControllerParams, IntensityControls};
use crate::orientation::OrientationSample;
use crate::settings::ModeSettings;
use std::collections::BTreeMap;

/// Build a six-way config set, skipping unknown zones and parameters the
/// host cannot resolve.
pub(crate) fn load_direction_set<S, C: ZoneParam>(
    family: &str,
    section: &BTreeMap<String, BTreeMap<String, S>>,
    store: &dyn ParameterStore,
    mut make: impl FnMut(&str, ParamHandle, f32, &S) -> C,
) -> ConfigSet<Direction, C> {
    let mut set = ConfigSet::new();
    for (zone_key, params) in section {
        let zone = match Direction::parse(zone_key) {
            Ok(zone) => zone,
            Err(err) => {
                log::warn!("[settings] {family}: {err}, skipping");
                continue;
            }
        };
        for (name, settings) in params {
            match store.resolve(name) {
                Some(handle) => {
                    set.insert(zone, make(name, handle, store.get(handle), settings));
                }
                None => log::warn!(
                    "[settings] {family}: parameter '{name}' in zone {} not found, skipping",
                    zone.key()
                ),
            }
        }
    }
    set
}

/// Every handler for the active mode. Replaced wholesale on mode load.
#[derive(Debug, Default)]
pub struct Handlers {
    pub gravity_physics: GravityPhysicsHandler,
    pub gravity_morphs: GravityMorphHandler,
    pub relative_pos: RelativePosMorphHandler,
    pub static_physics: StaticPhysicsHandler,
}

impl Handlers {
    pub fn load(settings: &ModeSettings, params: &ControllerParams, store: &dyn ParameterStore) -> Self {
        Self {
            gravity_physics: GravityPhysicsHandler::load(&settings.gravity_physics, &params.physics, store),
            gravity_morphs: GravityMorphHandler::load(&settings.gravity_morphs, &params.morphs, store),
            relative_pos: RelativePosMorphHandler::load(
                &settings.relative_pos_morphs,
                params.relative_pos,
                store,
            ),
            static_physics: StaticPhysicsHandler::load(&settings.static_physics, settings.writes_mass, store),
        }
    }

    /// Route the current pose and positional differences into every zone.
    pub fn apply_pose(
        &mut self,
        sample: &OrientationSample,
        estimate: &MassEstimate,
        controls: &IntensityControls,
        diffs: &PositionDiffs,
        out: &mut TargetWriter<'_>,
    ) -> Result<()> {
        self.gravity_physics
            .update(sample, estimate.clamped_mass, controls.gravity_amount(), out)?;
        self.gravity_morphs.set_gravity(controls.gravity_amount());
        self.gravity_morphs
            .update(sample, estimate.clamped_mass, controls.softness_amount(), out)?;
        self.relative_pos
            .update(diffs, estimate.clamped_mass, controls.softness_amount(), out)?;
        Ok(())
    }

    /// Reset every zone of every config set. No-op before the first load.
    pub fn reset_all(&self, out: &mut TargetWriter<'_>) {
        self.gravity_physics.reset_all(out);
        self.gravity_morphs.reset_all(out);
        self.relative_pos.reset_all(out);
    }

    pub fn set_base_values(&mut self, out: &TargetWriter<'_>) {
        self.gravity_physics.set_base_values(out);
    }

    /// Configs across all families, static physics included.
    pub fn len(&self) -> usize {
        self.gravity_physics.len()
            + self.gravity_morphs.len()
            + self.relative_pos.len()
            + self.static_physics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
