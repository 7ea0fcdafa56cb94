//! Pose morphs: sag and lean shapes weighted by the body's orientation.

use super::gravity_physics::{ActiveZones, AxisEffects};
use super::load_direction_set;
use crate::calc::scaled_smooth_max;
use crate::constants::GRAVITY_LOG_MAX_X;
use crate::direction::Direction;
use crate::effect::{Coupling, Multiplier};
use crate::error::Result;
use crate::host::{ParameterStore, TargetWriter};
use crate::mapper::{ConfigSet, MapInputs, MorphConfig};
use crate::mass::legacy_scale;
use crate::orchestrator::AxisMultipliers;
use crate::orientation::OrientationSample;
use crate::settings::MorphMultiplier;
use std::collections::BTreeMap;

/// Sag curve over the normalized gravity amount; the default amount of 0.5
/// maps to 1.
pub fn sag_curve(gravity: f32) -> f32 {
    scaled_smooth_max(2.0 * gravity, GRAVITY_LOG_MAX_X)
}

/// Roll zones only take half of any sag beyond 1.
#[inline]
pub fn roll_gain(sag: f32) -> f32 {
    if sag >= 1.0 {
        1.0 + (sag - 1.0) / 2.0
    } else {
        sag
    }
}

#[derive(Debug)]
pub struct GravityMorphHandler {
    configs: ConfigSet<Direction, MorphConfig>,
    pub effects: AxisEffects,
    sag: Multiplier,
}

impl Default for GravityMorphHandler {
    fn default() -> Self {
        Self {
            configs: ConfigSet::default(),
            effects: AxisEffects::default(),
            sag: Multiplier::with_curve(0.5, sag_curve),
        }
    }
}

impl GravityMorphHandler {
    pub fn load(
        section: &BTreeMap<String, BTreeMap<String, MorphMultiplier>>,
        axes: &AxisMultipliers,
        store: &dyn ParameterStore,
    ) -> Self {
        let configs = load_direction_set("gravityMorphs", section, store, |name, handle, value, multiplier| {
            MorphConfig::new(name, handle, value, *multiplier)
        });
        Self {
            configs,
            effects: AxisEffects::from_params(axes),
            ..Self::default()
        }
    }

    pub fn configs(&self) -> &ConfigSet<Direction, MorphConfig> {
        &self.configs
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.sag.set_value(gravity);
    }

    #[inline]
    pub fn sag(&self) -> f32 {
        self.sag.main()
    }

    pub fn reset_all(&self, out: &mut TargetWriter<'_>) {
        self.configs.reset_all(out);
    }

    /// `mass` is the clamped estimate; `softness` the normalized softness.
    pub fn update(
        &self,
        sample: &OrientationSample,
        mass: f32,
        softness: f32,
        out: &mut TargetWriter<'_>,
    ) -> Result<()> {
        if !out.adjustment_enabled() {
            self.reset_all(out);
            return Ok(());
        }
        let inputs = MapInputs::new(legacy_scale(mass), softness);
        let pitch_inputs = inputs.with_gain(self.sag());
        let roll_inputs = inputs.with_gain(roll_gain(self.sag()));
        let zones = ActiveZones::for_sample(sample);

        self.configs.reset(zones.roll.1, out);
        self.configs
            .apply(zones.roll.0, self.effects.roll(sample), &roll_inputs, out)?;

        self.configs.reset(zones.depth.1, out);
        self.configs
            .apply(zones.depth.0, self.effects.depth(sample), &pitch_inputs, out)?;

        let coupling = if zones.vertical.0 == Direction::Down {
            Coupling::Same
        } else {
            Coupling::Opposite
        };
        self.configs.reset(zones.vertical.1, out);
        self.configs.apply(
            zones.vertical.0,
            self.effects.up_down(sample, coupling),
            &pitch_inputs,
            out,
        )?;
        Ok(())
    }
}
