//! Gravity-driven soft physics offsets.

use super::load_direction_set;
use crate::direction::Direction;
use crate::effect::{self, Coupling, Multiplier};
use crate::error::Result;
use crate::host::{ParameterStore, TargetWriter};
use crate::mapper::{ConfigSet, MapInputs, ParamConfig};
use crate::mass::legacy_scale;
use crate::orchestrator::AxisMultipliers;
use crate::orientation::OrientationSample;
use crate::settings::ParamSettings;
use std::collections::BTreeMap;

/// Per-axis effect multipliers shared by the six-way handlers.
#[derive(Clone, Copy, Debug, Default)]
pub struct AxisEffects {
    pub x: Multiplier,
    pub y: Multiplier,
    pub z: Multiplier,
}

impl AxisEffects {
    pub fn from_params(axes: &AxisMultipliers) -> Self {
        let mut y = Multiplier::new(axes.y);
        y.extra = axes.y_extra;
        y.opposite_extra = axes.y_opposite_extra;
        Self {
            x: Multiplier::new(axes.x),
            y,
            z: Multiplier::new(axes.z),
        }
    }

    pub fn roll(&self, sample: &OrientationSample) -> f32 {
        effect::roll_effect(sample.roll, &self.x)
    }

    pub fn depth(&self, sample: &OrientationSample) -> f32 {
        effect::depth_effect(sample.pitch, sample.roll, &self.z)
    }

    pub fn up_down(&self, sample: &OrientationSample, coupling: Coupling) -> f32 {
        effect::up_down_effect(sample.pitch, sample.roll, &self.y, coupling)
    }
}

/// Which zone of each axis is active for a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveZones {
    pub roll: (Direction, Direction),
    pub depth: (Direction, Direction),
    pub vertical: (Direction, Direction),
}

impl ActiveZones {
    /// `(active, inactive)` per axis.
    pub fn for_sample(sample: &OrientationSample) -> Self {
        let roll = if sample.roll >= 0.0 {
            (Direction::Left, Direction::Right)
        } else {
            (Direction::Right, Direction::Left)
        };
        let depth = if sample.pitch >= 0.0 {
            (Direction::Forward, Direction::Back)
        } else {
            (Direction::Back, Direction::Forward)
        };
        let vertical = if sample.pitch.abs() < 1.0 {
            (Direction::Down, Direction::Up)
        } else {
            (Direction::Up, Direction::Down)
        };
        Self {
            roll,
            depth,
            vertical,
        }
    }
}

/// Soft physics coefficients scaled by the gravity amount and the legacy
/// size scale of the current mass.
#[derive(Debug, Default)]
pub struct GravityPhysicsHandler {
    configs: ConfigSet<Direction, ParamConfig>,
    pub effects: AxisEffects,
}

impl GravityPhysicsHandler {
    pub fn load(
        section: &BTreeMap<String, BTreeMap<String, ParamSettings>>,
        axes: &AxisMultipliers,
        store: &dyn ParameterStore,
    ) -> Self {
        let configs = load_direction_set("gravityPhysics", section, store, |name, handle, value, settings| {
            ParamConfig::new(name, handle, value, settings)
        });
        Self {
            configs,
            effects: AxisEffects::from_params(axes),
        }
    }

    pub fn configs(&self) -> &ConfigSet<Direction, ParamConfig> {
        &self.configs
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn set_base_values(&mut self, out: &TargetWriter<'_>) {
        self.configs.set_base_values(out);
    }

    pub fn reset_all(&self, out: &mut TargetWriter<'_>) {
        self.configs.reset_all(out);
    }

    /// `mass` is the clamped estimate; `gravity` the normalized gravity amount.
    pub fn update(
        &self,
        sample: &OrientationSample,
        mass: f32,
        gravity: f32,
        out: &mut TargetWriter<'_>,
    ) -> Result<()> {
        self.update_with(sample, &MapInputs::new(legacy_scale(mass), gravity), out)
    }

    pub fn update_with(
        &self,
        sample: &OrientationSample,
        inputs: &MapInputs,
        out: &mut TargetWriter<'_>,
    ) -> Result<()> {
        if !out.adjustment_enabled() {
            self.reset_all(out);
            return Ok(());
        }
        let zones = ActiveZones::for_sample(sample);

        self.configs.reset(zones.roll.1, out);
        self.configs
            .apply(zones.roll.0, self.effects.roll(sample), inputs, out)?;

        self.configs.reset(zones.depth.1, out);
        self.configs
            .apply(zones.depth.0, self.effects.depth(sample), inputs, out)?;

        let coupling = if zones.vertical.0 == Direction::Down {
            Coupling::Same
        } else {
            Coupling::Opposite
        };
        self.configs.reset(zones.vertical.1, out);
        self.configs
            .apply(zones.vertical.0, self.effects.up_down(sample, coupling), inputs, out)?;
        Ok(())
    }
}
