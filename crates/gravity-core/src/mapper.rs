//! Zone parameter mapping.
//!
//! A [`ConfigSet`] maps each zone to an ordered list of configs. Applying a
//! zone's effect updates every config in that zone; resetting a zone writes
//! each config's rest value back. Both config kinds share the same shape: a
//! mass term and a secondary-intensity term, each halved, summed and scaled
//! by the zone's effect.

use crate::calc::round_to_decimals;
use crate::constants::MORPH_VALUE_LIMIT;
use crate::direction::Zone;
use crate::error::{GravityError, Result};
use crate::host::{ParamHandle, TargetWriter};
use crate::settings::{MorphMultiplier, ParamSettings};
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamMode {
    /// Overwrite the parameter when in range, zero it otherwise.
    #[default]
    Direct,
    /// Offset a baseline captured at mode load.
    Additive,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapInputs {
    pub mass: f32,
    /// Softness, mobility or gravity amount depending on the family.
    pub secondary: f32,
    /// Overall scale; only morph configs use it.
    pub gain: f32,
}

impl MapInputs {
    pub fn new(mass: f32, secondary: f32) -> Self {
        Self {
            mass,
            secondary,
            gain: 1.0,
        }
    }

    pub fn with_gain(self, gain: f32) -> Self {
        Self { gain, ..self }
    }
}

/// One tunable target inside a zone.
pub trait ZoneParam {
    fn name(&self) -> &str;

    fn apply(
        &self,
        zone: &'static str,
        effect: f32,
        inputs: &MapInputs,
        out: &mut TargetWriter<'_>,
    ) -> Result<()>;

    fn reset(&self, zone: &'static str, out: &mut TargetWriter<'_>);

    /// Snapshot the externally set value as the additive baseline.
    fn capture_baseline(&mut self, _out: &TargetWriter<'_>) {}
}

/// Multiplier-pair config for soft-physics coefficients and positional morphs.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamConfig {
    pub name: String,
    pub target: ParamHandle,
    pub is_negative: bool,
    pub multiplier1: f32,
    pub multiplier2: f32,
    pub mode: ParamMode,
    pub category: Option<String>,
    baseline: f32,
    original_value: f32,
    round_factor: Option<f32>,
}

impl ParamConfig {
    /// `original_value` is the parameter's value when the config is built;
    /// it doubles as the baseline until [`ZoneParam::capture_baseline`] runs.
    pub fn new(name: &str, target: ParamHandle, original_value: f32, settings: &ParamSettings) -> Self {
        Self {
            name: name.to_string(),
            target,
            is_negative: settings.is_negative,
            multiplier1: settings.multiplier1,
            multiplier2: settings.multiplier2,
            mode: settings.mode,
            category: settings.category.clone(),
            baseline: original_value,
            original_value,
            round_factor: None,
        }
    }

    /// Round written values (e.g. 1000.0 for three decimals).
    pub fn with_rounding(mut self, round_factor: f32) -> Self {
        self.round_factor = Some(round_factor);
        self
    }

    #[inline]
    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    #[inline]
    pub fn original_value(&self) -> f32 {
        self.original_value
    }

    pub fn mapped_value(&self, effect: f32, inputs: &MapInputs) -> f32 {
        (inputs.secondary * self.multiplier1 * effect / 2.0)
            + (inputs.mass * self.multiplier2 * effect / 2.0)
    }

    pub fn target_value(&self, value: f32) -> f32 {
        let in_range = if self.is_negative {
            value < 0.0
        } else {
            value > 0.0
        };
        let value = match self.round_factor {
            Some(factor) => round_to_decimals(value, factor),
            None => value,
        };
        match (self.mode, in_range) {
            (ParamMode::Direct, true) => value,
            (ParamMode::Direct, false) => 0.0,
            (ParamMode::Additive, true) => self.baseline + value,
            (ParamMode::Additive, false) => self.baseline,
        }
    }

    #[inline]
    pub fn rest_value(&self) -> f32 {
        match self.mode {
            ParamMode::Direct => self.original_value,
            ParamMode::Additive => self.baseline,
        }
    }
}

impl ZoneParam for ParamConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(
        &self,
        zone: &'static str,
        effect: f32,
        inputs: &MapInputs,
        out: &mut TargetWriter<'_>,
    ) -> Result<()> {
        let value = self.target_value(self.mapped_value(effect, inputs));
        if !value.is_finite() {
            return Err(GravityError::NonFiniteValue {
                zone,
                param: self.name.clone(),
                value,
            });
        }
        out.write(zone, &self.name, self.target, value);
        Ok(())
    }

    fn reset(&self, zone: &'static str, out: &mut TargetWriter<'_>) {
        out.write(zone, &self.name, self.target, self.rest_value());
    }

    fn capture_baseline(&mut self, out: &TargetWriter<'_>) {
        if self.mode == ParamMode::Additive {
            self.baseline = out.get(self.target);
        }
    }
}

/// Pose morph config with optional softness and calibration scaling.
#[derive(Clone, Debug, PartialEq)]
pub struct MorphConfig {
    pub name: String,
    pub target: ParamHandle,
    pub multiplier: MorphMultiplier,
    original_value: f32,
}

impl MorphConfig {
    pub fn new(name: &str, target: ParamHandle, original_value: f32, multiplier: MorphMultiplier) -> Self {
        Self {
            name: name.to_string(),
            target,
            multiplier,
            original_value,
        }
    }

    /// Morph weight for an effect, clamped to ±[`MORPH_VALUE_LIMIT`].
    pub fn morph_value(&self, effect: f32, inputs: &MapInputs) -> f32 {
        let m = &self.multiplier;
        let softness_factor = m.softness.map_or(1.0, |s| s * inputs.secondary);
        let calibration_factor = m.calibration.map_or(1.0, |c| inputs.mass * c);
        let value = inputs.gain
            * m.base
            * ((softness_factor * effect / 2.0) + (calibration_factor * effect / 2.0));
        value.clamp(-MORPH_VALUE_LIMIT, MORPH_VALUE_LIMIT)
    }
}

impl ZoneParam for MorphConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(
        &self,
        zone: &'static str,
        effect: f32,
        inputs: &MapInputs,
        out: &mut TargetWriter<'_>,
    ) -> Result<()> {
        let value = self.morph_value(effect, inputs);
        if !value.is_finite() {
            return Err(GravityError::NonFiniteValue {
                zone,
                param: self.name.clone(),
                value,
            });
        }
        out.write(zone, &self.name, self.target, value);
        Ok(())
    }

    fn reset(&self, zone: &'static str, out: &mut TargetWriter<'_>) {
        out.write(zone, &self.name, self.target, self.original_value);
    }
}

/// Zone → ordered configs. Built once per mode load and replaced wholesale.
#[derive(Clone, Debug)]
pub struct ConfigSet<Z: Zone, C> {
    zones: FnvHashMap<Z, SmallVec<[C; 8]>>,
}

impl<Z: Zone, C> Default for ConfigSet<Z, C> {
    fn default() -> Self {
        Self {
            zones: FnvHashMap::default(),
        }
    }
}

impl<Z: Zone, C: ZoneParam> ConfigSet<Z, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a config to a zone. Names are unique per zone; duplicates are
    /// logged and dropped.
    pub fn insert(&mut self, zone: Z, config: C) -> bool {
        let configs = self.zones.entry(zone).or_default();
        if configs.iter().any(|c| c.name() == config.name()) {
            log::warn!(
                "[mapper] duplicate parameter '{}' in zone {}, ignoring",
                config.name(),
                zone.key()
            );
            return false;
        }
        configs.push(config);
        true
    }

    pub fn configs(&self, zone: Z) -> &[C] {
        self.zones.get(&zone).map(|c| c.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.zones.values().map(|c| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn apply(&self, zone: Z, effect: f32, inputs: &MapInputs, out: &mut TargetWriter<'_>) -> Result<()> {
        if !effect.is_finite() {
            return Err(GravityError::NonFiniteValue {
                zone: zone.key(),
                param: "<effect>".to_string(),
                value: effect,
            });
        }
        for config in self.configs(zone) {
            config.apply(zone.key(), effect, inputs, out)?;
        }
        Ok(())
    }

    pub fn reset(&self, zone: Z, out: &mut TargetWriter<'_>) {
        for config in self.configs(zone) {
            config.reset(zone.key(), out);
        }
    }

    pub fn reset_all(&self, out: &mut TargetWriter<'_>) {
        for zone in Z::ALL {
            self.reset(*zone, out);
        }
    }

    /// Capture additive baselines; run once per mode load before any apply.
    pub fn set_base_values(&mut self, out: &TargetWriter<'_>) {
        for configs in self.zones.values_mut() {
            for config in configs.iter_mut() {
                config.capture_baseline(out);
            }
        }
    }
}
