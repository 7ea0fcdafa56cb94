//! Baseline soft physics that depend on mass and softness but not on pose.
//!
//! Values are bilinear over (normalized mass, normalized softness) from three
//! corner settings. Refreshed by the mass refinement sequence and whenever an
//! intensity control changes.

use crate::constants::{ERECTION_FIRMNESS, MASS_PARAM_NAME};
use crate::error::{GravityError, Result};
use crate::host::{ParamHandle, ParameterStore, TargetWriter};
use crate::mass::normalized_mass;
use crate::settings::{StaticParamSettings, StaticSection};
use std::collections::BTreeMap;
use std::fmt::Write;

#[derive(Clone, Debug, PartialEq)]
pub struct StaticParamConfig {
    pub name: String,
    pub target: ParamHandle,
    pub section: StaticSection,
    pub settings: StaticParamSettings,
    original_value: f32,
}

impl StaticParamConfig {
    pub fn new(
        name: &str,
        target: ParamHandle,
        section: StaticSection,
        original_value: f32,
        settings: StaticParamSettings,
    ) -> Self {
        Self {
            name: name.to_string(),
            target,
            section,
            settings,
            original_value,
        }
    }

    #[inline]
    pub fn original_value(&self) -> f32 {
        self.original_value
    }

    /// `mass` and `softness` normalized to \[0, 1\]; `erection` in \[0, 1\].
    pub fn value(&self, mass: f32, softness: f32, erection: f32) -> f32 {
        let s = &self.settings;
        let value = s.min_mass_min_softness
            + (s.max_mass_min_softness - s.min_mass_min_softness) * mass
            + (s.min_mass_max_softness - s.min_mass_min_softness) * softness;
        match self.section {
            StaticSection::Nipple => value * (1.0 + ERECTION_FIRMNESS * erection),
            _ => value,
        }
    }

    fn write(&self, value: f32, out: &mut TargetWriter<'_>) -> Result<()> {
        if !value.is_finite() {
            return Err(GravityError::NonFiniteValue {
                zone: self.section.key(),
                param: self.name.clone(),
                value,
            });
        }
        out.write(self.section.key(), &self.name, self.target, value);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct StaticPhysicsHandler {
    configs: Vec<StaticParamConfig>,
    mass_target: Option<ParamHandle>,
}

impl StaticPhysicsHandler {
    /// `writes_mass` binds the host's mass parameter; touch-oriented modes
    /// leave it alone.
    pub fn load(
        section: &BTreeMap<String, BTreeMap<String, StaticParamSettings>>,
        writes_mass: bool,
        store: &dyn ParameterStore,
    ) -> Self {
        let mut configs: Vec<StaticParamConfig> = Vec::new();
        for (key, params) in section {
            let Some(section) = StaticSection::from_key(key) else {
                log::warn!("[settings] staticPhysics: unknown section '{key}', skipping");
                continue;
            };
            for (name, settings) in params {
                let Some(handle) = store.resolve(name) else {
                    log::warn!("[settings] staticPhysics: parameter '{name}' not found, skipping");
                    continue;
                };
                if configs.iter().any(|c| c.target == handle) {
                    log::warn!("[settings] staticPhysics: duplicate parameter '{name}', ignoring");
                    continue;
                }
                configs.push(StaticParamConfig::new(name, handle, section, store.get(handle), *settings));
            }
        }
        // keep section order stable regardless of map ordering
        configs.sort_by_key(|c| c.section);

        let mass_target = if writes_mass {
            let handle = store.resolve(MASS_PARAM_NAME);
            if handle.is_none() {
                log::warn!("[settings] staticPhysics: '{MASS_PARAM_NAME}' parameter not found, mass is not written");
            }
            handle
        } else {
            None
        };
        Self {
            configs,
            mass_target,
        }
    }

    pub fn configs(&self) -> &[StaticParamConfig] {
        &self.configs
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    #[inline]
    pub fn writes_mass(&self) -> bool {
        self.mass_target.is_some()
    }

    /// Convergence pass: mass and the "main" section only.
    pub fn update_main(&self, mass: f32, softness: f32, out: &mut TargetWriter<'_>) -> Result<()> {
        self.write_mass(mass, out);
        let m = normalized_mass(mass);
        for config in self.configs.iter().filter(|c| c.section == StaticSection::Main) {
            config.write(config.value(m, softness, 0.0), out)?;
        }
        Ok(())
    }

    pub fn full_update(&self, mass: f32, softness: f32, erection: f32, out: &mut TargetWriter<'_>) -> Result<()> {
        self.write_mass(mass, out);
        let m = normalized_mass(mass);
        for config in &self.configs {
            config.write(config.value(m, softness, erection), out)?;
        }
        Ok(())
    }

    /// Restore every parameter to the value it had when the mode loaded.
    pub fn restore(&self, out: &mut TargetWriter<'_>) {
        for config in &self.configs {
            out.write(config.section.key(), &config.name, config.target, config.original_value);
        }
    }

    /// One titled block per section listing current values.
    pub fn status(&self, store: &dyn ParameterStore) -> String {
        let mut text = String::new();
        for section in StaticSection::ALL {
            let mut configs = self.configs.iter().filter(|c| c.section == section).peekable();
            if configs.peek().is_none() {
                continue;
            }
            let _ = writeln!(text, "{}", section.title());
            for config in configs {
                let _ = writeln!(text, "{}: {:.3}", config.name, store.get(config.target));
            }
            text.push('\n');
        }
        text
    }

    fn write_mass(&self, mass: f32, out: &mut TargetWriter<'_>) {
        if let Some(handle) = self.mass_target {
            out.write(StaticSection::Main.key(), MASS_PARAM_NAME, handle, mass);
        }
    }
}
