//! Morphs driven by how far the soft region has moved from its rest pose,
//! per side.

use crate::constants::MORPH_ROUND_FACTOR;
use crate::direction::{SideDirection, Zone};
use crate::effect::{depth_diff_effect, horizontal_angle_effect, vertical_angle_effect};
use crate::error::Result;
use crate::host::{ParameterStore, PositionDiffs, TargetWriter};
use crate::mapper::{ConfigSet, MapInputs, ParamConfig, ParamMode};
use crate::orchestrator::RelativePosMultipliers;
use crate::settings::{relative_pos_group, ParamSettings};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct RelativePosMorphHandler {
    configs: ConfigSet<SideDirection, ParamConfig>,
    pub multipliers: RelativePosMultipliers,
}

impl RelativePosMorphHandler {
    pub fn load(
        section: &BTreeMap<String, BTreeMap<String, ParamSettings>>,
        multipliers: RelativePosMultipliers,
        store: &dyn ParameterStore,
    ) -> Self {
        let mut configs = ConfigSet::new();
        for (group, morphs) in section {
            let Some(zones) = relative_pos_group(group) else {
                log::warn!("[settings] relativePosMorphs: unknown group '{group}', skipping");
                continue;
            };
            for (morph, settings) in morphs {
                let settings = ParamSettings {
                    mode: ParamMode::Direct,
                    ..settings.clone()
                };
                for (zone, suffix) in zones {
                    let name = format!("{morph}{suffix}");
                    let Some(handle) = store.resolve(&name) else {
                        log::warn!(
                            "[settings] relativePosMorphs: morph '{name}' in zone {} not found, skipping",
                            zone.key()
                        );
                        continue;
                    };
                    let config = ParamConfig::new(&name, handle, store.get(handle), &settings)
                        .with_rounding(MORPH_ROUND_FACTOR);
                    configs.insert(*zone, config);
                }
            }
        }
        Self {
            configs,
            multipliers,
        }
    }

    pub fn configs(&self) -> &ConfigSet<SideDirection, ParamConfig> {
        &self.configs
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn reset_all(&self, out: &mut TargetWriter<'_>) {
        self.configs.reset_all(out);
    }

    /// `mass` is the clamped estimate; `mobility` the normalized softness.
    pub fn update(
        &self,
        diffs: &PositionDiffs,
        mass: f32,
        mobility: f32,
        out: &mut TargetWriter<'_>,
    ) -> Result<()> {
        let inputs = MapInputs::new(mass, mobility);
        self.update_vertical(diffs, &inputs, out)?;
        self.update_depth(diffs, &inputs, out)?;
        self.update_horizontal(diffs, &inputs, out)?;
        Ok(())
    }

    fn update_vertical(&self, diffs: &PositionDiffs, inputs: &MapInputs, out: &mut TargetWriter<'_>) -> Result<()> {
        let center = (diffs.angle_y_left + diffs.angle_y_right) / 2.0;
        let sides = [
            (SideDirection::UpL, diffs.angle_y_left),
            (SideDirection::UpR, diffs.angle_y_right),
            (SideDirection::UpC, center),
        ];
        for (zone, angle) in sides {
            if angle >= 0.0 {
                let effect = vertical_angle_effect(angle, self.multipliers.up);
                self.configs.apply(zone, effect, inputs, out)?;
            } else {
                self.configs.reset(zone, out);
            }
        }
        Ok(())
    }

    fn update_depth(&self, diffs: &PositionDiffs, inputs: &MapInputs, out: &mut TargetWriter<'_>) -> Result<()> {
        let center = (diffs.depth_diff_left + diffs.depth_diff_right) / 2.0;
        let sides = [
            (SideDirection::ForwardL, SideDirection::BackL, diffs.depth_diff_left),
            (SideDirection::ForwardR, SideDirection::BackR, diffs.depth_diff_right),
            (SideDirection::ForwardC, SideDirection::BackC, center),
        ];
        for (forward, back, distance) in sides {
            if distance <= 0.0 {
                self.configs.reset(back, out);
                let effect = depth_diff_effect(distance, self.multipliers.forward);
                self.configs.apply(forward, effect, inputs, out)?;
            } else {
                self.configs.reset(forward, out);
                let effect = depth_diff_effect(distance, self.multipliers.back);
                self.configs.apply(back, effect, inputs, out)?;
            }
        }
        Ok(())
    }

    fn update_horizontal(&self, diffs: &PositionDiffs, inputs: &MapInputs, out: &mut TargetWriter<'_>) -> Result<()> {
        let sides = [
            (SideDirection::RightL, SideDirection::LeftL, diffs.angle_x_left),
            (SideDirection::RightR, SideDirection::LeftR, diffs.angle_x_right),
        ];
        for (right, left, angle) in sides {
            let effect = horizontal_angle_effect(angle, self.multipliers.left_right);
            if angle >= 0.0 {
                self.configs.reset(left, out);
                self.configs.apply(right, effect, inputs, out)?;
            } else {
                self.configs.reset(right, out);
                self.configs.apply(left, effect, inputs, out)?;
            }
        }
        Ok(())
    }
}
