//! Mode settings: strongly typed records for every configurable family.
//!
//! The built-in modes are JSON documents bundled with the crate. Parsing is
//! the only place the file format matters; everything downstream works with
//! the typed records.

use crate::direction::SideDirection;
use crate::error::{GravityError, Result};
use crate::mapper::ParamMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// Built-in mode documents bundled as string constants
pub static ANIMATION_OPTIMIZED_JSON: &str = include_str!("../settings/animation_optimized.json");
pub static BALANCED_JSON: &str = include_str!("../settings/balanced.json");
pub static TOUCH_OPTIMIZED_JSON: &str = include_str!("../settings/touch_optimized.json");

/// Settings for one [`crate::ParamConfig`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ParamSettings {
    #[serde(rename = "IsNegative", default)]
    pub is_negative: bool,
    #[serde(rename = "Multiplier1", default)]
    pub multiplier1: f32,
    #[serde(rename = "Multiplier2", default)]
    pub multiplier2: f32,
    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "Type", default)]
    pub mode: ParamMode,
}

/// Pose morph multipliers for one zone.
///
/// - `base`: multiplier for the morph in this zone
/// - `softness`: scales the softness input; `None` ignores softness
/// - `calibration`: scales the size calibration input; `None` ignores it
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct MorphMultiplier {
    pub base: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub softness: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration: Option<f32>,
}

/// Corner values of a static physics parameter over (mass, softness).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct StaticParamSettings {
    #[serde(rename = "minMminS")]
    pub min_mass_min_softness: f32,
    #[serde(rename = "maxMminS")]
    pub max_mass_min_softness: f32,
    #[serde(rename = "minMmaxS")]
    pub min_mass_max_softness: f32,
}

/// Section of the static physics settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StaticSection {
    Main,
    Soft,
    Nipple,
}

impl StaticSection {
    pub const ALL: [StaticSection; 3] = [StaticSection::Main, StaticSection::Soft, StaticSection::Nipple];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "main" => Some(StaticSection::Main),
            "soft" => Some(StaticSection::Soft),
            "nipple" => Some(StaticSection::Nipple),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            StaticSection::Main => "main",
            StaticSection::Soft => "soft",
            StaticSection::Nipple => "nipple",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            StaticSection::Main => "MAIN PHYSICS",
            StaticSection::Soft => "SOFT PHYSICS",
            StaticSection::Nipple => "NIPPLE PHYSICS",
        }
    }
}

fn default_writes_mass() -> bool {
    true
}

/// Everything one mode configures. Zone and group keys stay strings here so a
/// single unknown key can be skipped without rejecting the document.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeSettings {
    #[serde(default)]
    pub gravity_physics: BTreeMap<String, BTreeMap<String, ParamSettings>>,
    #[serde(default)]
    pub gravity_morphs: BTreeMap<String, BTreeMap<String, MorphMultiplier>>,
    #[serde(default)]
    pub relative_pos_morphs: BTreeMap<String, BTreeMap<String, ParamSettings>>,
    #[serde(default)]
    pub static_physics: BTreeMap<String, BTreeMap<String, StaticParamSettings>>,
    /// Whether the clamped mass is written to the host's `mass` parameter.
    #[serde(default = "default_writes_mass")]
    pub writes_mass: bool,
}

impl ModeSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Positional morph groups and the per-side zones they expand into, with the
/// suffix appended to each morph name.
pub const RELATIVE_POS_GROUPS: &[(&str, &[(SideDirection, &str)])] = &[
    ("upForce", &[(SideDirection::UpL, " L"), (SideDirection::UpR, " R")]),
    ("upForceCenter", &[(SideDirection::UpC, "")]),
    ("backForce", &[(SideDirection::BackL, " L"), (SideDirection::BackR, " R")]),
    ("backForceCenter", &[(SideDirection::BackC, "")]),
    ("forwardForce", &[(SideDirection::ForwardL, " L"), (SideDirection::ForwardR, " R")]),
    ("forwardForceCenter", &[(SideDirection::ForwardC, "")]),
    ("leftForceL", &[(SideDirection::LeftL, "")]),
    ("leftForceR", &[(SideDirection::LeftR, "")]),
    ("rightForceL", &[(SideDirection::RightL, "")]),
    ("rightForceR", &[(SideDirection::RightR, "")]),
];

pub fn relative_pos_group(name: &str) -> Option<&'static [(SideDirection, &'static str)]> {
    RELATIVE_POS_GROUPS
        .iter()
        .find(|(group, _)| *group == name)
        .map(|(_, zones)| *zones)
}

/// Named settings profiles shipped with the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    AnimationOptimized,
    Balanced,
    TouchOptimized,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::AnimationOptimized, Mode::Balanced, Mode::TouchOptimized];

    pub fn name(self) -> &'static str {
        match self {
            Mode::AnimationOptimized => "Animation optimized",
            Mode::Balanced => "Balanced",
            Mode::TouchOptimized => "Touch optimized",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| GravityError::UnknownMode(name.to_string()))
    }

    pub fn settings(self) -> Result<ModeSettings> {
        let json = match self {
            Mode::AnimationOptimized => ANIMATION_OPTIMIZED_JSON,
            Mode::Balanced => BALANCED_JSON,
            Mode::TouchOptimized => TOUCH_OPTIMIZED_JSON,
        };
        ModeSettings::from_json(json)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
