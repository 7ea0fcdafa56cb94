//! Per-frame update loop.
//!
//! [`UpdateOrchestrator`] owns every config set, the latest orientation
//! sample and mass estimate. The host calls [`UpdateOrchestrator::tick`]
//! once per frame; a failing tick disables continuous updates until the host
//! re-enables them.

use crate::constants::*;
use crate::error::Result;
use crate::handlers::Handlers;
use crate::host::{BodyHost, TargetWriter, ValueObserver};
use crate::listener::{ScaleListener, ShapeListener};
use crate::mass::{estimate_volume, MassClamp, MassEstimate, MassEstimator};
use crate::orientation::OrientationSample;
use crate::refresh::{MassRefresh, RefreshStatus, RefreshStep};
use crate::settings::{Mode, ModeSettings};
use anyhow::Context;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisMultipliers {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub y_extra: Option<f32>,
    pub y_opposite_extra: Option<f32>,
}

impl Default for AxisMultipliers {
    fn default() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
            y_extra: None,
            y_opposite_extra: None,
        }
    }
}

/// Multipliers applied to raw positional differences before interpolation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelativePosMultipliers {
    pub up: f32,
    pub back: f32,
    pub forward: f32,
    pub left_right: f32,
}

impl Default for RelativePosMultipliers {
    fn default() -> Self {
        Self {
            up: 1.0,
            back: 1.0,
            forward: 1.0,
            left_right: 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ControllerParams {
    pub physics: AxisMultipliers,
    pub morphs: AxisMultipliers,
    pub relative_pos: RelativePosMultipliers,
    pub refresh_passes: usize,
    pub refresh_pass_delay: Duration,
}

impl Default for ControllerParams {
    fn default() -> Self {
        Self {
            physics: AxisMultipliers::default(),
            morphs: AxisMultipliers::default(),
            relative_pos: RelativePosMultipliers::default(),
            refresh_passes: REFRESH_PASSES,
            refresh_pass_delay: REFRESH_PASS_DELAY,
        }
    }
}

/// User-facing intensity inputs, in their display units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntensityControls {
    softness: f32,
    gravity: f32,
    erection: f32,
    linked: bool,
}

impl Default for IntensityControls {
    fn default() -> Self {
        Self {
            softness: SOFTNESS_DEFAULT,
            gravity: GRAVITY_DEFAULT,
            erection: ERECTION_MIN,
            linked: true,
        }
    }
}

impl IntensityControls {
    #[inline]
    pub fn softness(&self) -> f32 {
        self.softness
    }

    #[inline]
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    #[inline]
    pub fn erection(&self) -> f32 {
        self.erection
    }

    #[inline]
    pub fn linked(&self) -> bool {
        self.linked
    }

    pub fn softness_amount(&self) -> f32 {
        self.softness / SOFTNESS_MAX
    }

    pub fn gravity_amount(&self) -> f32 {
        self.gravity / GRAVITY_MAX
    }

    /// Returns true if anything changed. Mirrors into gravity while linked.
    /// Non-finite input is ignored.
    pub fn set_softness(&mut self, value: f32) -> bool {
        if !value.is_finite() {
            log::warn!("[controller] ignoring non-finite softness {value}");
            return false;
        }
        let before = *self;
        self.softness = value.clamp(SOFTNESS_MIN, SOFTNESS_MAX);
        if self.linked {
            self.gravity = self.softness.clamp(GRAVITY_MIN, GRAVITY_MAX);
        }
        *self != before
    }

    /// Returns true if anything changed. Mirrors into softness while linked.
    pub fn set_gravity(&mut self, value: f32) -> bool {
        if !value.is_finite() {
            log::warn!("[controller] ignoring non-finite gravity {value}");
            return false;
        }
        let before = *self;
        self.gravity = value.clamp(GRAVITY_MIN, GRAVITY_MAX);
        if self.linked {
            self.softness = self.gravity.clamp(SOFTNESS_MIN, SOFTNESS_MAX);
        }
        *self != before
    }

    pub fn set_erection(&mut self, value: f32) -> bool {
        if !value.is_finite() {
            log::warn!("[controller] ignoring non-finite erection {value}");
            return false;
        }
        let before = self.erection;
        self.erection = value.clamp(ERECTION_MIN, ERECTION_MAX);
        self.erection != before
    }

    /// Linking snaps gravity to the current softness.
    pub fn set_linked(&mut self, linked: bool) -> bool {
        let before = *self;
        self.linked = linked;
        if linked {
            self.gravity = self.softness.clamp(GRAVITY_MIN, GRAVITY_MAX);
        }
        *self != before
    }
}

pub struct UpdateOrchestrator {
    pub params: ControllerParams,
    controls: IntensityControls,
    controls_changed: bool,
    estimator: MassEstimator,
    estimate: MassEstimate,
    sample: OrientationSample,
    handlers: Handlers,
    mode_name: Option<String>,
    refresh: MassRefresh,
    scale_listener: ScaleListener,
    shape_listener: ShapeListener,
    observer: Option<Box<dyn ValueObserver>>,
    enabled: bool,
    status: String,
}

impl UpdateOrchestrator {
    /// `observer` is the optional tuning capability; pass `None` when the
    /// host has no inspection UI.
    pub fn new(params: ControllerParams, observer: Option<Box<dyn ValueObserver>>) -> Self {
        let mut refresh = MassRefresh::new(params.refresh_passes, params.refresh_pass_delay);
        refresh.start();
        Self {
            params,
            controls: IntensityControls::default(),
            controls_changed: false,
            estimator: MassEstimator,
            estimate: MassEstimate::default(),
            sample: OrientationSample::default(),
            handlers: Handlers::default(),
            mode_name: None,
            refresh,
            scale_listener: ScaleListener::default(),
            shape_listener: ShapeListener::default(),
            observer,
            enabled: true,
            status: String::new(),
        }
    }

    pub fn load_mode(&mut self, mode: Mode, host: &mut dyn BodyHost) -> Result<()> {
        let settings = mode.settings()?;
        self.load_settings(mode.name(), &settings, host)
    }

    /// Replace every config set. Any refinement in flight is superseded and
    /// a fresh one starts against the new sets.
    ///
    /// On error the previous mode is already unloaded: the controller is left
    /// with no mode and every parameter it touched restored.
    pub fn load_settings(&mut self, name: &str, settings: &ModeSettings, host: &mut dyn BodyHost) -> Result<()> {
        self.refresh.cancel();
        {
            let mut out = TargetWriter::new(host.params(), self.observer.as_deref_mut());
            self.handlers.reset_all(&mut out);
            self.handlers.static_physics.restore(&mut out);
        }
        self.handlers = Handlers::default();
        self.mode_name = None;

        self.estimate = self.estimator.estimate(host.bounds_size(), host.atom_scale());
        let mut handlers = Handlers::load(settings, &self.params, host.params());

        let mut out = TargetWriter::new(host.params(), self.observer.as_deref_mut());
        let applied = handlers.static_physics.full_update(
            self.estimate.clamped_mass,
            self.controls.softness_amount(),
            self.controls.erection(),
            &mut out,
        );
        if let Err(err) = applied {
            log::error!("[settings] failed to load mode '{name}': {err}");
            handlers.static_physics.restore(&mut out);
            self.refresh.start();
            return Err(err);
        }
        // after the static update so additive offsets sit on top of it
        handlers.set_base_values(&out);
        self.handlers = handlers;

        log::info!(
            "[settings] loaded mode '{name}': {} gravity physics, {} gravity morph, {} positional morph, {} static params",
            self.handlers.gravity_physics.len(),
            self.handlers.gravity_morphs.len(),
            self.handlers.relative_pos.len(),
            self.handlers.static_physics.len(),
        );
        self.mode_name = Some(name.to_string());
        self.controls_changed = false;
        self.refresh.start();
        Ok(())
    }

    pub fn tick(&mut self, dt: Duration, host: &mut dyn BodyHost) {
        if !self.enabled {
            return;
        }
        if let Err(err) = self.update(dt, host) {
            log::error!("[controller] update failed, disabling continuous updates: {err:#}");
            self.enabled = false;
            self.refresh.cancel();
            let mut out = TargetWriter::new(host.params(), self.observer.as_deref_mut());
            self.handlers.reset_all(&mut out);
        }
    }

    fn update(&mut self, dt: Duration, host: &mut dyn BodyHost) -> anyhow::Result<()> {
        let sample = OrientationSample::from_quat(host.orientation()).context("sampling orientation")?;
        self.sample = sample;

        let scale_changed = self.scale_listener.observe(host.atom_scale());
        let shape_changed = self.shape_listener.observe(host.shape_revision());
        let step = if self.refresh.in_progress() {
            self.refresh.tick(dt, shape_changed)
        } else {
            if scale_changed || shape_changed {
                log::debug!("[refresh] scale or shape changed, refining mass");
                self.refresh.start();
            }
            None
        };

        let bounds = host.bounds_size();
        let atom_scale = host.atom_scale();
        let diffs = host.position_diffs();
        let wants_debug = self.observer.is_some();
        let mut out = TargetWriter::new(host.params(), self.observer.as_deref_mut());

        match step {
            Some(RefreshStep::Converge { pass }) => {
                self.estimate = self.estimator.estimate(bounds, atom_scale);
                log::debug!("[refresh] pass {pass}: mass {:.3}", self.estimate.mass);
                self.handlers
                    .static_physics
                    .update_main(self.estimate.clamped_mass, self.controls.softness_amount(), &mut out)
                    .context("updating main physics")?;
            }
            Some(RefreshStep::Finalize) => {
                self.estimate = self.estimator.estimate(bounds, atom_scale);
                self.status = self.estimate.status();
                if self.estimate.clamping() != MassClamp::InRange {
                    log::info!("[mass] {}", self.status.trim_end());
                }
                self.controls_changed = true;
            }
            None => {}
        }

        if self.controls_changed {
            self.controls_changed = false;
            self.handlers
                .static_physics
                .full_update(
                    self.estimate.clamped_mass,
                    self.controls.softness_amount(),
                    self.controls.erection(),
                    &mut out,
                )
                .context("updating static physics")?;
        }

        self.handlers
            .apply_pose(&sample, &self.estimate, &self.controls, &diffs, &mut out)
            .context("applying gravity effects")?;

        if wants_debug {
            let current_volume = estimate_volume(bounds, atom_scale);
            out.debug_info(&debug_text(&sample, self.estimate.raw_volume, current_volume));
        }
        Ok(())
    }

    /// Disabling resets every zone; enabling starts a fresh refinement.
    pub fn set_enabled(&mut self, enabled: bool, host: &mut dyn BodyHost) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            log::info!("[controller] enabled");
            self.refresh.start();
        } else {
            log::info!("[controller] disabled");
            self.refresh.cancel();
            let mut out = TargetWriter::new(host.params(), self.observer.as_deref_mut());
            self.handlers.reset_all(&mut out);
        }
    }

    /// Restore everything the controller wrote and drop the config sets.
    pub fn teardown(&mut self, host: &mut dyn BodyHost) {
        self.refresh.cancel();
        let mut out = TargetWriter::new(host.params(), self.observer.as_deref_mut());
        self.handlers.reset_all(&mut out);
        self.handlers.static_physics.restore(&mut out);
        self.handlers = Handlers::default();
        self.mode_name = None;
        self.enabled = false;
    }

    pub fn set_softness(&mut self, value: f32) {
        self.controls_changed |= self.controls.set_softness(value);
    }

    pub fn set_gravity(&mut self, value: f32) {
        self.controls_changed |= self.controls.set_gravity(value);
    }

    pub fn set_erection(&mut self, value: f32) {
        self.controls_changed |= self.controls.set_erection(value);
    }

    pub fn set_linked(&mut self, linked: bool) {
        self.controls_changed |= self.controls.set_linked(linked);
    }

    #[inline]
    pub fn controls(&self) -> &IntensityControls {
        &self.controls
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn estimate(&self) -> &MassEstimate {
        &self.estimate
    }

    #[inline]
    pub fn sample(&self) -> OrientationSample {
        self.sample
    }

    #[inline]
    pub fn refresh_status(&self) -> RefreshStatus {
        self.refresh.status()
    }

    pub fn mode_name(&self) -> Option<&str> {
        self.mode_name.as_deref()
    }

    pub fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    /// Mass diagnostics from the last finalized refinement; empty when in range.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn physics_status(&self, host: &mut dyn BodyHost) -> String {
        self.handlers.static_physics.status(host.params())
    }
}

pub fn debug_text(sample: &OrientationSample, estimated_volume: f32, current_volume: f32) -> String {
    format!(
        "roll: {:.2}\npitch: {:.2}\nestimated volume: {:.0} cm3\ncurrent volume: {:.0} cm3",
        sample.roll, sample.pitch, estimated_volume, current_volume
    )
}
