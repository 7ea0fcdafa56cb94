mod sim;

use anyhow::Context;
use gravity_core::{ControllerParams, Mode, UpdateOrchestrator, ValueObserver};
use sim::SimulatedBody;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

const FRAME_RATE: u32 = 60;
const DEFAULT_SECONDS: f32 = 10.0;
const SEED: u64 = 0x5EED_0F_B0D1;

/// Counts writes and forwards debug text to the log.
struct LogObserver {
    writes: Rc<Cell<u64>>,
}

impl ValueObserver for LogObserver {
    fn value_changed(&mut self, zone: &'static str, param: &str, value: f32) {
        self.writes.set(self.writes.get() + 1);
        log::trace!("[observer] {zone} {param} = {value:.4}");
    }

    fn debug_info(&mut self, text: &str) {
        log::trace!("[observer] {}", text.replace('\n', ", "));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // usage: gravity-native [MODE] [SECONDS]
    let mut args = std::env::args().skip(1);
    let mode = match args.next() {
        Some(name) => Mode::from_name(&name)?,
        None => Mode::Balanced,
    };
    let seconds = match args.next() {
        Some(s) => s
            .parse::<f32>()
            .with_context(|| format!("invalid duration '{s}'"))?,
        None => DEFAULT_SECONDS,
    };

    let settings = mode.settings().context("loading built-in mode")?;
    let mut body = SimulatedBody::new(SEED);
    body.register_params(&settings);

    let writes = Rc::new(Cell::new(0));
    let observer: Box<dyn ValueObserver> = Box::new(LogObserver {
        writes: Rc::clone(&writes),
    });
    let mut controller = UpdateOrchestrator::new(ControllerParams::default(), Some(observer));
    controller
        .load_settings(mode.name(), &settings, &mut body)
        .with_context(|| format!("loading mode '{mode}'"))?;

    let dt = Duration::from_secs_f32(1.0 / FRAME_RATE as f32);
    let frames = (seconds * FRAME_RATE as f32).round() as u32;
    log::info!("[host] running '{mode}' for {frames} frames");

    for frame in 0..frames {
        body.step(dt.as_secs_f32());
        controller.tick(dt, &mut body);
        if !controller.is_enabled() {
            anyhow::bail!("controller disabled itself at t={:.2}s", body.time());
        }
        if frame % FRAME_RATE == 0 {
            let sample = controller.sample();
            let estimate = controller.estimate();
            log::info!(
                "[host] t={:5.2}s roll={:+.2} pitch={:+.2} mass={:.3} refresh={:?}",
                body.time(),
                sample.roll,
                sample.pitch,
                estimate.clamped_mass,
                controller.refresh_status()
            );
        }
    }

    let status = controller.status();
    if !status.is_empty() {
        log::info!("[host] {}", status.trim_end());
    }
    for line in controller.physics_status(&mut body).lines().filter(|l| !l.is_empty()) {
        log::info!("[host] {line}");
    }
    log::info!("[host] {} parameter writes", writes.get());

    controller.teardown(&mut body);
    log::info!("[host] restored {} parameters", body.store().len());
    Ok(())
}
