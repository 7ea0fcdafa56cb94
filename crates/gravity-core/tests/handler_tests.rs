mod common;

use common::{approx, Recorder};
use gravity_core::*;

const PHYSICS_JSON: &str = r#"{
    "gravityPhysics": {
        "LEFT": { "leftSpring": { "Multiplier1": 2.0, "Multiplier2": 4.0 } },
        "RIGHT": { "rightSpring": { "Multiplier1": 2.0, "Multiplier2": 4.0 } },
        "FORWARD": { "forwardLimit": { "Multiplier1": 1.0, "Multiplier2": 1.0 } },
        "BACK": { "backLimit": { "Multiplier1": 1.0, "Multiplier2": 1.0 } },
        "DOWN": { "downOffset": { "Multiplier1": 1.0, "Multiplier2": 1.0, "Type": "additive" } },
        "UP": { "upOffset": { "Multiplier1": 1.0, "Multiplier2": 1.0, "Type": "additive" } },
        "SIDEWAYS": { "ignored": { "Multiplier1": 1.0 } }
    }
}"#;

fn physics_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store.insert("leftSpring", 0.0);
    store.insert("rightSpring", 3.0);
    store.insert("forwardLimit", 0.0);
    store.insert("backLimit", 0.5);
    store.insert("downOffset", 10.0);
    store.insert("upOffset", 20.0);
    store
}

fn physics_handler(store: &mut InMemoryStore) -> GravityPhysicsHandler {
    let settings = ModeSettings::from_json(PHYSICS_JSON).unwrap();
    let mut handler = GravityPhysicsHandler::load(&settings.gravity_physics, &AxisMultipliers::default(), store);
    let out = TargetWriter::new(store, None);
    handler.set_base_values(&out);
    handler
}

#[test]
fn unknown_zones_and_parameters_are_skipped() {
    let mut store = physics_store();
    store.insert("ignored", 1.0);
    let handler = physics_handler(&mut store);
    assert_eq!(handler.len(), 6);

    let mut sparse = InMemoryStore::new();
    sparse.insert("leftSpring", 0.0);
    let handler = physics_handler(&mut sparse);
    assert_eq!(handler.len(), 1);
    assert_eq!(handler.configs().configs(Direction::Left).len(), 1);
}

#[test]
fn roll_half_writes_left_and_resets_right() {
    let mut store = physics_store();
    let handler = physics_handler(&mut store);
    let right = store.resolve("rightSpring").unwrap();
    store.set(right, 9.0);

    let sample = OrientationSample { roll: 0.5, pitch: 0.5 };
    let mut out = TargetWriter::new(&mut store, None);
    handler.update_with(&sample, &MapInputs::new(1.0, 1.0), &mut out).unwrap();

    // roll effect 0.25: 1 * 2 * 0.25 / 2 + 1 * 4 * 0.25 / 2
    assert!(approx(store.value("leftSpring").unwrap(), 0.75, 1e-6));
    assert_eq!(store.value("rightSpring"), Some(3.0));
}

#[test]
fn exactly_one_roll_zone_is_active() {
    let mut store = physics_store();
    let handler = physics_handler(&mut store);
    for i in -10..=10 {
        let roll = i as f32 / 10.0;
        let sample = OrientationSample { roll, pitch: 0.2 };
        let mut out = TargetWriter::new(&mut store, None);
        handler.update_with(&sample, &MapInputs::new(1.0, 1.0), &mut out).unwrap();
        let expected = 3.0 * roll.abs() / 2.0;
        if roll >= 0.0 {
            assert!(approx(store.value("leftSpring").unwrap(), expected, 1e-5), "roll {roll}");
            assert_eq!(store.value("rightSpring"), Some(3.0), "roll {roll}");
        } else {
            assert_eq!(store.value("leftSpring"), Some(0.0), "roll {roll}");
            assert!(approx(store.value("rightSpring").unwrap(), expected, 1e-5), "roll {roll}");
        }
    }
}

#[test]
fn pitch_routes_depth_and_vertical_zones() {
    let mut store = physics_store();
    let handler = physics_handler(&mut store);
    let inputs = MapInputs::new(1.0, 1.0);

    // leaning forward, upright: FORWARD and DOWN active
    let mut out = TargetWriter::new(&mut store, None);
    handler
        .update_with(&OrientationSample { roll: 0.0, pitch: 0.5 }, &inputs, &mut out)
        .unwrap();
    // depth effect 0.5 * 1 / 2 = 0.25, up/down effect 0.5 * 1 / 2 = 0.25
    assert!(approx(store.value("forwardLimit").unwrap(), 0.25, 1e-6));
    assert_eq!(store.value("backLimit"), Some(0.5));
    assert!(approx(store.value("downOffset").unwrap(), 10.25, 1e-5));
    assert_eq!(store.value("upOffset"), Some(20.0));

    // leaning back past horizontal: BACK and UP active
    let mut out = TargetWriter::new(&mut store, None);
    handler
        .update_with(&OrientationSample { roll: 0.0, pitch: -1.5 }, &inputs, &mut out)
        .unwrap();
    assert_eq!(store.value("forwardLimit"), Some(0.0));
    assert!(approx(store.value("backLimit").unwrap(), 0.25, 1e-6));
    assert_eq!(store.value("downOffset"), Some(10.0));
    assert!(approx(store.value("upOffset").unwrap(), 20.25, 1e-5));
}

#[test]
fn disabled_adjustment_resets_all_zones() {
    let mut store = physics_store();
    let handler = physics_handler(&mut store);
    let mut out = TargetWriter::new(&mut store, None);
    handler
        .update_with(&OrientationSample { roll: 0.6, pitch: 0.3 }, &MapInputs::new(1.0, 1.0), &mut out)
        .unwrap();
    assert!(store.value("leftSpring").unwrap() > 0.0);

    let mut recorder = Recorder {
        disabled: true,
        ..Recorder::default()
    };
    let observer: &mut (dyn ValueObserver + 'static) = &mut recorder;
    let mut out = TargetWriter::new(&mut store, Some(observer));
    handler
        .update_with(&OrientationSample { roll: 0.6, pitch: 0.3 }, &MapInputs::new(1.0, 1.0), &mut out)
        .unwrap();
    assert_eq!(store.value("leftSpring"), Some(0.0));
    assert_eq!(store.value("forwardLimit"), Some(0.0));
    assert_eq!(store.value("downOffset"), Some(10.0));
    assert_eq!(recorder.count(), 6);
}

const MORPH_JSON: &str = r#"{
    "gravityMorphs": {
        "LEFT": { "Roll Left": { "base": 1.0, "softness": 1.0, "calibration": 1.0 } },
        "RIGHT": { "Roll Right": { "base": 1.0, "softness": 1.0, "calibration": 1.0 } },
        "DOWN": { "Sag": { "base": 1.0, "softness": 1.0, "calibration": 1.0 } },
        "UP": { "Lift": { "base": 1.0 } }
    }
}"#;

// legacy_scale(LEGACY_UNIT_MASS) == 1
const LEGACY_UNIT_MASS: f32 = 1.03 / 1.21;

#[test]
fn sag_curve_and_roll_gain() {
    assert!(approx(sag_curve(0.5), 1.0, 1e-5));
    assert!(approx(roll_gain(1.0), 1.0, 1e-6));
    assert!(approx(roll_gain(1.5), 1.25, 1e-6));
    assert!(approx(roll_gain(0.4), 0.4, 1e-6));
}

#[test]
fn morphs_follow_pose_with_sag_gain() {
    let settings = ModeSettings::from_json(MORPH_JSON).unwrap();
    let mut store = InMemoryStore::new();
    for name in ["Roll Left", "Roll Right", "Sag", "Lift"] {
        store.insert(name, 0.0);
    }
    let mut handler = GravityMorphHandler::load(&settings.gravity_morphs, &AxisMultipliers::default(), &store);
    assert_eq!(handler.len(), 4);
    assert!(approx(handler.sag(), 1.0, 1e-5));

    let sample = OrientationSample { roll: 0.5, pitch: 0.5 };
    let mut out = TargetWriter::new(&mut store, None);
    handler.update(&sample, LEGACY_UNIT_MASS, 1.0, &mut out).unwrap();
    // roll effect 0.25, both terms weighted 1
    assert!(approx(store.value("Roll Left").unwrap(), 0.25, 1e-4));
    assert_eq!(store.value("Roll Right"), Some(0.0));
    // up/down effect 0.5 * 0.5 * 1 / 2 = 0.125
    assert!(approx(store.value("Sag").unwrap(), 0.125, 1e-4));

    // full gravity: pitch zones take the whole sag, roll zones half the excess
    handler.set_gravity(1.0);
    let sag = handler.sag();
    let mut out = TargetWriter::new(&mut store, None);
    handler.update(&sample, LEGACY_UNIT_MASS, 1.0, &mut out).unwrap();
    assert!(approx(store.value("Sag").unwrap(), 0.125 * sag, 1e-4));
    assert!(approx(store.value("Roll Left").unwrap(), 0.25 * roll_gain(sag), 1e-4));
}

#[test]
fn morph_without_scales_ignores_inputs() {
    let settings = ModeSettings::from_json(MORPH_JSON).unwrap();
    let mut store = InMemoryStore::new();
    store.insert("Lift", 0.3);
    let handler = GravityMorphHandler::load(&settings.gravity_morphs, &AxisMultipliers::default(), &store);
    let sample = OrientationSample { roll: 0.0, pitch: 2.0 };
    let mut out = TargetWriter::new(&mut store, None);
    handler.update(&sample, 2.0, 0.0, &mut out).unwrap();
    // up/down effect 1 * 1 / 2 with both factors 1
    assert!(approx(store.value("Lift").unwrap(), 0.5, 1e-5));

    let mut out = TargetWriter::new(&mut store, None);
    handler.reset_all(&mut out);
    assert_eq!(store.value("Lift"), Some(0.3));
}

const RELATIVE_JSON: &str = r#"{
    "relativePosMorphs": {
        "upForce": { "Lift": { "Multiplier1": 1.0, "Multiplier2": 1.0 } },
        "upForceCenter": { "Lift C": { "Multiplier1": 1.0, "Multiplier2": 1.0 } },
        "forwardForce": { "Pull": { "Multiplier1": 1.0, "Multiplier2": 1.0 } },
        "backForce": { "Push": { "Multiplier1": 1.0, "Multiplier2": 1.0, "Type": "additive" } },
        "rightForceL": { "Shift Right L": { "Multiplier1": 1.0, "Multiplier2": 1.0 } },
        "leftForceL": { "Shift Left L": { "Multiplier1": 1.0, "Multiplier2": 1.0 } },
        "spinForce": { "Spin": { "Multiplier1": 1.0 } }
    }
}"#;

fn relative_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    for name in [
        "Lift L",
        "Lift R",
        "Lift C",
        "Pull L",
        "Pull R",
        "Push L",
        "Push R",
        "Shift Right L",
        "Shift Left L",
    ] {
        store.insert(name, 0.0);
    }
    store
}

#[test]
fn relative_groups_expand_per_side() {
    let settings = ModeSettings::from_json(RELATIVE_JSON).unwrap();
    let store = relative_store();
    let handler = RelativePosMorphHandler::load(&settings.relative_pos_morphs, RelativePosMultipliers::default(), &store);
    assert_eq!(handler.len(), 9);
    assert_eq!(handler.configs().configs(SideDirection::UpL)[0].name, "Lift L");
    assert_eq!(handler.configs().configs(SideDirection::UpR)[0].name, "Lift R");
    assert_eq!(handler.configs().configs(SideDirection::UpC)[0].name, "Lift C");
    // positional morphs are always direct
    assert_eq!(handler.configs().configs(SideDirection::BackL)[0].mode, ParamMode::Direct);
}

#[test]
fn relative_morphs_route_by_sign() {
    let settings = ModeSettings::from_json(RELATIVE_JSON).unwrap();
    let mut store = relative_store();
    let handler = RelativePosMorphHandler::load(&settings.relative_pos_morphs, RelativePosMultipliers::default(), &store);

    let diffs = PositionDiffs {
        angle_y_left: 37.5,
        angle_y_right: -10.0,
        depth_diff_left: -1.0 / 24.0,
        depth_diff_right: 1.0 / 24.0,
        angle_x_left: 30.0,
        angle_x_right: 0.0,
    };
    let mut out = TargetWriter::new(&mut store, None);
    handler.update(&diffs, 1.0, 1.0, &mut out).unwrap();

    assert!(approx(store.value("Lift L").unwrap(), 0.5, 1e-6));
    assert_eq!(store.value("Lift R"), Some(0.0));
    // centre angle 13.75 / 75, rounded to three decimals
    assert!(approx(store.value("Lift C").unwrap(), 0.183, 1e-6));
    assert!(approx(store.value("Pull L").unwrap(), 0.5, 1e-6));
    assert_eq!(store.value("Push L"), Some(0.0));
    assert_eq!(store.value("Pull R"), Some(0.0));
    assert!(approx(store.value("Push R").unwrap(), 0.5, 1e-6));
    assert!(approx(store.value("Shift Right L").unwrap(), 0.5, 1e-6));
    assert_eq!(store.value("Shift Left L"), Some(0.0));

    // the other way round
    let diffs = PositionDiffs {
        angle_y_left: -5.0,
        angle_x_left: -30.0,
        ..diffs
    };
    let mut out = TargetWriter::new(&mut store, None);
    handler.update(&diffs, 1.0, 1.0, &mut out).unwrap();
    assert_eq!(store.value("Lift L"), Some(0.0));
    assert_eq!(store.value("Shift Right L"), Some(0.0));
    assert!(approx(store.value("Shift Left L").unwrap(), 0.5, 1e-6));
}

#[test]
fn relative_morphs_reject_non_finite_diffs() {
    let settings = ModeSettings::from_json(RELATIVE_JSON).unwrap();
    let mut store = relative_store();
    let handler = RelativePosMorphHandler::load(&settings.relative_pos_morphs, RelativePosMultipliers::default(), &store);
    let diffs = PositionDiffs {
        depth_diff_left: f32::NAN,
        ..PositionDiffs::default()
    };
    let mut out = TargetWriter::new(&mut store, None);
    assert!(handler.update(&diffs, 1.0, 1.0, &mut out).is_err());
}

const STATIC_JSON: &str = r#"{
    "staticPhysics": {
        "main": { "spring": { "minMminS": 100.0, "maxMminS": 60.0, "minMmaxS": 80.0 } },
        "soft": { "softSpring": { "minMminS": 10.0, "maxMminS": 20.0, "minMmaxS": 5.0 } },
        "nipple": { "nippleSpring": { "minMminS": 2.0, "maxMminS": 2.0, "minMmaxS": 2.0 } },
        "hair": { "ignored": { "minMminS": 1.0, "maxMminS": 1.0, "minMmaxS": 1.0 } }
    }
}"#;

fn static_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store.insert("spring", 1.0);
    store.insert("softSpring", 2.0);
    store.insert("nippleSpring", 3.0);
    store.insert("mass", 0.5);
    store
}

#[test]
fn static_values_interpolate_corners() {
    let settings = ModeSettings::from_json(STATIC_JSON).unwrap();
    let mut store = static_store();
    let handler = StaticPhysicsHandler::load(&settings.static_physics, true, &store);
    assert_eq!(handler.len(), 3);
    assert!(handler.writes_mass());

    let mid_mass = (constants::MASS_MIN + constants::MASS_MAX) / 2.0;
    let mut out = TargetWriter::new(&mut store, None);
    handler.full_update(mid_mass, 0.5, 1.0, &mut out).unwrap();
    // 100 - 40 * 0.5 - 20 * 0.5
    assert!(approx(store.value("spring").unwrap(), 70.0, 1e-3));
    // 10 + 10 * 0.5 - 5 * 0.5
    assert!(approx(store.value("softSpring").unwrap(), 12.5, 1e-3));
    // firmed up by the erection input
    assert!(approx(store.value("nippleSpring").unwrap(), 3.0, 1e-5));
    assert_eq!(store.value("mass"), Some(mid_mass));
}

#[test]
fn main_update_touches_only_main_section() {
    let settings = ModeSettings::from_json(STATIC_JSON).unwrap();
    let mut store = static_store();
    let handler = StaticPhysicsHandler::load(&settings.static_physics, true, &store);
    let mut out = TargetWriter::new(&mut store, None);
    handler.update_main(constants::MASS_MIN, 0.0, &mut out).unwrap();
    assert!(approx(store.value("spring").unwrap(), 100.0, 1e-4));
    assert_eq!(store.value("softSpring"), Some(2.0));
    assert_eq!(store.value("nippleSpring"), Some(3.0));
    assert_eq!(store.value("mass"), Some(constants::MASS_MIN));

    let mut out = TargetWriter::new(&mut store, None);
    handler.restore(&mut out);
    assert_eq!(store.value("spring"), Some(1.0));
}

#[test]
fn mass_is_left_alone_when_not_written() {
    let settings = ModeSettings::from_json(STATIC_JSON).unwrap();
    let mut store = static_store();
    let handler = StaticPhysicsHandler::load(&settings.static_physics, false, &store);
    assert!(!handler.writes_mass());
    let mut out = TargetWriter::new(&mut store, None);
    handler.full_update(1.5, 0.5, 0.0, &mut out).unwrap();
    assert_eq!(store.value("mass"), Some(0.5));
}

#[test]
fn static_status_lists_sections() {
    let settings = ModeSettings::from_json(STATIC_JSON).unwrap();
    let store = static_store();
    let handler = StaticPhysicsHandler::load(&settings.static_physics, true, &store);
    let status = handler.status(&store);
    assert!(status.starts_with("MAIN PHYSICS\nspring: 1.000\n"), "{status}");
    assert!(status.contains("SOFT PHYSICS\nsoftSpring: 2.000\n"));
    assert!(status.contains("NIPPLE PHYSICS\nnippleSpring: 3.000\n"));
}
