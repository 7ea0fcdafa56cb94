mod common;

use common::approx;
use gravity_core::effect::*;
use gravity_core::sag_curve;

const BOUNDARIES: [f32; 3] = [-1.0, 0.0, 1.0];

#[test]
fn pitch_components_are_continuous_at_boundaries() {
    let eps = 1e-4;
    for b in BOUNDARIES {
        let below = up_down_adjust(b - eps);
        let above = up_down_adjust(b + eps);
        assert!(approx(below, above, 1e-3), "up/down jumps at {b}: {below} vs {above}");
        let below = depth_adjust(b - eps);
        let above = depth_adjust(b + eps);
        assert!(approx(below, above, 1e-3), "depth jumps at {b}: {below} vs {above}");
    }
}

#[test]
fn effects_are_continuous_at_boundaries_for_any_roll() {
    let m = Multiplier::new(1.3);
    let eps = 1e-4;
    for r in -10..=10 {
        let roll = r as f32 / 10.0;
        for b in BOUNDARIES {
            let a = up_down_effect(b - eps, roll, &m, Coupling::Same);
            let c = up_down_effect(b + eps, roll, &m, Coupling::Same);
            assert!(approx(a, c, 1e-3), "up/down effect jumps at pitch {b}, roll {roll}");
            let a = depth_effect(b - eps, roll, &m);
            let c = depth_effect(b + eps, roll, &m);
            assert!(approx(a, c, 1e-3), "depth effect jumps at pitch {b}, roll {roll}");
        }
    }
}

#[test]
fn pitch_components_reference_values() {
    assert_eq!(up_down_adjust(0.0), 1.0);
    assert_eq!(up_down_adjust(1.0), 0.0);
    assert_eq!(up_down_adjust(-1.0), 0.0);
    assert_eq!(up_down_adjust(2.0), 1.0);
    assert_eq!(up_down_adjust(-2.0), 1.0);
    assert_eq!(depth_adjust(0.0), 0.0);
    assert_eq!(depth_adjust(1.0), 1.0);
    assert_eq!(depth_adjust(-1.0), 1.0);
    assert_eq!(depth_adjust(2.0), 0.0);
    assert_eq!(depth_adjust(-2.0), 0.0);
}

#[test]
fn up_down_and_depth_stay_in_unit_range() {
    let m = Multiplier::new(2.0);
    for i in -200..=200 {
        let pitch = i as f32 / 100.0;
        for r in -4..=4 {
            let roll = r as f32 / 4.0;
            let ud = up_down_effect(pitch, roll, &m, Coupling::Same);
            let d = depth_effect(pitch, roll, &m);
            assert!((0.0..=1.0 + 1e-6).contains(&ud), "up/down {ud} at {pitch}, {roll}");
            assert!((0.0..=1.0 + 1e-6).contains(&d), "depth {d} at {pitch}, {roll}");
        }
    }
}

#[test]
fn roll_effect_is_symmetric() {
    let m = Multiplier::new(1.0);
    assert!(approx(roll_effect(0.5, &m), 0.25, 1e-6));
    assert!(approx(roll_effect(-0.5, &m), 0.25, 1e-6));
    assert_eq!(roll_effect(0.0, &m), 0.0);
    assert_eq!(roll_multiplier(1.0), 0.0);
    assert_eq!(roll_multiplier(-1.0), 0.0);
    assert_eq!(roll_multiplier(0.0), 1.0);
}

#[test]
fn full_roll_cancels_pitch_effects() {
    let m = Multiplier::new(1.0);
    for i in -20..=20 {
        let pitch = i as f32 / 10.0;
        assert_eq!(up_down_effect(pitch, 1.0, &m, Coupling::Same), 0.0);
        assert_eq!(depth_effect(pitch, -1.0, &m), 0.0);
    }
}

#[test]
fn coupling_picks_extra_multiplier() {
    let mut m = Multiplier::new(1.0);
    m.extra = Some(2.0);
    let same = up_down_effect(0.0, 0.0, &m, Coupling::Same);
    let opposite = up_down_effect(0.0, 0.0, &m, Coupling::Opposite);
    assert!(approx(same, 1.0, 1e-6));
    assert!(approx(opposite, 0.5, 1e-6));
}

#[test]
fn diff_from_horizontal_peaks_upright() {
    assert!(approx(diff_from_horizontal(0.0, 0.0), 1.0, 1e-6));
    assert!(approx(diff_from_horizontal(0.5, 0.0), 0.0, 1e-6));
    assert!(approx(diff_from_horizontal(-0.5, 0.0), 0.0, 1e-6));
    assert!(approx(diff_from_horizontal(0.0, 0.5), 0.5, 1e-6));
}

#[test]
fn positional_effects_interpolate_against_ceilings() {
    assert!(approx(vertical_angle_effect(37.5, 1.0), 0.5, 1e-6));
    assert!(approx(vertical_angle_effect(-37.5, 1.0), 0.5, 1e-6));
    assert_eq!(vertical_angle_effect(150.0, 1.0), 1.0);
    assert!(approx(horizontal_angle_effect(30.0, 1.0), 0.5, 1e-6));
    assert!(approx(horizontal_angle_effect(15.0, 2.0), 0.5, 1e-6));
    assert!(approx(depth_diff_effect(1.0 / 24.0, 1.0), 0.5, 1e-5));
    assert!(approx(depth_diff_effect(-1.0 / 24.0, 1.0), 0.5, 1e-5));
    assert_eq!(depth_diff_effect(1.0, 1.0), 1.0);
}

#[test]
fn curved_multiplier_follows_control() {
    let mut m = Multiplier::with_curve(0.5, sag_curve);
    assert!(approx(m.main(), 1.0, 1e-5));
    m.set_value(1.0);
    assert!(approx(m.main(), 1.48988, 1e-4));
    m.set_value(0.0);
    assert_eq!(m.main(), 0.0);

    let mut plain = Multiplier::new(0.3);
    plain.set_value(0.7);
    assert_eq!(plain.main(), 0.7);
}
