use super::*;

const MONOTONIC: [Ease; 10] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InSine,
    Ease::OutSine,
    Ease::InOutSine,
];

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn endpoints_are_stable() {
    for ease in MONOTONIC.into_iter().chain([Ease::POP]) {
        assert!(approx(ease.apply(0.0), 0.0), "{ease:?} at 0");
        assert!(approx(ease.apply(1.0), 1.0), "{ease:?} at 1");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in MONOTONIC {
        let mut prev = ease.apply(0.0);
        for i in 1..=20 {
            let v = ease.apply(f64::from(i) / 20.0);
            assert!(v >= prev, "{ease:?} reversed at step {i}");
            prev = v;
        }
    }
}

#[test]
fn apply_clamps_progress() {
    assert_eq!(Ease::OutCubic.apply(-3.0), 0.0);
    assert_eq!(Ease::OutCubic.apply(7.0), 1.0);
}

#[test]
fn out_back_overshoots_then_settles() {
    let peak = (0..=100)
        .map(|i| Ease::POP.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
    assert_eq!(Ease::POP.apply(1.0), 1.0);
}

#[test]
fn out_back_without_overshoot_is_cubic_out() {
    let flat = Ease::OutBack { overshoot: 0.0 };
    for i in 0..=10 {
        let t = f64::from(i) / 10.0;
        assert!(approx(flat.apply(t), Ease::OutCubic.apply(t)));
    }
}

#[test]
fn in_out_quad_saturates_outside_unit_range() {
    assert_eq!(Ease::InOutQuad.curve(1.5), 1.0);
    assert_eq!(Ease::InOutQuad.curve(-0.5), 0.0);
    assert!(Ease::InCubic.curve(1.5) > 1.0);
}

#[test]
fn validate_rejects_bad_overshoot() {
    assert!(Ease::OutBack { overshoot: -1.0 }.validate().is_err());
    assert!(Ease::OutBack { overshoot: f64::NAN }.validate().is_err());
    assert!(Ease::POP.validate().is_ok());
}
