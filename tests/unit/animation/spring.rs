use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn at_rest_until_release() {
    let s = SpringConfig::default();
    for f in [-10.0, -0.5, 0.0] {
        assert_eq!(s.value_at(f, fps30()), 0.0);
    }
    assert!(s.value_at(1.0, fps30()) > 0.0);
}

#[test]
fn default_spring_settles_on_one() {
    let s = SpringConfig::default();
    let v = s.value_at(300.0, fps30());
    assert!((v - 1.0).abs() < 1e-6, "v={v}");
}

#[test]
fn default_spring_overshoots_once_released() {
    let s = SpringConfig::default();
    let peak = (0..90)
        .map(|f| s.value_at(f as f64, fps30()))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.05, "peak={peak}");
    assert!(peak < 1.3, "peak={peak}");
}

#[test]
fn overshoot_clamping_caps_at_one() {
    let s = SpringConfig {
        overshoot_clamping: true,
        ..SpringConfig::default()
    };
    for f in 0..120 {
        assert!(s.value_at(f as f64, fps30()) <= 1.0);
    }
}

#[test]
fn critically_damped_rises_monotonically() {
    let s = SpringConfig {
        damping: 2.0 * 200f64.sqrt(),
        ..SpringConfig::default()
    };
    let mut prev = 0.0;
    for f in 0..120 {
        let v = s.value_at(f as f64, fps30());
        assert!(v >= prev - 1e-12);
        assert!(v <= 1.0 + 1e-12);
        prev = v;
    }
    assert!((prev - 1.0).abs() < 1e-3);
}

#[test]
fn overdamped_rises_monotonically_and_slower() {
    let over = SpringConfig {
        damping: 60.0,
        ..SpringConfig::default()
    };
    let crit = SpringConfig {
        damping: 2.0 * 200f64.sqrt(),
        ..SpringConfig::default()
    };
    let mut prev = 0.0;
    for f in 0..120 {
        let v = over.value_at(f as f64, fps30());
        assert!(v >= prev - 1e-12);
        assert!(v <= 1.0 + 1e-12);
        prev = v;
    }
    assert!(over.value_at(10.0, fps30()) < crit.value_at(10.0, fps30()));
}

#[test]
fn evaluation_is_order_independent() {
    let s = SpringConfig::default();
    let forward: Vec<f64> = (0..30).map(|f| s.value_at(f as f64, fps30())).collect();
    let backward: Vec<f64> = (0..30)
        .rev()
        .map(|f| s.value_at(f as f64, fps30()))
        .collect();
    let reversed: Vec<f64> = backward.into_iter().rev().collect();
    assert_eq!(forward, reversed);
}

#[test]
fn fractional_frames_are_continuous() {
    let s = SpringConfig::default();
    let a = s.value_at(4.0, fps30());
    let b = s.value_at(4.001, fps30());
    assert!((a - b).abs() < 1e-3);
}
