use super::*;

#[test]
fn starts_at_start_scale() {
    let z = ZoomConfig::default();
    assert!((z.scale_at(0, 60) - 1.1).abs() < 1e-12);
}

#[test]
fn reaches_end_scale_at_nominal_end() {
    let z = ZoomConfig::default();
    assert!((z.scale_at(60, 60) - 1.25).abs() < 1e-12);
    assert!((z.scale_at(30, 60) - 1.175).abs() < 1e-12);
}

#[test]
fn holds_past_nominal_end() {
    let z = ZoomConfig::default();
    assert!((z.scale_at(75, 60) - 1.25).abs() < 1e-12);
    assert!((z.scale_at(10_000, 60) - 1.25).abs() < 1e-12);
}

#[test]
fn scale_is_monotonic_over_the_scene() {
    let z = ZoomConfig::default();
    let mut prev = 0.0;
    for f in 0..90u64 {
        let s = z.scale_at(f, 60);
        assert!(s >= prev);
        prev = s;
    }
}

#[test]
fn transform_is_uniform_scale() {
    let z = ZoomConfig::default();
    let t = z.transform_at(60, 60);
    let [a, b, c, d, e, f] = t.as_coeffs();
    assert!((a - 1.25).abs() < 1e-12);
    assert!((d - 1.25).abs() < 1e-12);
    assert_eq!([b, c, e, f], [0.0; 4]);
}

#[test]
fn zoom_defaults_fill_missing_json_fields() {
    let z: ZoomConfig = serde_json::from_str("{\"end_scale\": 1.5}").unwrap();
    assert_eq!(z.start_scale, 1.1);
    assert_eq!(z.end_scale, 1.5);
}
