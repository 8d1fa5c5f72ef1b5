use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn ten_chars_over_forty_frames() {
    let style = CaptionStyle::default();
    let d = style.delay_per_char(10, 40);
    assert!((d - 3.2).abs() < 1e-12);
    let last = style.delay_for_char(9, 10, 40);
    assert!((last - 28.8).abs() < 1e-9);
    assert!(last < 32.0);
}

#[test]
fn delay_is_clamped_to_bounds() {
    let style = CaptionStyle::default();
    // Long text in a short cue hits the lower bound.
    assert_eq!(style.delay_per_char(200, 30), 1.0);
    // Short text in a long cue hits the upper bound.
    assert_eq!(style.delay_per_char(2, 300), 5.0);
}

#[test]
fn empty_text_does_not_divide_by_zero() {
    let style = CaptionStyle::default();
    let d = style.delay_per_char(0, 40);
    assert!(d.is_finite());
    assert_eq!(d, 5.0);
}

#[test]
fn swapped_delay_bounds_are_reordered() {
    let style: CaptionStyle = serde_json::from_str("{\"min_delay_frames\": 6.0}").unwrap();
    // Bounds become [5, 6]; the 3.2 frame base delay is raised to 5.
    assert_eq!(style.delay_per_char(10, 40), 5.0);
    assert_eq!(style.delay_per_char(1, 400), 6.0);
}

#[test]
fn non_finite_delay_bounds_use_defaults() {
    let style = CaptionStyle {
        min_delay_frames: f64::NAN,
        max_delay_frames: f64::INFINITY,
        ..CaptionStyle::default()
    };
    assert!((style.delay_per_char(10, 40) - 3.2).abs() < 1e-12);
    assert_eq!(style.delay_per_char(200, 30), 1.0);

    let nan_fraction = CaptionStyle {
        active_fraction: f64::NAN,
        ..CaptionStyle::default()
    };
    assert_eq!(nan_fraction.delay_per_char(10, 40), 5.0);
}

#[test]
fn delay_never_increases_with_longer_text() {
    let style = CaptionStyle::default();
    let mut prev = f64::MAX;
    for len in 1..200usize {
        let d = style.delay_per_char(len, 60);
        assert!(d <= prev);
        assert!((1.0..=5.0).contains(&d));
        prev = d;
    }
}

#[test]
fn glyph_hidden_before_its_delay() {
    let style = CaptionStyle::default();
    let state = style.reveal_state(5.0, 6.4, fps30());
    assert_eq!(state.scale, 0.0);
    assert_eq!(state.translate_y, 20.0);
    let at_release = style.reveal_state(6.4, 6.4, fps30());
    assert_eq!(at_release.scale, 0.0);
}

#[test]
fn glyph_settles_in_place() {
    let style = CaptionStyle::default();
    let state = style.reveal_state(200.0, 3.2, fps30());
    assert!((state.scale - 1.0).abs() < 1e-6);
    assert!(state.translate_y.abs() < 1e-4);
}

#[test]
fn translate_stays_within_rise() {
    let style = CaptionStyle::default();
    for f in 0..90 {
        let s = style.reveal_state(f as f64, 2.0, fps30());
        assert!(s.scale >= 0.0);
        assert!((0.0..=20.0).contains(&s.translate_y), "f={f} {s:?}");
    }
}

#[test]
fn overshoot_is_visible_on_scale_not_translate() {
    let style = CaptionStyle::default();
    let peak = (0..60)
        .map(|f| style.reveal_state(f as f64, 0.0, fps30()))
        .max_by(|a, b| a.scale.total_cmp(&b.scale))
        .unwrap();
    assert!(peak.scale > 1.0);
    assert_eq!(peak.translate_y, 0.0);
}

#[test]
fn style_defaults_fill_missing_json_fields() {
    let style: CaptionStyle = serde_json::from_str("{\"rise_px\": 12.0}").unwrap();
    assert_eq!(style.rise_px, 12.0);
    assert_eq!(style.active_fraction, 0.8);
    assert_eq!(style.spring, SpringConfig::default());
}
