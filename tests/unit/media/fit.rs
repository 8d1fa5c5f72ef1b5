use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn default_rate_covers_long_source() {
    let plan = resolve_playback(10.0, fps30(), 240, &PlaybackPolicy::default());
    assert_eq!(plan.source_duration_frames, 300);
    assert_eq!(plan.playback_rate, 0.8);
    assert!(!plan.loops_required);
    assert_eq!(plan.extended_duration_frames, 240);
}

#[test]
fn short_source_loops_at_default_rate() {
    let plan = resolve_playback(3.0, fps30(), 240, &PlaybackPolicy::default());
    assert_eq!(plan.source_duration_frames, 90);
    assert_eq!(plan.playback_rate, 0.8);
    assert!(plan.loops_required);
}

#[test]
fn medium_source_is_stretched_to_fit_exactly() {
    let plan = resolve_playback(5.0, fps30(), 240, &PlaybackPolicy::default());
    assert_eq!(plan.source_duration_frames, 150);
    assert!((plan.playback_rate - 0.625).abs() < 1e-12);
    assert!(!plan.loops_required);
    let covered = plan.source_duration_frames as f64 / plan.playback_rate;
    assert!((covered - 240.0).abs() < 1e-9);
}

#[test]
fn stretch_floor_is_inclusive() {
    // 120 / 240 == 0.5 exactly.
    let plan = resolve_playback(4.0, fps30(), 240, &PlaybackPolicy::default());
    assert_eq!(plan.playback_rate, 0.5);
    assert!(!plan.loops_required);
}

#[test]
fn missing_or_invalid_source_duration_uses_fallback() {
    let policy = PlaybackPolicy::default();
    for secs in [0.0, -3.0, f64::NAN, f64::INFINITY] {
        let plan = resolve_playback(secs, fps30(), 240, &policy);
        assert_eq!(plan.source_duration_frames, 300, "secs={secs}");
        assert_eq!(plan.playback_rate, 0.8);
        assert!(!plan.loops_required);
    }
}

#[test]
fn source_duration_frames_use_floor() {
    let plan = resolve_playback(3.99, fps30(), 10, &PlaybackPolicy::default());
    assert_eq!(plan.source_duration_frames, 119);
}

#[test]
fn rate_stays_in_band_and_loops_only_when_nothing_fits() {
    let fps = Fps::new(1, 1).unwrap();
    let policy = PlaybackPolicy::default();
    for source in (1..=400u64).step_by(7) {
        for slot in (1..=400u64).step_by(11) {
            let plan = resolve_playback(source as f64, fps, slot, &policy);
            assert_eq!(plan.source_duration_frames, source);
            assert!(
                (0.5..=1.0).contains(&plan.playback_rate),
                "source={source} slot={slot} rate={}",
                plan.playback_rate
            );
            let fits_at_floor = source * 2 >= slot;
            assert_eq!(
                plan.loops_required, !fits_at_floor,
                "source={source} slot={slot}"
            );
            if !plan.loops_required {
                assert!(source as f64 / plan.playback_rate >= slot as f64 - 1e-9);
            }
        }
    }
}

#[test]
fn never_speeds_up() {
    let plan = resolve_playback(100.0, fps30(), 30, &PlaybackPolicy::default());
    assert_eq!(plan.playback_rate, 0.8);
}

#[test]
fn policy_defaults_fill_missing_json_fields() {
    let policy: PlaybackPolicy = serde_json::from_str("{\"default_rate\": 0.9}").unwrap();
    assert_eq!(policy.default_rate, 0.9);
    assert_eq!(policy.min_stretch_rate, 0.5);
    assert_eq!(policy.fallback_source_secs, 10.0);
}
