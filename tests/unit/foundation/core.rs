use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn local_frame_is_offset_from_start() {
    let r = FrameRange::from_start_len(10, 4);
    assert_eq!(r.local_frame(FrameIndex(9)), None);
    assert_eq!(r.local_frame(FrameIndex(10)), Some(0));
    assert_eq!(r.local_frame(FrameIndex(13)), Some(3));
    assert_eq!(r.local_frame(FrameIndex(14)), None);
}

#[test]
fn fps_frames_secs_roundtrip_floor() {
    let fps = Fps::new(30000, 1001).unwrap();
    let secs = fps.frames_to_secs(123);
    assert_eq!(fps.secs_to_frames_floor(secs), 123);
}

#[test]
fn fps_floor_and_ceil_differ_on_fractions() {
    let fps = Fps::integer(30).unwrap();
    assert_eq!(fps.secs_to_frames_floor(3.01), 90);
    assert_eq!(fps.secs_to_frames_ceil(3.01), 91);
    assert_eq!(fps.secs_to_frames_ceil(3.0), 90);
    assert_eq!(fps.secs_to_frames_floor(-1.0), 0);
}

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}
