use super::*;
use crate::{
    compile::timeline::TimelineConfig,
    scene::manifest::Manifest,
    scene::model::{BodySegment, CaptionCue, SceneDescriptor},
};

fn timeline() -> Timeline {
    let scenes = (0..6)
        .map(|i| SceneDescriptor {
            video_source: format!("s{i}.mp4"),
            start_frame: i * 40,
            duration_frames: 40,
            source_duration_secs: if i % 2 == 0 { 1.0 } else { 8.0 },
        })
        .collect();
    let manifest = Manifest {
        fps: None,
        fade_duration_frames: None,
        intro: None,
        body: BodySegment {
            scenes,
            audio_source: Some("body.mp3".to_owned()),
            duration_secs: None,
        },
        title_captions: Vec::new(),
        body_captions: vec![CaptionCue {
            text: "parallel frames".to_owned(),
            start_frame: 20,
            end_frame: 200,
        }],
    };
    Timeline::build(&manifest, &TimelineConfig::default())
}

#[test]
fn parallel_matches_sequential() {
    let t = timeline();
    let seq = eval_range(&t, t.range(), &EvalThreading::default()).unwrap();
    let par = eval_range(
        &t,
        t.range(),
        &EvalThreading {
            parallel: true,
            chunk_size: 7,
            threads: Some(3),
        },
    )
    .unwrap();
    assert_eq!(seq.len(), 240);
    assert_eq!(seq, par);
}

#[test]
fn frames_come_back_in_order() {
    let t = timeline();
    let range = FrameRange::new(FrameIndex(10), FrameIndex(50)).unwrap();
    let frames = eval_range(
        &t,
        range,
        &EvalThreading {
            parallel: true,
            chunk_size: 0,
            threads: Some(2),
        },
    )
    .unwrap();
    let idx: Vec<u64> = frames.iter().map(|f| f.frame.0).collect();
    assert_eq!(idx, (10..50).collect::<Vec<_>>());
}

#[test]
fn chunked_sink_sees_bounded_chunks() {
    let t = timeline();
    let mut sizes = Vec::new();
    eval_range_chunked(
        &t,
        t.range(),
        &EvalThreading {
            chunk_size: 100,
            ..EvalThreading::default()
        },
        |chunk| {
            sizes.push(chunk.len());
            Ok(())
        },
    )
    .unwrap();
    assert_eq!(sizes, vec![100, 100, 40]);
}

#[test]
fn sink_errors_stop_evaluation() {
    let t = timeline();
    let mut calls = 0;
    let err = eval_range_chunked(&t, t.range(), &EvalThreading::default(), |_| {
        calls += 1;
        Err(FramefitError::evaluation("sink full"))
    })
    .unwrap_err();
    assert_eq!(calls, 1);
    assert!(err.to_string().contains("sink full"));
}

#[test]
fn range_past_duration_is_rejected() {
    let t = timeline();
    let range = FrameRange::from_start_len(200, 100);
    let err = eval_range(&t, range, &EvalThreading::default()).unwrap_err();
    assert!(matches!(err, FramefitError::Evaluation(_)));
}

#[test]
fn unbounded_range_end_is_an_error_not_an_allocation() {
    let t = timeline();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(u64::MAX)).unwrap();
    let err = eval_range(&t, range, &EvalThreading::default()).unwrap_err();
    assert!(matches!(err, FramefitError::Evaluation(_)));
    assert!(err.to_string().contains("exceeds composition duration"));
}

#[test]
fn zero_threads_is_rejected() {
    let t = timeline();
    let err = eval_range(
        &t,
        t.range(),
        &EvalThreading {
            parallel: true,
            chunk_size: 8,
            threads: Some(0),
        },
    )
    .unwrap_err();
    assert!(matches!(err, FramefitError::Validation(_)));
}

#[test]
fn empty_range_yields_nothing() {
    let t = timeline();
    let frames = eval_range(&t, FrameRange::from_start_len(5, 0), &EvalThreading::default())
        .unwrap();
    assert!(frames.is_empty());
}

#[test]
fn chunk_size_zero_is_one() {
    assert_eq!(normalized_chunk_size(0), 1);
    assert_eq!(normalized_chunk_size(1), 1);
    assert_eq!(normalized_chunk_size(16), 16);
}
