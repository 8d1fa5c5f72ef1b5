use crate::{
    captions::pacer::CaptionStyle,
    compile::schedule::{FadeConfig, FinalFade, Schedule, schedule},
    effects::zoom::ZoomConfig,
    foundation::core::{FrameIndex, FrameRange},
    media::fit::PlaybackPolicy,
    scene::manifest::Manifest,
    scene::model::{CaptionTrack, CaptionTrackKind, IntroSegment},
};

/// Every tunable of a composition build, passed explicitly to each stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineConfig {
    /// Frame rate and crossfade length.
    #[serde(default)]
    pub fade: FadeConfig,
    /// Media fit policy.
    #[serde(default)]
    pub playback: PlaybackPolicy,
    /// Caption reveal style.
    #[serde(default)]
    pub caption: CaptionStyle,
    /// Fade budget treatment on the last scene.
    #[serde(default)]
    pub final_fade: FinalFade,
    /// Push-in applied to body scenes; off when `None`.
    #[serde(default)]
    pub zoom: Option<ZoomConfig>,
}

impl TimelineConfig {
    /// Apply the frame rate and fade overrides a manifest carries.
    pub fn with_manifest_overrides(mut self, manifest: &Manifest) -> Self {
        if let Some(fps) = manifest.fps {
            self.fade.fps = fps;
        }
        if let Some(fade) = manifest.fade_duration_frames {
            self.fade.fade_duration_frames = fade;
        }
        self
    }
}

/// Intro segment placed on the composition timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlacedIntro {
    /// Segment as supplied.
    pub segment: IntroSegment,
    /// Composition range the intro occupies.
    pub range: FrameRange,
}

/// Fully scheduled composition; immutable input to frame evaluation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Configuration the timeline was built with.
    pub config: TimelineConfig,
    /// Intro segment, when present.
    pub intro: Option<PlacedIntro>,
    /// Composition frame where the body segment starts.
    pub body_start: u64,
    /// Body soundtrack identifier.
    pub body_audio: Option<String>,
    /// Body scene schedule, in body-relative frames.
    pub schedule: Schedule,
    /// Captions over the intro.
    pub title_track: CaptionTrack,
    /// Captions over the body.
    pub body_track: CaptionTrack,
    /// Composition length in frames.
    pub duration_frames: u64,
}

impl Timeline {
    /// Schedule a manifest under `config`.
    ///
    /// The intro spans `ceil(duration * fps)` frames; the body starts right after it. Pure: the
    /// same manifest and config always give the same timeline.
    #[tracing::instrument(skip_all, fields(scenes = manifest.body.scenes.len()))]
    pub fn build(manifest: &Manifest, config: &TimelineConfig) -> Self {
        let fps = config.fade.fps;

        let intro = manifest.intro.as_ref().map(|segment| PlacedIntro {
            segment: segment.clone(),
            range: FrameRange::from_start_len(0, fps.secs_to_frames_ceil(segment.duration_secs)),
        });
        let body_start = intro.as_ref().map_or(0, |i| i.range.end.0);

        let schedule = schedule(
            &manifest.body.scenes,
            &config.fade,
            &config.playback,
            config.final_fade,
        );

        let title_track = CaptionTrack {
            kind: CaptionTrackKind::Title,
            origin: 0,
            cues: manifest.title_captions.clone(),
        };
        let body_track = CaptionTrack {
            kind: CaptionTrackKind::Body,
            origin: body_start,
            cues: manifest.body_captions.clone(),
        };

        let declared_body = manifest
            .body
            .duration_secs
            .map_or(0, |s| fps.secs_to_frames_ceil(s));
        let body_len = declared_body.max(schedule.nominal_end());
        let duration_frames = body_start
            .saturating_add(body_len)
            .max(title_track.end_frame())
            .max(body_track.end_frame());

        tracing::info!(
            body_start,
            duration_frames,
            scenes = schedule.scenes.len(),
            "timeline built"
        );

        Self {
            config: *config,
            intro,
            body_start,
            body_audio: manifest.body.audio_source.clone(),
            schedule,
            title_track,
            body_track,
            duration_frames,
        }
    }

    /// Full composition range `[0, duration)`.
    pub fn range(&self) -> FrameRange {
        FrameRange::from_start_len(0, self.duration_frames)
    }

    /// Body-relative frame for a composition frame, or `None` before the body starts.
    pub fn body_local(&self, frame: FrameIndex) -> Option<FrameIndex> {
        frame.0.checked_sub(self.body_start).map(FrameIndex)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/timeline.rs"]
mod tests;
