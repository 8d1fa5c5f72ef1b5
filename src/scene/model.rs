use crate::foundation::core::{FrameIndex, FrameRange};

/// One video scene of the body timeline, as the scheduler consumes it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDescriptor {
    /// Opaque media identifier, resolved by the compositor.
    pub video_source: String,
    /// Nominal start frame, relative to the body segment.
    pub start_frame: u64,
    /// Nominal length in frames, always `> 0`.
    pub duration_frames: u64,
    /// Native media length in seconds.
    pub source_duration_secs: f64,
}

impl SceneDescriptor {
    /// Nominal `[start, start + duration)` range without fade overlap.
    pub fn nominal_range(&self) -> FrameRange {
        FrameRange::from_start_len(self.start_frame, self.duration_frames)
    }
}

/// A caption line and the frames it is visible on.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CaptionCue {
    /// Caption text; revealed one character (Unicode scalar) at a time.
    pub text: String,
    /// Inclusive start frame, relative to the owning track's origin.
    pub start_frame: u64,
    /// Exclusive end frame, always `> start_frame`.
    pub end_frame: u64,
}

impl CaptionCue {
    /// Cue length in frames.
    pub fn duration_frames(&self) -> u64 {
        self.end_frame.saturating_sub(self.start_frame)
    }

    /// Number of revealable characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Which caption timeline a cue belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionTrackKind {
    /// Captions shown over the intro segment.
    Title,
    /// Captions shown over the body segment.
    Body,
}

/// An ordered, non-overlapping list of cues placed at `origin` on the composition timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionTrack {
    /// Track identity.
    pub kind: CaptionTrackKind,
    /// Composition frame that cue frame 0 maps to.
    pub origin: u64,
    /// Cues sorted by `start_frame`.
    pub cues: Vec<CaptionCue>,
}

impl CaptionTrack {
    /// Cue visible at composition frame `frame`, with its cue-local frame.
    ///
    /// Cues are non-overlapping, so at most one is active.
    pub fn active_at(&self, frame: FrameIndex) -> Option<(usize, &CaptionCue, u64)> {
        let rel = frame.0.checked_sub(self.origin)?;
        let end = self.cues.partition_point(|c| c.start_frame <= rel);
        let idx = end.checked_sub(1)?;
        let cue = &self.cues[idx];
        (rel < cue.end_frame).then(|| (idx, cue, rel - cue.start_frame))
    }

    /// Last composition frame (exclusive) any cue of this track covers.
    pub fn end_frame(&self) -> u64 {
        self.cues
            .iter()
            .map(|c| self.origin.saturating_add(c.end_frame))
            .max()
            .unwrap_or(self.origin)
    }
}

/// How the intro segment is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroVisualKind {
    /// Video played at rate 1.0 from its start.
    Video,
    /// Still image.
    Image,
}

/// Opening segment shown before the body timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IntroSegment {
    /// Visual media kind.
    pub kind: IntroVisualKind,
    /// Visual media identifier.
    pub visual_source: String,
    /// Narration or soundtrack identifier.
    pub audio_source: Option<String>,
    /// Segment length in seconds.
    pub duration_secs: f64,
}

/// Body segment: scenes, soundtrack and declared length.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BodySegment {
    /// Scenes ordered by `start_frame`.
    pub scenes: Vec<SceneDescriptor>,
    /// Soundtrack identifier.
    pub audio_source: Option<String>,
    /// Declared length in seconds, when known.
    pub duration_secs: Option<f64>,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
