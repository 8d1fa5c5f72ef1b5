use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    foundation::core::Fps,
    foundation::error::{FramefitError, FramefitResult},
    media::fit::PlaybackPolicy,
    scene::model::{BodySegment, CaptionCue, IntroSegment, IntroVisualKind, SceneDescriptor},
};

/// Raw manifest JSON as produced by the footage-gathering step.
///
/// Field names follow the producer's camelCase/snake_case mix. Optional and loosely typed fields
/// are only interpreted by [`ManifestDef::resolve`].
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ManifestDef {
    /// Integer frame rate override.
    #[serde(default, rename = "frameRate", skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<u32>,
    /// Crossfade length override in frames.
    #[serde(
        default,
        rename = "fadeDurationFrames",
        skip_serializing_if = "Option::is_none"
    )]
    pub fade_duration_frames: Option<u64>,
    /// Opening segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<IntroDef>,
    /// Body segment.
    #[serde(default)]
    pub body: BodyDef,
}

/// Raw intro record.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct IntroDef {
    /// `"video"` or `"image"`; anything else is drawn as an image.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Visual media identifier.
    pub visual_src: String,
    /// Audio media identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_src: Option<String>,
    /// Segment length in seconds.
    #[serde(rename = "durationInSeconds")]
    pub duration_in_seconds: f64,
}

/// Raw body record.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct BodyDef {
    /// Scene records; may be empty or absent.
    #[serde(default)]
    pub timeline: Vec<SceneDef>,
    /// Audio media identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_src: Option<String>,
    /// Declared body length in seconds.
    #[serde(
        default,
        rename = "durationInSeconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_in_seconds: Option<f64>,
}

/// Raw scene record.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SceneDef {
    /// Nominal start frame relative to the body segment.
    #[serde(rename = "startFrame")]
    pub start_frame: u64,
    /// Nominal length in frames.
    #[serde(rename = "durationInFrames")]
    pub duration_in_frames: i64,
    /// Video media identifier.
    pub video_src: String,
    /// Search keyword the footage was picked with; informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Native media length in seconds; any non-positive or non-numeric value falls back.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub source_duration: serde_json::Value,
}

/// Raw subtitle record.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CueDef {
    /// Inclusive start frame.
    #[serde(rename = "startFrame")]
    pub start_frame: u64,
    /// Exclusive end frame.
    #[serde(rename = "endFrame")]
    pub end_frame: u64,
    /// Caption text.
    pub text: String,
}

/// Validated manifest with strict core types.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Manifest {
    /// Frame rate override from the manifest.
    pub fps: Option<Fps>,
    /// Crossfade length override from the manifest.
    pub fade_duration_frames: Option<u64>,
    /// Opening segment.
    pub intro: Option<IntroSegment>,
    /// Body segment.
    pub body: BodySegment,
    /// Captions over the intro, relative to frame 0.
    pub title_captions: Vec<CaptionCue>,
    /// Captions over the body, relative to the body start.
    pub body_captions: Vec<CaptionCue>,
}

impl ManifestDef {
    /// Parse a manifest from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FramefitResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FramefitError::validation(format!("parse manifest JSON: {e}")))
    }

    /// Parse a manifest from a JSON string.
    pub fn from_json_str(s: &str) -> FramefitResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| FramefitError::validation(format!("parse manifest JSON: {e}")))
    }

    /// Parse a manifest from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FramefitResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FramefitError::validation(format!("open manifest JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate the raw records and convert them into a [`Manifest`] without captions.
    ///
    /// Missing source durations are replaced by `policy.fallback_source_secs`. Non-positive scene
    /// durations, empty media identifiers and out-of-order start frames are rejected.
    #[tracing::instrument(skip_all)]
    pub fn resolve(&self, policy: &PlaybackPolicy) -> FramefitResult<Manifest> {
        let fps = self.frame_rate.map(Fps::integer).transpose()?;

        let intro = self.intro.as_ref().map(resolve_intro).transpose()?;

        let mut scenes = Vec::with_capacity(self.body.timeline.len());
        let mut prev_start = 0u64;
        for (i, def) in self.body.timeline.iter().enumerate() {
            let scene = resolve_scene(i, def, policy)?;
            if scene.start_frame < prev_start {
                return Err(FramefitError::validation(format!(
                    "scene {i} startFrame {} precedes previous scene start {prev_start}",
                    scene.start_frame
                )));
            }
            prev_start = scene.start_frame;
            scenes.push(scene);
        }
        if scenes.is_empty() {
            tracing::warn!("manifest body timeline is empty; body renders a placeholder");
        }

        if let Some(d) = self.body.duration_in_seconds
            && (!d.is_finite() || d < 0.0)
        {
            return Err(FramefitError::validation(
                "body durationInSeconds must be finite and >= 0",
            ));
        }

        Ok(Manifest {
            fps,
            fade_duration_frames: self.fade_duration_frames,
            intro,
            body: BodySegment {
                scenes,
                audio_source: non_empty(self.body.audio_src.as_deref()),
                duration_secs: self.body.duration_in_seconds,
            },
            title_captions: Vec::new(),
            body_captions: Vec::new(),
        })
    }
}

impl Manifest {
    /// Attach the title caption track.
    ///
    /// Cues go through the same normalization as parsed subtitle files: sorted by start frame,
    /// overlaps cut, empty cues dropped.
    pub fn with_title_captions(mut self, cues: Vec<CaptionCue>) -> Self {
        self.title_captions = normalize_cues(cues);
        self
    }

    /// Attach the body caption track, normalized like [`Manifest::with_title_captions`].
    pub fn with_body_captions(mut self, cues: Vec<CaptionCue>) -> Self {
        self.body_captions = normalize_cues(cues);
        self
    }
}

fn resolve_intro(def: &IntroDef) -> FramefitResult<IntroSegment> {
    if def.visual_src.trim().is_empty() {
        return Err(FramefitError::validation("intro visual_src must be non-empty"));
    }
    if !def.duration_in_seconds.is_finite() || def.duration_in_seconds < 0.0 {
        return Err(FramefitError::validation(
            "intro durationInSeconds must be finite and >= 0",
        ));
    }
    let kind = match def.kind.as_deref().map(str::trim) {
        Some(k) if k.eq_ignore_ascii_case("video") => IntroVisualKind::Video,
        _ => IntroVisualKind::Image,
    };
    Ok(IntroSegment {
        kind,
        visual_source: def.visual_src.clone(),
        audio_source: non_empty(def.audio_src.as_deref()),
        duration_secs: def.duration_in_seconds,
    })
}

fn resolve_scene(
    index: usize,
    def: &SceneDef,
    policy: &PlaybackPolicy,
) -> FramefitResult<SceneDescriptor> {
    if def.duration_in_frames <= 0 {
        return Err(FramefitError::validation(format!(
            "scene {index} durationInFrames must be > 0 (got {})",
            def.duration_in_frames
        )));
    }
    if def.video_src.trim().is_empty() {
        return Err(FramefitError::validation(format!(
            "scene {index} video_src must be non-empty"
        )));
    }

    let source_duration_secs = match def.source_duration.as_f64() {
        Some(s) if s.is_finite() && s > 0.0 => s,
        _ => {
            tracing::warn!(
                scene = index,
                raw = %def.source_duration,
                fallback_secs = policy.fallback_source_secs,
                "missing or invalid source_duration; using fallback"
            );
            policy.fallback_source_secs
        }
    };

    Ok(SceneDescriptor {
        video_source: def.video_src.clone(),
        start_frame: def.start_frame,
        duration_frames: def.duration_in_frames as u64,
        source_duration_secs,
    })
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned)
}

/// Parse a subtitle JSON array and validate it into caption cues.
///
/// Cues are sorted by start frame. A cue with `endFrame <= startFrame` is rejected. When two cues
/// overlap, the earlier one is cut at the later one's start.
pub fn captions_from_json_str(s: &str) -> FramefitResult<Vec<CaptionCue>> {
    let defs: Vec<CueDef> = serde_json::from_str(s)
        .map_err(|e| FramefitError::validation(format!("parse subtitle JSON: {e}")))?;
    resolve_captions(defs)
}

/// Parse a subtitle JSON file on disk.
pub fn captions_from_path(path: impl AsRef<Path>) -> FramefitResult<Vec<CaptionCue>> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| {
        FramefitError::validation(format!("open subtitle JSON '{}': {e}", path.display()))
    })?;
    let defs: Vec<CueDef> = serde_json::from_reader(BufReader::new(f))
        .map_err(|e| FramefitError::validation(format!("parse subtitle JSON: {e}")))?;
    resolve_captions(defs)
}

fn resolve_captions(defs: Vec<CueDef>) -> FramefitResult<Vec<CaptionCue>> {
    let mut cues = Vec::with_capacity(defs.len());
    for (i, def) in defs.into_iter().enumerate() {
        if def.end_frame <= def.start_frame {
            return Err(FramefitError::validation(format!(
                "subtitle {i} endFrame {} must be > startFrame {}",
                def.end_frame, def.start_frame
            )));
        }
        cues.push(CaptionCue {
            text: def.text,
            start_frame: def.start_frame,
            end_frame: def.end_frame,
        });
    }
    Ok(normalize_cues(cues))
}

/// Sort cues by start frame and cut overlaps so a track can be binary-searched.
///
/// Cues with `end_frame <= start_frame` are dropped.
fn normalize_cues(mut cues: Vec<CaptionCue>) -> Vec<CaptionCue> {
    cues.retain(|c| {
        let keep = c.end_frame > c.start_frame;
        if !keep {
            tracing::warn!(
                start = c.start_frame,
                end = c.end_frame,
                "dropping empty subtitle cue"
            );
        }
        keep
    });
    cues.sort_by_key(|c| c.start_frame);

    let mut out: Vec<CaptionCue> = Vec::with_capacity(cues.len());
    for cue in cues {
        if let Some(prev) = out.last_mut()
            && prev.end_frame > cue.start_frame
        {
            tracing::warn!(
                prev_start = prev.start_frame,
                next_start = cue.start_frame,
                "overlapping subtitles; cutting the earlier cue"
            );
            prev.end_frame = cue.start_frame;
            if prev.end_frame <= prev.start_frame {
                out.pop();
            }
        }
        out.push(cue);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/manifest.rs"]
mod tests;
