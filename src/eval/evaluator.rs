use crate::{
    compile::schedule::ScheduledScene,
    compile::timeline::Timeline,
    effects::crossfade::crossfade_opacity,
    foundation::core::{Affine, FrameIndex, Vec2},
    scene::model::{CaptionTrack, CaptionTrackKind, IntroVisualKind},
};

/// Text drawn by the placeholder layer when the body has no scenes.
pub const EMPTY_TIMELINE_MESSAGE: &str = "No timeline or videos found.";

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything the compositor needs to draw and play one composition frame.
pub struct FrameInstructions {
    /// Evaluated frame index.
    pub frame: FrameIndex,
    /// Visual layers in painter's order.
    pub layers: Vec<LayerInstruction>,
    /// Active caption lines, title track before body track.
    pub captions: Vec<CaptionInstruction>,
    /// Active audio sources.
    pub audio: Vec<AudioInstruction>,
}

impl FrameInstructions {
    fn empty(frame: FrameIndex) -> Self {
        Self {
            frame,
            layers: Vec::new(),
            captions: Vec::new(),
            audio: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One full-frame visual layer.
pub struct LayerInstruction {
    /// Stable layer identifier.
    pub layer_id: String,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f64,
    /// Layer transform in centre-origin layer coordinates.
    pub transform: Affine,
    /// What the layer shows.
    pub content: LayerContent,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Layer payload.
pub enum LayerContent {
    /// Video media at a given playback position.
    Video {
        /// Media identifier.
        source: String,
        /// Frame within the media loop window, in timeline frames.
        media_local_frame: u64,
        /// Source speed multiplier.
        playback_rate: f64,
        /// Source decode position in seconds.
        source_time_secs: f64,
    },
    /// Still image.
    Image {
        /// Media identifier.
        source: String,
    },
    /// Stand-in shown when the body has no scenes.
    Placeholder {
        /// Message to draw.
        message: String,
    },
    /// Translucent band behind body captions.
    SubtitleBackdrop,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One caption line being revealed.
pub struct CaptionInstruction {
    /// Owning track.
    pub track: CaptionTrackKind,
    /// Index of the cue within its track.
    pub cue_index: usize,
    /// Frame offset from the cue start.
    pub local_frame: u64,
    /// Per-character reveal state.
    pub glyphs: Vec<GlyphInstruction>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Reveal state of one caption character.
pub struct GlyphInstruction {
    /// Character position within the cue text.
    pub char_index: usize,
    /// The character itself.
    pub ch: char,
    /// Glyph scale; 0 until the glyph's delay has elapsed.
    pub scale: f64,
    /// Downward offset in pixels.
    pub translate_y: f64,
    /// `translate(0, translate_y) * scale(scale)` about the glyph origin.
    pub transform: Affine,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// An audio source playing at this frame.
pub struct AudioInstruction {
    /// Media identifier.
    pub source: String,
    /// Frame offset from the start of the owning segment.
    pub local_frame: u64,
}

/// Stateless evaluator from a scheduled timeline to per-frame instructions.
pub struct Evaluator;

impl Evaluator {
    /// Evaluate one composition frame.
    ///
    /// Frames outside `[0, duration)` yield an empty instruction set.
    #[tracing::instrument(level = "trace", skip(timeline))]
    pub fn eval_frame(timeline: &Timeline, frame: FrameIndex) -> FrameInstructions {
        if !timeline.range().contains(frame) {
            return FrameInstructions::empty(frame);
        }

        let mut out = FrameInstructions::empty(frame);
        let fps = timeline.config.fade.fps;

        let intro_local = timeline
            .intro
            .as_ref()
            .and_then(|intro| intro.range.local_frame(frame).map(|local| (intro, local)));
        if let Some((intro, local)) = intro_local {
            let segment = &intro.segment;
            let content = match segment.kind {
                IntroVisualKind::Video => LayerContent::Video {
                    source: segment.visual_source.clone(),
                    media_local_frame: local,
                    playback_rate: 1.0,
                    source_time_secs: fps.frames_to_secs(local),
                },
                IntroVisualKind::Image => LayerContent::Image {
                    source: segment.visual_source.clone(),
                },
            };
            out.layers.push(LayerInstruction {
                layer_id: "intro".to_owned(),
                opacity: 1.0,
                transform: Affine::IDENTITY,
                content,
            });
            if let Some(audio) = &segment.audio_source {
                out.audio.push(AudioInstruction {
                    source: audio.clone(),
                    local_frame: local,
                });
            }
        }

        let body_local = timeline.body_local(frame);
        if let Some(body_frame) = body_local {
            if timeline.schedule.is_empty() {
                out.layers.push(LayerInstruction {
                    layer_id: "body-placeholder".to_owned(),
                    opacity: 1.0,
                    transform: Affine::IDENTITY,
                    content: LayerContent::Placeholder {
                        message: EMPTY_TIMELINE_MESSAGE.to_owned(),
                    },
                });
            }
            for scene in timeline.schedule.active_at(body_frame) {
                out.layers.push(eval_scene(timeline, scene, body_frame));
            }
            out.layers.push(LayerInstruction {
                layer_id: "subtitle-backdrop".to_owned(),
                opacity: 1.0,
                transform: Affine::IDENTITY,
                content: LayerContent::SubtitleBackdrop,
            });
            if let Some(audio) = &timeline.body_audio {
                out.audio.push(AudioInstruction {
                    source: audio.clone(),
                    local_frame: body_frame.0,
                });
            }
        }

        // Title captions live inside the intro segment when there is one.
        let title_visible = match &timeline.intro {
            Some(intro) => intro.range.contains(frame),
            None => true,
        };
        if title_visible && let Some(c) = eval_captions(timeline, &timeline.title_track, frame) {
            out.captions.push(c);
        }
        if body_local.is_some()
            && let Some(c) = eval_captions(timeline, &timeline.body_track, frame)
        {
            out.captions.push(c);
        }

        out
    }
}

fn eval_scene(
    timeline: &Timeline,
    scene: &ScheduledScene,
    body_frame: FrameIndex,
) -> LayerInstruction {
    let fps = timeline.config.fade.fps;
    let local = body_frame.0 - scene.start_frame;
    let plan = &scene.plan;
    let zoom = timeline.config.zoom;

    LayerInstruction {
        layer_id: format!("scene-{}", scene.index),
        opacity: crossfade_opacity(
            local,
            timeline.config.fade.fade_duration_frames,
            scene.is_first(),
        ),
        transform: zoom.map_or(Affine::IDENTITY, |z| {
            z.transform_at(local, scene.scene.duration_frames)
        }),
        content: LayerContent::Video {
            source: scene.scene.video_source.clone(),
            media_local_frame: plan.media_local_frame(local),
            playback_rate: plan.playback_rate,
            source_time_secs: plan.source_time_secs(local, fps),
        },
    }
}

fn eval_captions(
    timeline: &Timeline,
    track: &CaptionTrack,
    frame: FrameIndex,
) -> Option<CaptionInstruction> {
    let (cue_index, cue, local) = track.active_at(frame)?;
    let style = &timeline.config.caption;
    let fps = timeline.config.fade.fps;
    let len = cue.char_count();
    let cue_frames = cue.duration_frames();

    let glyphs = cue
        .text
        .chars()
        .enumerate()
        .map(|(char_index, ch)| {
            let delay = style.delay_for_char(char_index, len, cue_frames);
            let state = style.reveal_state(local as f64, delay, fps);
            GlyphInstruction {
                char_index,
                ch,
                scale: state.scale,
                translate_y: state.translate_y,
                transform: Affine::translate(Vec2::new(0.0, state.translate_y))
                    * Affine::scale(state.scale),
            }
        })
        .collect();

    Some(CaptionInstruction {
        track: track.kind,
        cue_index,
        local_frame: local,
        glyphs,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
