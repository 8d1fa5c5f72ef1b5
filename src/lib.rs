//! framefit schedules stock-footage montages so that any frame can be evaluated on its own.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `ManifestDef` (permissive JSON) -> [`Manifest`] (strict scenes and caption cues)
//! 2. **Schedule**: `Manifest + TimelineConfig -> Timeline` (scene slots, playback plans,
//!    caption tracks)
//! 3. **Evaluate**: `Timeline + FrameIndex -> FrameInstructions` (layers with media position and
//!    opacity, caption glyph states, active audio)
//!
//! Evaluation reads nothing but its arguments. Frames can be evaluated out of order, repeatedly,
//! or in parallel ([`eval_range`]) and always give the same instructions.
//!
//! Media fitting never speeds footage up: a scene's source is played at a slow default rate,
//! stretched down to a floor rate to fill its slot, or looped when even that is too short.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod captions;
mod compile;
mod effects;
mod eval;
mod foundation;
mod media;
mod render;
mod scene;

pub use animation::spring::SpringConfig;
pub use captions::pacer::{CaptionStyle, RevealState};
pub use compile::fingerprint::{Fingerprint, fingerprint_frame, fingerprint_schedule};
pub use compile::schedule::{FadeConfig, FinalFade, Schedule, ScheduledScene, schedule};
pub use compile::timeline::{PlacedIntro, Timeline, TimelineConfig};
pub use effects::crossfade::crossfade_opacity;
pub use effects::zoom::ZoomConfig;
pub use eval::evaluator::{
    AudioInstruction, CaptionInstruction, EMPTY_TIMELINE_MESSAGE, Evaluator, FrameInstructions,
    GlyphInstruction, LayerContent, LayerInstruction,
};
pub use foundation::core::{Affine, Fps, FrameIndex, FrameRange, Vec2};
pub use foundation::error::{FramefitError, FramefitResult};
pub use media::fit::{PlaybackPlan, PlaybackPolicy, resolve_playback};
pub use media::looping::wrapped_local_frame;
pub use render::pipeline::{EvalThreading, eval_range, eval_range_chunked};
pub use scene::manifest::{
    BodyDef, CueDef, IntroDef, Manifest, ManifestDef, SceneDef, captions_from_json_str,
    captions_from_path,
};
pub use scene::model::{
    BodySegment, CaptionCue, CaptionTrack, CaptionTrackKind, IntroSegment, IntroVisualKind,
    SceneDescriptor,
};
