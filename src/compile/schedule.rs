use crate::{
    foundation::core::{Fps, FrameIndex, FrameRange},
    media::fit::{PlaybackPlan, PlaybackPolicy, resolve_playback},
    scene::model::SceneDescriptor,
};

/// Crossfade length and frame rate shared by every scene of a composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FadeConfig {
    /// Overlap in frames between a scene and its successor.
    #[serde(default = "default_fade_duration_frames")]
    pub fade_duration_frames: u64,
    /// Timeline frame rate.
    #[serde(default)]
    pub fps: Fps,
}

fn default_fade_duration_frames() -> u64 {
    15
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            fade_duration_frames: default_fade_duration_frames(),
            fps: Fps::default(),
        }
    }
}

/// Treatment of the fade budget on the last scene, which has no successor to fade into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalFade {
    /// Extend the last scene like every other one; it may run past the nominal body end.
    #[default]
    Extend,
    /// Keep the last scene at its nominal duration.
    Clip,
}

/// A scene placed on the body timeline with its playback plan.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScheduledScene {
    /// Position of the scene in the manifest.
    pub index: usize,
    /// The scene as supplied.
    pub scene: SceneDescriptor,
    /// Start frame, relative to the body segment.
    pub start_frame: u64,
    /// Playback plan covering the extended slot.
    pub plan: PlaybackPlan,
}

impl ScheduledScene {
    /// Extended `[start, start + extended_duration)` range.
    pub fn range(&self) -> FrameRange {
        FrameRange::from_start_len(self.start_frame, self.plan.extended_duration_frames)
    }

    /// The first scene never fades in.
    pub fn is_first(&self) -> bool {
        self.index == 0
    }
}

/// Ordered body schedule. Ranges only overlap by the fade length.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Schedule {
    /// Scenes in manifest order (non-decreasing start frames).
    pub scenes: Vec<ScheduledScene>,
    max_extended_frames: u64,
}

/// Place every scene at its manifest start frame and fit its media into the extended slot.
///
/// Every scene is extended by the fade length; the last one too unless `final_fade` is
/// [`FinalFade::Clip`].
pub fn schedule(
    scenes: &[SceneDescriptor],
    fade: &FadeConfig,
    policy: &PlaybackPolicy,
    final_fade: FinalFade,
) -> Schedule {
    let last = scenes.len().saturating_sub(1);
    let mut out = Vec::with_capacity(scenes.len());
    let mut max_extended_frames = 0u64;

    for (index, scene) in scenes.iter().enumerate() {
        let overlap = match final_fade {
            FinalFade::Clip if index == last => 0,
            _ => fade.fade_duration_frames,
        };
        let extended = scene.duration_frames.saturating_add(overlap);
        let plan = resolve_playback(scene.source_duration_secs, fade.fps, extended, policy);
        tracing::debug!(
            scene = index,
            start = scene.start_frame,
            extended,
            rate = plan.playback_rate,
            loops = plan.loops_required,
            source_frames = plan.source_duration_frames,
            "scheduled scene"
        );

        max_extended_frames = max_extended_frames.max(extended);
        out.push(ScheduledScene {
            index,
            scene: scene.clone(),
            start_frame: scene.start_frame,
            plan,
        });
    }

    Schedule {
        scenes: out,
        max_extended_frames,
    }
}

impl Schedule {
    /// Return `true` when there are no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scenes whose extended range contains body-relative `frame`, in painter's order.
    ///
    /// Binary-searches the start frames, then walks back no further than the longest slot.
    pub fn active_at(&self, frame: FrameIndex) -> Vec<&ScheduledScene> {
        let end = self.scenes.partition_point(|s| s.start_frame <= frame.0);
        let mut active = Vec::new();
        for s in self.scenes[..end].iter().rev() {
            if s.start_frame.saturating_add(self.max_extended_frames) <= frame.0 {
                break;
            }
            if s.range().contains(frame) {
                active.push(s);
            }
        }
        active.reverse();
        active
    }

    /// Exclusive end of the last scene's nominal range, or 0 when empty.
    pub fn nominal_end(&self) -> u64 {
        self.scenes
            .iter()
            .map(|s| s.scene.nominal_range().end.0)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/schedule.rs"]
mod tests;
