use crate::{foundation::core::Fps, media::fit::PlaybackPlan};

/// Wrap a scene-local frame into the source's loop window.
///
/// Identity when `loops` is `false`, or when the source has no whole frames to loop over.
pub fn wrapped_local_frame(local_frame: u64, source_duration_frames: u64, loops: bool) -> u64 {
    if !loops || source_duration_frames == 0 {
        return local_frame;
    }
    local_frame % source_duration_frames
}

impl PlaybackPlan {
    /// Media-local frame for a scene-local frame under this plan.
    pub fn media_local_frame(&self, local_frame: u64) -> u64 {
        wrapped_local_frame(
            local_frame,
            self.source_duration_frames,
            self.loops_required,
        )
    }

    /// Source decode position in seconds for a scene-local frame.
    pub fn source_time_secs(&self, local_frame: u64, fps: Fps) -> f64 {
        let media_frame = self.media_local_frame(local_frame);
        (fps.frames_to_secs(media_frame) * self.playback_rate).max(0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/looping.rs"]
mod tests;
