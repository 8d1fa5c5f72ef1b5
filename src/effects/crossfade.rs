use crate::foundation::math::interpolate_clamped;

/// Fade-in opacity of a scene at `local_frame`.
///
/// The first scene of a timeline never fades in. Every other scene ramps linearly from 0 to 1
/// over `[0, fade_duration_frames]` and holds at 1 afterwards. There is no fade-out curve: the
/// outgoing scene stays fully opaque underneath its successor until its extended slot ends.
pub fn crossfade_opacity(local_frame: u64, fade_duration_frames: u64, is_first_scene: bool) -> f64 {
    if is_first_scene || fade_duration_frames == 0 {
        return 1.0;
    }
    interpolate_clamped(local_frame as f64, 0.0, fade_duration_frames as f64, 0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/crossfade.rs"]
mod tests;
