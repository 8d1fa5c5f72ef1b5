use crate::foundation::{core::Affine, math::interpolate_clamped};

/// Slow push-in on body scenes.
///
/// Scale moves linearly from `start_scale` at the scene's first frame to `end_scale` at the end
/// of its nominal duration, then holds through the fade tail.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZoomConfig {
    /// Scale at scene-local frame 0.
    #[serde(default = "default_start_scale")]
    pub start_scale: f64,
    /// Scale reached at the end of the nominal duration.
    #[serde(default = "default_end_scale")]
    pub end_scale: f64,
}

fn default_start_scale() -> f64 {
    1.1
}

fn default_end_scale() -> f64 {
    1.25
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            start_scale: default_start_scale(),
            end_scale: default_end_scale(),
        }
    }
}

impl ZoomConfig {
    /// Scale at `local_frame` of a scene spanning `duration_frames`.
    pub fn scale_at(&self, local_frame: u64, duration_frames: u64) -> f64 {
        interpolate_clamped(
            local_frame as f64,
            0.0,
            duration_frames as f64,
            self.start_scale,
            self.end_scale,
        )
    }

    /// Uniform scale about the layer centre (centre-origin layer coordinates).
    pub fn transform_at(&self, local_frame: u64, duration_frames: u64) -> Affine {
        Affine::scale(self.scale_at(local_frame, duration_frames))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/zoom.rs"]
mod tests;
