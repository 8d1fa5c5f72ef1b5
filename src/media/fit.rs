use crate::foundation::core::Fps;

/// Tunables for fitting source media into a timeline slot.
///
/// Playback is only ever slowed down or fitted exactly, never sped up.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlaybackPolicy {
    /// Rate used when it already covers the slot, and when looping takes over.
    #[serde(default = "default_rate")]
    pub default_rate: f64,
    /// Slowest rate allowed when stretching source media to fill a slot.
    #[serde(default = "default_min_stretch_rate")]
    pub min_stretch_rate: f64,
    /// Source duration assumed when the manifest value is missing, non-finite or `<= 0`.
    #[serde(default = "default_fallback_source_secs")]
    pub fallback_source_secs: f64,
}

fn default_rate() -> f64 {
    0.8
}

fn default_min_stretch_rate() -> f64 {
    0.5
}

fn default_fallback_source_secs() -> f64 {
    10.0
}

impl Default for PlaybackPolicy {
    fn default() -> Self {
        Self {
            default_rate: default_rate(),
            min_stretch_rate: default_min_stretch_rate(),
            fallback_source_secs: default_fallback_source_secs(),
        }
    }
}

impl PlaybackPolicy {
    /// Source duration actually used for fitting.
    pub fn effective_source_secs(&self, source_secs: f64) -> f64 {
        if source_secs.is_finite() && source_secs > 0.0 {
            source_secs
        } else {
            self.fallback_source_secs
        }
    }
}

/// How a scene's source media is played across its extended slot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlaybackPlan {
    /// Slot length in frames (nominal duration plus fade overlap).
    pub extended_duration_frames: u64,
    /// Source speed multiplier in `(0, 1]`.
    pub playback_rate: f64,
    /// `true` when the source must restart to cover the slot.
    pub loops_required: bool,
    /// Native source length in timeline frames.
    pub source_duration_frames: u64,
}

/// Pick a playback rate and loop strategy that fits `source_secs` of media into
/// `extended_duration_frames`.
///
/// 1. The default rate is kept when it already covers the slot.
/// 2. Otherwise the source is stretched to fit exactly, down to `min_stretch_rate`.
/// 3. If even that is too short, the default rate is kept and the source loops.
pub fn resolve_playback(
    source_secs: f64,
    fps: Fps,
    extended_duration_frames: u64,
    policy: &PlaybackPolicy,
) -> PlaybackPlan {
    let secs = policy.effective_source_secs(source_secs);
    let source_duration_frames = fps.secs_to_frames_floor(secs);
    let source = source_duration_frames as f64;
    let slot = extended_duration_frames as f64;

    let mut playback_rate = policy.default_rate;
    let mut loops_required = false;

    if source / policy.default_rate < slot {
        let max_stretch_rate = source / slot;
        if max_stretch_rate >= policy.min_stretch_rate {
            playback_rate = max_stretch_rate;
        } else {
            loops_required = true;
        }
    }

    PlaybackPlan {
        extended_duration_frames,
        playback_rate,
        loops_required,
        source_duration_frames,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/fit.rs"]
mod tests;
