use crate::{
    animation::spring::SpringConfig,
    foundation::{core::Fps, math::interpolate_clamped},
};

/// Caption reveal tunables.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionStyle {
    /// Share of a cue's duration in which every character must have started appearing.
    #[serde(default = "default_active_fraction")]
    pub active_fraction: f64,
    /// Lower bound of the per-character stagger, in frames.
    #[serde(default = "default_min_delay_frames")]
    pub min_delay_frames: f64,
    /// Upper bound of the per-character stagger, in frames.
    #[serde(default = "default_max_delay_frames")]
    pub max_delay_frames: f64,
    /// Vertical offset (pixels, downwards) a glyph rises from while it scales in.
    #[serde(default = "default_rise_px")]
    pub rise_px: f64,
    /// Spring driving each glyph's scale.
    #[serde(default)]
    pub spring: SpringConfig,
}

fn default_active_fraction() -> f64 {
    0.8
}

fn default_min_delay_frames() -> f64 {
    1.0
}

fn default_max_delay_frames() -> f64 {
    5.0
}

fn default_rise_px() -> f64 {
    20.0
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            active_fraction: default_active_fraction(),
            min_delay_frames: default_min_delay_frames(),
            max_delay_frames: default_max_delay_frames(),
            rise_px: default_rise_px(),
            spring: SpringConfig::default(),
        }
    }
}

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

/// Animated state of one glyph.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RevealState {
    /// Glyph scale, 0 before the glyph appears and settling at 1.
    pub scale: f64,
    /// Vertical offset in pixels, `rise_px` at scale 0 and 0 at scale 1.
    pub translate_y: f64,
}

impl CaptionStyle {
    /// Stagger between consecutive characters of a cue, clamped to
    /// `[min_delay_frames, max_delay_frames]`.
    ///
    /// Swapped bounds are reordered and non-finite ones fall back to the defaults.
    pub fn delay_per_char(&self, text_len: usize, cue_duration_frames: u64) -> f64 {
        let (lo, hi) = self.delay_bounds();
        let active = cue_duration_frames as f64 * self.active_fraction;
        let base = active / text_len.max(1) as f64;
        if base.is_nan() {
            return hi;
        }
        base.clamp(lo, hi)
    }

    fn delay_bounds(&self) -> (f64, f64) {
        let lo = finite_or(self.min_delay_frames, default_min_delay_frames());
        let hi = finite_or(self.max_delay_frames, default_max_delay_frames());
        (lo.min(hi), lo.max(hi))
    }

    /// Frame offset at which character `char_index` starts appearing.
    pub fn delay_for_char(
        &self,
        char_index: usize,
        text_len: usize,
        cue_duration_frames: u64,
    ) -> f64 {
        char_index as f64 * self.delay_per_char(text_len, cue_duration_frames)
    }

    /// Glyph state at cue-local `frame` for a glyph released at `delay`.
    pub fn reveal_state(&self, frame: f64, delay: f64, fps: Fps) -> RevealState {
        let scale = self.spring.value_at(frame - delay, fps).max(0.0);
        RevealState {
            scale,
            translate_y: interpolate_clamped(scale, 0.0, 1.0, self.rise_px, 0.0),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/captions/pacer.rs"]
mod tests;
