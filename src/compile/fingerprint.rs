use crate::{
    compile::schedule::Schedule,
    eval::evaluator::{FrameInstructions, LayerContent},
    foundation::math::Fnv1a64,
};

/// 128-bit content fingerprint built from two independently seeded FNV-1a streams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Fingerprint {
    /// High half.
    pub hi: u64,
    /// Low half.
    pub lo: u64,
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

struct Pair {
    a: Fnv1a64,
    b: Fnv1a64,
}

impl Pair {
    fn new() -> Self {
        Self {
            a: Fnv1a64::new_default(),
            b: Fnv1a64::new(0x9ae1_6a3b_2f90_404f),
        }
    }

    fn u8(&mut self, v: u8) {
        self.a.write_u8(v);
        self.b.write_u8(v);
    }

    fn u64(&mut self, v: u64) {
        self.a.write_u64(v);
        self.b.write_u64(v);
    }

    fn f64(&mut self, v: f64) {
        self.u64(v.to_bits());
    }

    fn str(&mut self, s: &str) {
        self.u64(s.len() as u64);
        self.a.write_bytes(s.as_bytes());
        self.b.write_bytes(s.as_bytes());
    }

    fn finish(self) -> Fingerprint {
        Fingerprint {
            hi: self.a.finish(),
            lo: self.b.finish(),
        }
    }
}

/// Fingerprint of a schedule: scene placement and every playback plan field.
pub fn fingerprint_schedule(schedule: &Schedule) -> Fingerprint {
    let mut h = Pair::new();
    h.u64(schedule.scenes.len() as u64);
    for s in &schedule.scenes {
        h.u64(s.index as u64);
        h.str(&s.scene.video_source);
        h.u64(s.start_frame);
        h.u64(s.scene.duration_frames);
        h.f64(s.scene.source_duration_secs);
        h.u64(s.plan.extended_duration_frames);
        h.f64(s.plan.playback_rate);
        h.u8(u8::from(s.plan.loops_required));
        h.u64(s.plan.source_duration_frames);
    }
    h.finish()
}

/// Fingerprint of one frame's instructions.
pub fn fingerprint_frame(frame: &FrameInstructions) -> Fingerprint {
    let mut h = Pair::new();
    h.u64(frame.frame.0);

    h.u64(frame.layers.len() as u64);
    for layer in &frame.layers {
        h.str(&layer.layer_id);
        h.f64(layer.opacity);
        for c in layer.transform.as_coeffs() {
            h.f64(c);
        }
        match &layer.content {
            LayerContent::Video {
                source,
                media_local_frame,
                playback_rate,
                source_time_secs,
            } => {
                h.u8(0);
                h.str(source);
                h.u64(*media_local_frame);
                h.f64(*playback_rate);
                h.f64(*source_time_secs);
            }
            LayerContent::Image { source } => {
                h.u8(1);
                h.str(source);
            }
            LayerContent::Placeholder { message } => {
                h.u8(2);
                h.str(message);
            }
            LayerContent::SubtitleBackdrop => h.u8(3),
        }
    }

    h.u64(frame.captions.len() as u64);
    for caption in &frame.captions {
        h.u8(caption.track as u8);
        h.u64(caption.cue_index as u64);
        h.u64(caption.local_frame);
        h.u64(caption.glyphs.len() as u64);
        for g in &caption.glyphs {
            h.u64(g.char_index as u64);
            h.u64(u64::from(u32::from(g.ch)));
            h.f64(g.scale);
            h.f64(g.translate_y);
        }
    }

    h.u64(frame.audio.len() as u64);
    for audio in &frame.audio {
        h.str(&audio.source);
        h.u64(audio.local_frame);
    }
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fingerprint.rs"]
mod tests;
