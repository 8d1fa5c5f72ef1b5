use rayon::prelude::*;

use crate::{
    compile::timeline::Timeline,
    eval::evaluator::{Evaluator, FrameInstructions},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{FramefitError, FramefitResult},
};

/// Threading options for evaluating frame ranges.
#[derive(Clone, Debug)]
pub struct EvalThreading {
    /// Evaluate frames on a dedicated rayon pool.
    pub parallel: bool,
    /// Frames handed to the pool per batch; `0` is treated as `1`.
    pub chunk_size: usize,
    /// Worker thread override. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for EvalThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Evaluate every frame in `range`, returning instructions in frame order.
///
/// Frames are independent, so the parallel path produces exactly the sequential result.
pub fn eval_range(
    timeline: &Timeline,
    range: FrameRange,
    threading: &EvalThreading,
) -> FramefitResult<Vec<FrameInstructions>> {
    let mut out = Vec::with_capacity(range.len_frames().min(timeline.duration_frames) as usize);
    eval_range_chunked(timeline, range, threading, |chunk| {
        out.extend(chunk);
        Ok(())
    })?;
    Ok(out)
}

/// Evaluate `range` chunk by chunk, handing each ordered chunk to `sink`.
///
/// Lets callers stream long ranges without holding every frame in memory.
#[tracing::instrument(skip(timeline, sink), fields(start = range.start.0, end = range.end.0))]
pub fn eval_range_chunked(
    timeline: &Timeline,
    range: FrameRange,
    threading: &EvalThreading,
    mut sink: impl FnMut(Vec<FrameInstructions>) -> FramefitResult<()>,
) -> FramefitResult<()> {
    if range.end.0 > timeline.duration_frames {
        return Err(FramefitError::evaluation(format!(
            "frame range [{}, {}) exceeds composition duration {}",
            range.start.0, range.end.0, timeline.duration_frames
        )));
    }

    let chunk = normalized_chunk_size(threading.chunk_size);
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    let mut start = range.start.0;
    while start < range.end.0 {
        let end = start.saturating_add(chunk).min(range.end.0);
        let frames = match &pool {
            Some(pool) => pool.install(|| {
                (0..(end - start) as usize)
                    .into_par_iter()
                    .map(|i| Evaluator::eval_frame(timeline, FrameIndex(start + i as u64)))
                    .collect::<Vec<_>>()
            }),
            None => (start..end)
                .map(|f| Evaluator::eval_frame(timeline, FrameIndex(f)))
                .collect(),
        };
        tracing::debug!(start, end, "evaluated chunk");
        sink(frames)?;
        start = end;
    }
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> FramefitResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    match threads {
        Some(0) => {
            return Err(FramefitError::validation(
                "eval threading 'threads' must be >= 1 when set",
            ));
        }
        Some(n) => builder = builder.num_threads(n),
        None => {}
    }
    builder
        .build()
        .map_err(|e| FramefitError::evaluation(format!("rayon pool for frame evaluation: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
