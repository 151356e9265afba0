use rayon::prelude::*;

use crate::{
    animation::anim::SampleCtx,
    composition::model::{AudioCue, Composition, TrailingPolicy},
    eval::fingerprint::{FrameFingerprint, fingerprint_frame},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    scene::render_state::RenderState,
    timeline::{
        sequencer::TimelineState,
        transition::{Presentation, TimingCurve},
    },
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything the compositor needs to draw one frame.
pub struct FrameState {
    /// Global frame index.
    pub frame: FrameIndex,
    /// `true` in the trailing buffer past the resolved timeline length.
    pub buffer: bool,
    /// Scene or transition content.
    pub content: FrameContent,
    /// Background audio state, if playing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioCue>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Visual content of one frame.
pub enum FrameContent {
    /// One scene on screen.
    Scene {
        /// The scene's rendered state.
        scene: SceneFrame,
    },
    /// Two scenes blended by a transition.
    Transition {
        /// Blend parameters.
        transition: ResolvedTransition,
        /// Scene leaving the screen.
        outgoing: SceneFrame,
        /// Scene entering the screen.
        incoming: SceneFrame,
    },
    /// Nothing on screen.
    Blank,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A scene rendered at one local frame.
pub struct SceneFrame {
    /// Scene index in the timeline.
    pub index: usize,
    /// Scene identifier.
    pub id: String,
    /// Frame local to the scene.
    pub local_frame: u64,
    /// Rendered properties.
    pub state: RenderState,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Transition state resolved for a specific frame.
pub struct ResolvedTransition {
    /// Transition index in the timeline.
    pub index: usize,
    /// Visual effect name.
    pub presentation: Presentation,
    /// Timing curve name.
    pub timing: TimingCurve,
    /// Blend progress in `[0, 1]`.
    pub progress: f64,
}

/// Stateless evaluator from composition to per-frame state.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(comp))]
    /// Evaluate one frame. Frames at or past the budget are rejected.
    pub fn eval_frame(comp: &Composition, frame: FrameIndex) -> ReelResult<FrameState> {
        let budget = FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(comp.duration_frames()),
        };
        if !budget.contains(frame) {
            return Err(ReelError::OutOfRange {
                frame: frame.0,
                budget: budget.end.0,
            });
        }

        let timeline = comp.timeline();
        let render = |index: usize, local: u64| -> SceneFrame {
            let scene = &timeline.scenes()[index];
            let ctx = SampleCtx::local(i64::try_from(local).unwrap_or(i64::MAX));
            SceneFrame {
                index,
                id: scene.id().to_string(),
                local_frame: local,
                state: scene.render(ctx),
            }
        };

        let (buffer, content) = match timeline.resolve(frame) {
            Some(TimelineState::Single { scene, local }) => (
                false,
                FrameContent::Scene {
                    scene: render(scene, local),
                },
            ),
            Some(TimelineState::Transition {
                transition,
                outgoing,
                incoming,
                outgoing_local,
                incoming_local,
                progress,
            }) => {
                let spec = &timeline.transitions()[transition];
                (
                    false,
                    FrameContent::Transition {
                        transition: ResolvedTransition {
                            index: transition,
                            presentation: spec.presentation,
                            timing: spec.timing,
                            progress,
                        },
                        outgoing: render(outgoing, outgoing_local),
                        incoming: render(incoming, incoming_local),
                    },
                )
            }
            None => match comp.config().trailing {
                TrailingPolicy::Hold => {
                    let last = timeline.scenes().len() - 1;
                    // Held frames pin to the last scene's final frame.
                    let local = timeline
                        .scene_range(last)
                        .map_or(0, |r| r.clamp(frame).0 - r.start.0);
                    (
                        true,
                        FrameContent::Scene {
                            scene: render(last, local),
                        },
                    )
                }
                TrailingPolicy::Blank => (true, FrameContent::Blank),
            },
        };

        Ok(FrameState {
            frame,
            buffer,
            content,
            audio: comp.audio_at(frame),
        })
    }

    /// Evaluate every frame in `range`, in order.
    pub fn eval_range(
        comp: &Composition,
        range: FrameRange,
        threading: &EvalThreading,
    ) -> ReelResult<Vec<FrameState>> {
        eval_range_with_stats(comp, range, threading).map(|(frames, _)| frames)
    }
}

#[derive(Clone, Debug)]
/// Range evaluation threading and chunking.
pub struct EvalThreading {
    /// Evaluate chunks on a rayon pool.
    pub parallel: bool,
    /// Frames per chunk; 0 is treated as 1.
    pub chunk_size: usize,
    /// Pool size; `None` uses rayon's default.
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

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Counters reported by [`eval_range_with_stats`].
pub struct EvalStats {
    /// Frames evaluated.
    pub frames_total: u64,
    /// Frames whose visual content differs from every earlier frame in the range.
    pub frames_distinct: u64,
}

/// Evaluate `range` and count visually distinct frames.
///
/// Parallel and serial evaluation return identical frames in the same order.
pub fn eval_range_with_stats(
    comp: &Composition,
    range: FrameRange,
    threading: &EvalThreading,
) -> ReelResult<(Vec<FrameState>, EvalStats)> {
    if range.is_empty() {
        return Err(ReelError::configuration("eval range must be non-empty"));
    }
    if range.end.0 > comp.duration_frames() {
        return Err(ReelError::OutOfRange {
            frame: range.end.0 - 1,
            budget: comp.duration_frames(),
        });
    }

    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let frames = match &pool {
            Some(pool) => pool.install(|| {
                (chunk_start..chunk_end)
                    .into_par_iter()
                    .map(|f| Evaluator::eval_frame(comp, FrameIndex(f)))
                    .collect::<ReelResult<Vec<_>>>()
            })?,
            None => (chunk_start..chunk_end)
                .map(|f| Evaluator::eval_frame(comp, FrameIndex(f)))
                .collect::<ReelResult<Vec<_>>>()?,
        };
        out.extend(frames);
        chunk_start = chunk_end;
    }

    let mut seen = std::collections::HashSet::<FrameFingerprint>::new();
    for frame in &out {
        seen.insert(fingerprint_frame(frame));
    }
    let stats = EvalStats {
        frames_total: out.len() as u64,
        frames_distinct: seen.len() as u64,
    };
    tracing::debug!(
        frames = stats.frames_total,
        distinct = stats.frames_distinct,
        parallel = threading.parallel,
        "evaluated range"
    );
    Ok((out, stats))
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::configuration(
            "eval threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
