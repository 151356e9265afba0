use std::sync::Arc;

use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    scene::model::Scene,
    timeline::transition::TransitionSpec,
};

/// Resolve scene start frames from scene durations and transition overlaps.
///
/// Returns `(starts, len)` where `starts[0] == 0`,
/// `starts[i + 1] == starts[i] + durations[i] - overlaps[i]` and `len` is the last
/// scene's end frame. This is the only place where overlap arithmetic happens.
pub fn resolve_starts(durations: &[u64], overlaps: &[u64]) -> ReelResult<(Vec<u64>, u64)> {
    if durations.is_empty() {
        return Err(ReelError::configuration(
            "timeline must contain at least one scene",
        ));
    }
    if overlaps.len() + 1 != durations.len() {
        return Err(ReelError::configuration(format!(
            "{} scenes need exactly {} transitions, got {}",
            durations.len(),
            durations.len() - 1,
            overlaps.len()
        )));
    }
    if let Some(i) = durations.iter().position(|&d| d == 0) {
        return Err(ReelError::scene(i, "duration must be > 0 frames"));
    }
    if let Some(i) = overlaps.iter().position(|&t| t == 0) {
        return Err(ReelError::transition(i, "duration must be > 0 frames"));
    }
    for (i, &t) in overlaps.iter().enumerate() {
        let shorter = durations[i].min(durations[i + 1]);
        if t >= shorter {
            return Err(ReelError::transition(
                i,
                format!("{t} frames must be shorter than both adjacent scenes ({shorter})"),
            ));
        }
    }
    for i in 1..overlaps.len() {
        let (t_in, t_out) = (overlaps[i - 1], overlaps[i]);
        if t_in.checked_add(t_out).is_none_or(|sum| sum > durations[i]) {
            return Err(ReelError::scene(
                i,
                format!(
                    "incoming ({t_in}) and outgoing ({t_out}) transitions overlap inside {} frames",
                    durations[i]
                ),
            ));
        }
    }

    let mut starts = Vec::with_capacity(durations.len());
    let mut cursor = 0u64;
    for (i, &d) in durations.iter().enumerate() {
        starts.push(cursor);
        let end = cursor
            .checked_add(d)
            .ok_or_else(|| ReelError::scene(i, "timeline length overflows u64"))?;
        cursor = match overlaps.get(i) {
            Some(&t) => end - t,
            None => end,
        };
    }
    Ok((starts, cursor))
}

/// What is on screen at one global frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineState {
    /// Exactly one scene.
    Single {
        /// Scene index.
        scene: usize,
        /// Frame local to the scene.
        local: u64,
    },
    /// Two adjacent scenes blended by a transition.
    Transition {
        /// Transition index; joins scenes `transition` and `transition + 1`.
        transition: usize,
        /// Outgoing scene index.
        outgoing: usize,
        /// Incoming scene index.
        incoming: usize,
        /// Frame local to the outgoing scene.
        outgoing_local: u64,
        /// Frame local to the incoming scene.
        incoming_local: u64,
        /// Blend progress in `[0, 1]`.
        progress: f64,
    },
}

/// Resolved placement of every scene and transition on the global timeline.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TimelineLayout {
    /// Global frame range of each scene.
    pub scenes: Vec<FrameRange>,
    /// Global frame range of each transition overlap.
    pub transitions: Vec<FrameRange>,
    /// Resolved length in frames.
    pub len_frames: u64,
}

/// Ordered scenes joined by transitions, starting and ending with a scene.
#[derive(Clone, Debug)]
pub struct Timeline {
    scenes: Vec<Arc<dyn Scene>>,
    transitions: Vec<TransitionSpec>,
    starts: Vec<u64>,
    len: u64,
}

impl Timeline {
    /// Validate every scene and the overlap rules, then resolve start frames.
    pub fn new(scenes: Vec<Arc<dyn Scene>>, transitions: Vec<TransitionSpec>) -> ReelResult<Self> {
        for (i, scene) in scenes.iter().enumerate() {
            scene
                .validate()
                .map_err(|e| ReelError::scene(i, format!("'{}': {e}", scene.id())))?;
        }
        let durations: Vec<u64> = scenes.iter().map(|s| s.duration_frames()).collect();
        let overlaps: Vec<u64> = transitions.iter().map(|t| t.duration_frames).collect();
        let (starts, len) = resolve_starts(&durations, &overlaps)?;

        tracing::debug!(
            scenes = scenes.len(),
            transitions = transitions.len(),
            len_frames = len,
            "resolved timeline"
        );
        Ok(Self {
            scenes,
            transitions,
            starts,
            len,
        })
    }

    /// Resolved length: sum of scene durations minus sum of transition durations.
    pub fn len_frames(&self) -> u64 {
        self.len
    }

    /// Scenes in order.
    pub fn scenes(&self) -> &[Arc<dyn Scene>] {
        &self.scenes
    }

    /// Transitions in order.
    pub fn transitions(&self) -> &[TransitionSpec] {
        &self.transitions
    }

    /// Global frame range occupied by scene `index`.
    pub fn scene_range(&self, index: usize) -> Option<FrameRange> {
        let start = *self.starts.get(index)?;
        let d = self.scenes[index].duration_frames();
        Some(FrameRange {
            start: FrameIndex(start),
            end: FrameIndex(start + d),
        })
    }

    /// Global frame range where transition `index` overlaps its two scenes.
    pub fn transition_range(&self, index: usize) -> Option<FrameRange> {
        let t = self.transitions.get(index)?.duration_frames;
        let start = self.starts[index + 1];
        Some(FrameRange {
            start: FrameIndex(start),
            end: FrameIndex(start + t),
        })
    }

    /// Placement of every scene and transition.
    pub fn layout(&self) -> TimelineLayout {
        TimelineLayout {
            scenes: (0..self.scenes.len())
                .filter_map(|i| self.scene_range(i))
                .collect(),
            transitions: (0..self.transitions.len())
                .filter_map(|i| self.transition_range(i))
                .collect(),
            len_frames: self.len,
        }
    }

    /// State at `frame`, or `None` past the resolved length.
    pub fn resolve(&self, frame: FrameIndex) -> Option<TimelineState> {
        let f = frame.0;
        if f >= self.len {
            return None;
        }
        // Latest scene that has started.
        let i = self.starts.partition_point(|&s| s <= f).saturating_sub(1);
        let local = f - self.starts[i];

        // Still inside the head overlap with scene i - 1?
        if i > 0 {
            let tr = &self.transitions[i - 1];
            if local < tr.duration_frames {
                return Some(TimelineState::Transition {
                    transition: i - 1,
                    outgoing: i - 1,
                    incoming: i,
                    outgoing_local: f - self.starts[i - 1],
                    incoming_local: local,
                    progress: tr.progress_at(local),
                });
            }
        }
        Some(TimelineState::Single { scene: i, local })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sequencer.rs"]
mod tests;
