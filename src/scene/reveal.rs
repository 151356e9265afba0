use crate::{
    animation::ease::Ease,
    foundation::error::{ReelError, ReelResult},
    scene::render_state::RenderState,
};

/// Text reveal primitive implemented by the typography layer.
///
/// Only timing is resolved here; glyph layout and styling belong to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealKind {
    /// Words fade in one group at a time.
    FadeInWords,
    /// Characters fade in one group at a time.
    FadeInChars,
    /// Characters drop in with a bounce.
    BounceChars,
    /// Kinetic stream: each word group stomps in and replaces the previous one.
    StompStream,
    /// Kinetic stream: word groups push the previous ones out.
    PushStream,
    /// Number counting from `from` to `to`.
    Counter {
        /// Start value.
        from: f64,
        /// End value.
        to: f64,
    },
}

impl RevealKind {
    /// Stable identifier for the typography layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FadeInWords => "fade_in_words",
            Self::FadeInChars => "fade_in_chars",
            Self::BounceChars => "bounce_chars",
            Self::StompStream => "stomp_stream",
            Self::PushStream => "push_stream",
            Self::Counter { .. } => "counter",
        }
    }

    fn per_char(&self) -> bool {
        matches!(self, Self::FadeInChars | Self::BounceChars)
    }
}

/// Timed text reveal descriptor owned by a scene element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextReveal {
    /// Reveal primitive.
    pub kind: RevealKind,
    /// Text to reveal; may be empty for counters.
    #[serde(default)]
    pub text: String,
    /// Local frame at which the reveal starts.
    #[serde(default)]
    pub start_frame: u64,
    /// Frames from first to last unit.
    pub duration_frames: u64,
    /// Words (or characters) revealed together.
    #[serde(default = "default_group_size")]
    pub group_size: usize,
}

fn default_group_size() -> usize {
    1
}

impl TextReveal {
    /// Reveal of `text` starting at `start_frame` and lasting `duration_frames`.
    pub fn new(
        kind: RevealKind,
        text: impl Into<String>,
        start_frame: u64,
        duration_frames: u64,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            start_frame,
            duration_frames,
            group_size: 1,
        }
    }

    /// Reveal `n` words or characters per step.
    pub fn grouped(mut self, n: usize) -> Self {
        self.group_size = n;
        self
    }

    /// Check duration, grouping and counter bounds.
    pub fn validate(&self) -> ReelResult<()> {
        if self.duration_frames == 0 {
            return Err(ReelError::configuration(
                "text reveal duration must be > 0 frames",
            ));
        }
        if self.group_size == 0 {
            return Err(ReelError::configuration("text reveal group size must be > 0"));
        }
        if let RevealKind::Counter { from, to } = self.kind {
            if !(from.is_finite() && to.is_finite()) {
                return Err(ReelError::configuration("counter bounds must be finite"));
            }
        } else if self.text.trim().is_empty() {
            return Err(ReelError::configuration("text reveal text must be non-empty"));
        }
        Ok(())
    }

    /// Number of reveal steps.
    pub fn total_units(&self) -> usize {
        let items = match self.kind {
            RevealKind::Counter { .. } => return 1,
            _ if self.kind.per_char() => self.text.chars().filter(|c| !c.is_whitespace()).count(),
            _ => self.text.split_whitespace().count(),
        };
        items.div_ceil(self.group_size.max(1))
    }

    /// Linear progress in `[0, 1]` at local frame `local`.
    pub fn progress(&self, local: i64) -> f64 {
        let start = self.start_frame as f64;
        let dur = self.duration_frames.max(1) as f64;
        ((local as f64 - start) / dur).clamp(0.0, 1.0)
    }

    /// Units already on screen at local frame `local`.
    pub fn visible_units(&self, local: i64) -> usize {
        let total = self.total_units();
        let shown = (self.progress(local) * total as f64).ceil() as usize;
        shown.min(total)
    }

    /// Write the reveal descriptor for local frame `local` into `out`.
    pub fn render_into(&self, local: i64, out: &mut RenderState) {
        let progress = self.progress(local);
        out.set_text("kind", self.kind.name());
        out.set_number("start_frame", self.start_frame as f64);
        out.set_number("duration_frames", self.duration_frames as f64);
        out.set_number("progress", progress);
        out.set_number("total_units", self.total_units() as f64);
        out.set_number("visible_units", self.visible_units(local) as f64);
        match self.kind {
            RevealKind::Counter { from, to } => {
                let v = from + (to - from) * Ease::OutCubic.apply(progress);
                out.set_number("value", v.round());
                if !self.text.is_empty() {
                    out.set_text("suffix", self.text.clone());
                }
            }
            _ => out.set_text("text", self.text.clone()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/reveal.rs"]
mod tests;
