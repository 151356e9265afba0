use crate::{
    animation::ease::Ease,
    foundation::error::{ReelError, ReelResult},
};

/// Named visual blend between two scenes, implemented by the compositor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Presentation {
    /// Alpha crossfade.
    Crossfade,
    /// Dip through black.
    FlashBlack,
    /// RGB-split glitch cut.
    Glitch,
    /// Incoming scene zooms in from the center.
    ZoomIn,
    /// Outgoing scene zooms out.
    ZoomOut,
    /// Incoming scene slides in from the right.
    SlideLeft,
    /// Incoming scene slides in from the left.
    SlideRight,
    /// Incoming scene slides in from the bottom.
    SlideUp,
    /// Incoming scene slides in from the top.
    SlideDown,
    /// Fast motion-blurred pan.
    WhipPan,
    /// Crossfade through a blur.
    BlurDissolve,
    /// Hard-edged wipe.
    Wipe,
}

impl Presentation {
    /// Every presentation, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Crossfade,
        Self::FlashBlack,
        Self::Glitch,
        Self::ZoomIn,
        Self::ZoomOut,
        Self::SlideLeft,
        Self::SlideRight,
        Self::SlideUp,
        Self::SlideDown,
        Self::WhipPan,
        Self::BlurDissolve,
        Self::Wipe,
    ];

    /// Stable identifier passed to the compositor.
    pub fn name(self) -> &'static str {
        match self {
            Self::Crossfade => "crossfade",
            Self::FlashBlack => "flash_black",
            Self::Glitch => "glitch",
            Self::ZoomIn => "zoom_in",
            Self::ZoomOut => "zoom_out",
            Self::SlideLeft => "slide_left",
            Self::SlideRight => "slide_right",
            Self::SlideUp => "slide_up",
            Self::SlideDown => "slide_down",
            Self::WhipPan => "whip_pan",
            Self::BlurDissolve => "blur_dissolve",
            Self::Wipe => "wipe",
        }
    }
}

/// Parse a presentation name; case, `_`, `-` and spaces are ignored (`flashBlack`,
/// `flash_black` and `flash-black` are the same).
pub fn parse_presentation(name: &str) -> ReelResult<Presentation> {
    let key = normalize_name(name);
    if key.is_empty() {
        return Err(ReelError::configuration(
            "transition presentation must be non-empty",
        ));
    }
    Presentation::ALL
        .into_iter()
        .find(|p| normalize_name(p.name()) == key)
        .or(match key.as_str() {
            "fade" | "dissolve" => Some(Presentation::Crossfade),
            "dipblack" | "fadeblack" => Some(Presentation::FlashBlack),
            _ => None,
        })
        .ok_or_else(|| {
            ReelError::configuration(format!("unknown transition presentation '{name}'"))
        })
}

impl TryFrom<String> for Presentation {
    type Error = ReelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_presentation(&value)
    }
}

impl From<Presentation> for String {
    fn from(value: Presentation) -> Self {
        value.name().to_owned()
    }
}

/// Named temporal curve mapping transition time to blend progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimingCurve {
    /// Constant speed.
    Linear,
    /// Fast start, soft landing.
    Snappy,
    /// Gentle in and out.
    Smooth,
    /// Critically damped spring, normalized to land exactly on 1.
    Spring,
}

/// Natural frequency of [`TimingCurve::Spring`] over a unit window.
const SPRING_OMEGA: f64 = 10.0;

impl TimingCurve {
    /// Every timing curve, in declaration order.
    pub const ALL: [Self; 4] = [Self::Linear, Self::Snappy, Self::Smooth, Self::Spring];

    /// Stable identifier.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Snappy => "snappy",
            Self::Smooth => "smooth",
            Self::Spring => "spring",
        }
    }

    /// Blend progress in `[0, 1]` for normalized transition time `t` (clamped).
    pub fn progress(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let p = match self {
            Self::Linear => Ease::Linear.apply(t),
            Self::Snappy => Ease::OutCubic.apply(t),
            Self::Smooth => Ease::InOutSine.apply(t),
            Self::Spring => {
                if t >= 1.0 {
                    return 1.0;
                }
                spring_response(t) / spring_response(1.0)
            }
        };
        p.clamp(0.0, 1.0)
    }
}

fn spring_response(t: f64) -> f64 {
    let wt = SPRING_OMEGA * t;
    1.0 - (1.0 + wt) * (-wt).exp()
}

/// Parse a timing curve name; case, `_`, `-` and spaces are ignored.
pub fn parse_timing(name: &str) -> ReelResult<TimingCurve> {
    let key = normalize_name(name);
    TimingCurve::ALL
        .into_iter()
        .find(|c| c.name() == key)
        .ok_or_else(|| ReelError::configuration(format!("unknown timing curve '{name}'")))
}

impl TryFrom<String> for TimingCurve {
    type Error = ReelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_timing(&value)
    }
}

impl From<TimingCurve> for String {
    fn from(value: TimingCurve) -> Self {
        value.name().to_owned()
    }
}

fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Timed overlapping blend between two adjacent scenes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionSpec {
    /// Visual effect.
    pub presentation: Presentation,
    /// Blend progress curve.
    pub timing: TimingCurve,
    /// Overlap length in frames.
    pub duration_frames: u64,
}

impl TransitionSpec {
    /// Transition with the given effect, curve and overlap.
    pub fn new(presentation: Presentation, timing: TimingCurve, duration_frames: u64) -> Self {
        Self {
            presentation,
            timing,
            duration_frames,
        }
    }

    /// Blend progress at `offset` frames into the overlap.
    ///
    /// The first overlap frame is 0 and the last is 1.
    pub fn progress_at(&self, offset: u64) -> f64 {
        let denom = self.duration_frames.saturating_sub(1);
        let t = if denom == 0 {
            1.0
        } else {
            (offset.min(denom) as f64) / (denom as f64)
        };
        self.timing.progress(t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/transition.rs"]
mod tests;
