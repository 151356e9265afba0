use crate::{
    animation::{
        ease::Ease,
        interpolate::{InterpolateOpts, check_ranges, map_unchecked},
        oscillate::Oscillator,
    },
    foundation::error::{ReelError, ReelResult},
};

/// Time inputs available while sampling an animation.
#[derive(Clone, Copy, Debug)]
pub struct SampleCtx {
    /// Frame relative to the owning scene's first frame; negative before it.
    pub local: i64,
}

impl SampleCtx {
    /// Context for a scene sampled at `local`.
    pub fn local(local: i64) -> Self {
        Self { local }
    }

    /// Same context shifted to another local frame.
    pub fn with_local(mut self, local: i64) -> Self {
        self.local = local;
        self
    }
}

/// One schedule entry: `from -> to` over local frames `[start, end]` through `ease`.
///
/// Clamped on both sides, so it holds `from` before `start` and `to` after `end`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    /// First local frame of the motion.
    pub start: i64,
    /// Local frame at which `to` is reached.
    pub end: i64,
    /// Value at and before `start`.
    pub from: f64,
    /// Value at and after `end`.
    pub to: f64,
    /// Curve between the two.
    pub ease: Ease,
}

impl Tween {
    /// Validated tween.
    pub fn new(start: i64, end: i64, from: f64, to: f64, ease: Ease) -> ReelResult<Self> {
        let tw = Self {
            start,
            end,
            from,
            to,
            ease,
        };
        tw.validate()?;
        Ok(tw)
    }

    /// Check `start < end`, finite values and a valid curve.
    pub fn validate(&self) -> ReelResult<()> {
        check_ranges([self.start as f64, self.end as f64], [self.from, self.to])?;
        self.ease.validate()
    }

    /// Value at local frame `local`.
    pub fn sample(&self, local: i64) -> f64 {
        map_unchecked(
            local as f64,
            [self.start as f64, self.end as f64],
            [self.from, self.to],
            InterpolateOpts::eased(self.ease),
        )
    }
}

/// Ordered, non-overlapping tweens driving one property.
///
/// Before the first entry the first `from` is held; between entries the previous `to`
/// is held; after the last entry its `to` is held.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Schedule {
    entries: Vec<Tween>,
}

impl Schedule {
    /// Validated schedule.
    pub fn new(entries: Vec<Tween>) -> ReelResult<Self> {
        let s = Self { entries };
        s.validate()?;
        Ok(s)
    }

    /// Entries sorted by `start`.
    pub fn entries(&self) -> &[Tween] {
        &self.entries
    }

    /// Check every entry, and that entries are sorted and do not overlap.
    pub fn validate(&self) -> ReelResult<()> {
        if self.entries.is_empty() {
            return Err(ReelError::primitive("schedule must have at least one entry"));
        }
        for tw in &self.entries {
            tw.validate()?;
        }
        if !self.entries.windows(2).all(|w| w[0].end <= w[1].start) {
            return Err(ReelError::primitive(
                "schedule entries must be sorted and must not overlap",
            ));
        }
        Ok(())
    }

    /// Value at local frame `local`; `0.0` for an empty schedule.
    pub fn sample(&self, local: i64) -> f64 {
        let idx = self.entries.partition_point(|e| e.start <= local);
        let Some(entry) = self.entries.get(idx.saturating_sub(1)) else {
            return 0.0;
        };
        entry.sample(local)
    }
}

/// Frame-pure animated scalar.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Anim {
    /// Fixed value.
    Constant(f64),
    /// Single eased motion.
    Tween(Tween),
    /// Table of eased motions.
    Schedule(Schedule),
    /// Additive periodic offset.
    Oscillate(Oscillator),
    /// Multiplicative breathing factor around 1.
    Breathe(Oscillator),
    /// Composition of other animations.
    Expr(Expr),
}

/// Time remapping and combination of animations.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Expr {
    /// Sample `inner` `by` frames later.
    Delay {
        /// Delayed animation.
        inner: Box<Anim>,
        /// Delay in frames.
        by: u64,
    },
    /// `before` until local frame `at`, `after` from then on.
    Step {
        /// First local frame of `after`.
        at: i64,
        /// Animation before the threshold.
        before: Box<Anim>,
        /// Animation from the threshold on.
        after: Box<Anim>,
    },
    /// Pass the output of `inner` through [`crate::interpolate`].
    Remap {
        /// Source animation.
        inner: Box<Anim>,
        /// Input range of the remap.
        input: [f64; 2],
        /// Output range of the remap.
        output: [f64; 2],
        /// Curve and extrapolation.
        #[serde(default)]
        opts: InterpolateOpts,
    },
}

impl Anim {
    /// Constant animation.
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    /// Single validated tween.
    pub fn tween(start: i64, end: i64, from: f64, to: f64, ease: Ease) -> ReelResult<Self> {
        Tween::new(start, end, from, to, ease).map(Self::Tween)
    }

    /// Check every nested primitive. Sampling a validated animation never fails.
    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Constant(v) => {
                if !v.is_finite() {
                    return Err(ReelError::primitive("constant must be finite"));
                }
                Ok(())
            }
            Self::Tween(tw) => tw.validate(),
            Self::Schedule(s) => s.validate(),
            Self::Oscillate(osc) | Self::Breathe(osc) => osc.validate(),
            Self::Expr(expr) => expr.validate(),
        }
    }

    /// Value at `ctx.local`.
    pub fn sample(&self, ctx: SampleCtx) -> f64 {
        match self {
            Self::Constant(v) => *v,
            Self::Tween(tw) => tw.sample(ctx.local),
            Self::Schedule(s) => s.sample(ctx.local),
            Self::Oscillate(osc) => osc.sample(ctx.local as f64),
            Self::Breathe(osc) => osc.breathe(ctx.local as f64),
            Self::Expr(expr) => expr.sample(ctx),
        }
    }
}

impl Expr {
    /// Check nested animations and remap ranges.
    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Delay { inner, by: _ } => inner.validate(),
            Self::Step {
                at: _,
                before,
                after,
            } => {
                before.validate()?;
                after.validate()
            }
            Self::Remap {
                inner,
                input,
                output,
                opts,
            } => {
                check_ranges(*input, *output)?;
                opts.ease.validate()?;
                inner.validate()
            }
        }
    }

    /// Value at `ctx.local`.
    pub fn sample(&self, ctx: SampleCtx) -> f64 {
        match self {
            Self::Delay { inner, by } => {
                let by = i64::try_from(*by).unwrap_or(i64::MAX);
                inner.sample(ctx.with_local(ctx.local.saturating_sub(by)))
            }
            Self::Step { at, before, after } => {
                if ctx.local >= *at {
                    after.sample(ctx)
                } else {
                    before.sample(ctx)
                }
            }
            Self::Remap {
                inner,
                input,
                output,
                opts,
            } => map_unchecked(inner.sample(ctx), *input, *output, *opts),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
