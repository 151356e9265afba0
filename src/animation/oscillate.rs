use std::f64::consts::TAU;

use crate::foundation::error::{ReelError, ReelResult};

/// Periodic function driving an [`Oscillator`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Wave {
    /// `sin`, zero at phase 0.
    #[default]
    Sine,
    /// `cos`, peak at phase 0.
    Cosine,
}

impl Wave {
    fn eval(self, x: f64) -> f64 {
        match self {
            Self::Sine => x.sin(),
            Self::Cosine => x.cos(),
        }
    }
}

/// Bounded periodic motion: `amplitude * wave((frame + delay) / period_divisor)`.
///
/// Used for ambient float (position) and, through [`Oscillator::breathe`], for breathing
/// scale. The output is never clamped; it is bounded by `|amplitude|`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Oscillator {
    /// Periodic function.
    #[serde(default)]
    pub wave: Wave,
    /// Peak offset.
    pub amplitude: f64,
    /// Frames per radian; the full period is `2π * period_divisor` frames.
    pub period_divisor: f64,
    /// Phase delay in frames.
    #[serde(default)]
    pub delay: f64,
}

impl Oscillator {
    /// Validated oscillator.
    pub fn new(wave: Wave, amplitude: f64, period_divisor: f64, delay: f64) -> ReelResult<Self> {
        let osc = Self {
            wave,
            amplitude,
            period_divisor,
            delay,
        };
        osc.validate()?;
        Ok(osc)
    }

    /// Sine oscillator with no phase delay.
    pub fn sine(amplitude: f64, period_divisor: f64) -> ReelResult<Self> {
        Self::new(Wave::Sine, amplitude, period_divisor, 0.0)
    }

    /// Cosine oscillator with no phase delay.
    pub fn cosine(amplitude: f64, period_divisor: f64) -> ReelResult<Self> {
        Self::new(Wave::Cosine, amplitude, period_divisor, 0.0)
    }

    /// Same oscillator shifted by `delay` frames.
    pub fn delayed(self, delay: f64) -> ReelResult<Self> {
        Self::new(self.wave, self.amplitude, self.period_divisor, delay)
    }

    /// Check finiteness and a strictly positive period divisor.
    pub fn validate(&self) -> ReelResult<()> {
        if !(self.period_divisor.is_finite() && self.period_divisor > 0.0) {
            return Err(ReelError::primitive(format!(
                "oscillator period divisor must be finite and > 0, got {}",
                self.period_divisor
            )));
        }
        if !self.amplitude.is_finite() {
            return Err(ReelError::primitive("oscillator amplitude must be finite"));
        }
        if !self.delay.is_finite() {
            return Err(ReelError::primitive("oscillator delay must be finite"));
        }
        Ok(())
    }

    /// Offset at `frame`.
    pub fn sample(&self, frame: f64) -> f64 {
        self.amplitude * self.wave.eval((frame + self.delay) / self.period_divisor)
    }

    /// Multiplicative breathing factor `1 + sample(frame)`.
    pub fn breathe(&self, frame: f64) -> f64 {
        1.0 + self.sample(frame)
    }

    /// Length of one full cycle in frames.
    pub fn period_frames(&self) -> f64 {
        TAU * self.period_divisor
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/oscillate.rs"]
mod tests;
