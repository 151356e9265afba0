use crate::{
    animation::ease::Ease,
    foundation::error::{ReelError, ReelResult},
};

/// What [`interpolate`] returns for inputs outside the input range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Extrapolate {
    /// Hold the boundary output value.
    #[default]
    Clamp,
    /// Keep following the eased mapping past the boundary.
    Extend,
    /// Return the input unchanged.
    Identity,
}

/// Options for [`interpolate`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterpolateOpts {
    /// Curve applied to normalized progress.
    #[serde(default = "default_ease")]
    pub ease: Ease,
    /// Policy before the first input value.
    #[serde(default)]
    pub extrapolate_left: Extrapolate,
    /// Policy after the last input value.
    #[serde(default)]
    pub extrapolate_right: Extrapolate,
}

fn default_ease() -> Ease {
    Ease::Linear
}

impl Default for InterpolateOpts {
    fn default() -> Self {
        Self {
            ease: Ease::Linear,
            extrapolate_left: Extrapolate::Clamp,
            extrapolate_right: Extrapolate::Clamp,
        }
    }
}

impl InterpolateOpts {
    /// Clamp on both sides with the given curve.
    pub fn eased(ease: Ease) -> Self {
        Self {
            ease,
            ..Self::default()
        }
    }
}

/// Map `input` from `input_range` onto `output_range` through `opts.ease`.
///
/// `input_range` must be strictly increasing and every value finite; anything else is a
/// [`ReelError::Primitive`].
pub fn interpolate(
    input: f64,
    input_range: [f64; 2],
    output_range: [f64; 2],
    opts: InterpolateOpts,
) -> ReelResult<f64> {
    check_ranges(input_range, output_range)?;
    opts.ease.validate()?;
    if !input.is_finite() {
        return Err(ReelError::primitive("interpolate input must be finite"));
    }
    Ok(map_unchecked(input, input_range, output_range, opts))
}

/// Frame-indexed form of [`interpolate`].
pub fn interpolate_frame(
    frame: i64,
    frames: [i64; 2],
    output_range: [f64; 2],
    opts: InterpolateOpts,
) -> ReelResult<f64> {
    interpolate(
        frame as f64,
        [frames[0] as f64, frames[1] as f64],
        output_range,
        opts,
    )
}

pub(crate) fn check_ranges(input_range: [f64; 2], output_range: [f64; 2]) -> ReelResult<()> {
    let [x0, x1] = input_range;
    if !(x0.is_finite() && x1.is_finite()) {
        return Err(ReelError::primitive("input range must be finite"));
    }
    if x0 >= x1 {
        return Err(ReelError::primitive(format!(
            "input range must be strictly increasing, got [{x0}, {x1}]"
        )));
    }
    if !output_range.iter().all(|v| v.is_finite()) {
        return Err(ReelError::primitive("output range must be finite"));
    }
    Ok(())
}

// Total for any ranges; `check_ranges` decides whether they are accepted.
pub(crate) fn map_unchecked(
    input: f64,
    [x0, x1]: [f64; 2],
    [y0, y1]: [f64; 2],
    opts: InterpolateOpts,
) -> f64 {
    if input < x0 {
        match opts.extrapolate_left {
            Extrapolate::Clamp => return y0,
            Extrapolate::Identity => return input,
            Extrapolate::Extend => {}
        }
    }
    if input > x1 {
        match opts.extrapolate_right {
            Extrapolate::Clamp => return y1,
            Extrapolate::Identity => return input,
            Extrapolate::Extend => {}
        }
    }
    if input == x0 {
        return y0;
    }
    if input == x1 {
        return y1;
    }

    let span = x1 - x0;
    if !(span.is_finite() && span > 0.0) {
        // Degenerate range: step from `y0` to `y1` at `x0`.
        return if input < x0 { y0 } else { y1 };
    }

    let t = (input - x0) / span;
    let te = if (0.0..=1.0).contains(&t) {
        opts.ease.apply(t)
    } else {
        opts.ease.curve(t)
    };
    y0 + (y1 - y0) * te
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
