use crate::animation::{
    anim::{Anim, Expr},
    interpolate::InterpolateOpts,
    stagger::Stagger,
};

/// Sample `inner` `by_frames` later.
pub fn delay(inner: Anim, by_frames: u64) -> Anim {
    if by_frames == 0 {
        return inner;
    }
    Anim::Expr(Expr::Delay {
        inner: Box::new(inner),
        by: by_frames,
    })
}

/// `before` until local frame `at`, then `after`.
pub fn step(at: i64, before: Anim, after: Anim) -> Anim {
    Anim::Expr(Expr::Step {
        at,
        before: Box::new(before),
        after: Box::new(after),
    })
}

/// Jump from one constant to another at local frame `at`.
pub fn switch(at: i64, before: f64, after: f64) -> Anim {
    step(at, Anim::constant(before), Anim::constant(after))
}

/// Remap the output of `inner` from `input` onto `output`.
pub fn remap(inner: Anim, input: [f64; 2], output: [f64; 2], opts: InterpolateOpts) -> Anim {
    Anim::Expr(Expr::Remap {
        inner: Box::new(inner),
        input,
        output,
        opts,
    })
}

/// One copy of `anim` per stagger item, each delayed by that item's delay.
pub fn stagger(anim: &Anim, stagger: &Stagger) -> Vec<Anim> {
    stagger
        .delays()
        .into_iter()
        .map(|d| delay(anim.clone(), d))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
