pub(crate) mod anim;
pub(crate) mod ease;
pub(crate) mod interpolate;
pub(crate) mod ops;
pub(crate) mod oscillate;
pub(crate) mod stagger;
