//! reeltime is a frame-deterministic timeline engine for scene-based promo videos.
//!
//! It turns a single integer frame number into a complete description of what is on
//! screen: which scene (or which pair of scenes and which transition), each scene's
//! local frame, and every animated property value. Pixels, fonts and audio playback are
//! left to an external compositor.
//!
//! # Pipeline overview
//!
//! 1. **Declare**: scenes (`SceneSpec` or any [`Scene`] impl), transitions and a
//!    [`CompositionConfig`] with a fixed frame budget.
//! 2. **Build**: [`Composition::new`] / [`CompositionBuilder::build`] resolve scene start
//!    frames once and reject malformed timelines or budget overruns.
//! 3. **Evaluate**: [`Evaluator::eval_frame`] maps `FrameIndex -> FrameState`; ranges can
//!    run on a rayon pool with [`eval_range_with_stats`].
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: every value is a pure function of the frame and immutable config.
//! - **Fail early**: configuration errors surface at build time; sampling never fails.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod composition;
mod eval;
mod foundation;
mod scene;
mod timeline;

pub use animation::anim::{Anim, Expr, SampleCtx, Schedule, Tween};
pub use animation::ease::Ease;
pub use animation::interpolate::{Extrapolate, InterpolateOpts, interpolate, interpolate_frame};
pub use animation::ops::{delay, remap, stagger, step, switch};
pub use animation::oscillate::{Oscillator, Wave};
pub use animation::stagger::Stagger;
pub use composition::dsl::{CompositionBuilder, ElementBuilder, SceneBuilder};
pub use composition::model::{
    AssetKind, AssetRef, AudioBed, AudioCue, Composition, CompositionConfig, CompositionDef,
    TrailingPolicy,
};
pub use composition::promo::{
    PROMO_BUDGET_FRAMES, PROMO_ID, PROMO_SCENE_FRAMES, PROMO_TRANSITION_FRAMES, promo,
    promo_def, promo_scenes, promo_transitions,
};
pub use eval::evaluator::{
    EvalStats, EvalThreading, Evaluator, FrameContent, FrameState, ResolvedTransition,
    SceneFrame, eval_range_with_stats,
};
pub use eval::fingerprint::{FrameFingerprint, fingerprint_frame};
pub use foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Transform2D, Vec2};
pub use foundation::error::{ConfigSite, ReelError, ReelResult};
pub use scene::model::{ElementSpec, Repeat, Scene, SceneSpec};
pub use scene::render_state::{PropValue, RenderState};
pub use scene::reveal::{RevealKind, TextReveal};
pub use timeline::sequencer::{Timeline, TimelineLayout, TimelineState, resolve_starts};
pub use timeline::transition::{
    Presentation, TimingCurve, TransitionSpec, parse_presentation, parse_timing,
};
