//! The ten-scene "Main" promo: 30 fps, 1280x720, 870-frame budget.

use std::collections::BTreeMap;

use crate::{
    animation::{
        anim::Anim, ease::Ease, interpolate::InterpolateOpts, ops, oscillate::Oscillator,
        stagger::Stagger,
    },
    composition::{
        dsl::{CompositionBuilder, ElementBuilder, SceneBuilder},
        model::{AssetKind, AssetRef, AudioBed, Composition, CompositionConfig, CompositionDef},
    },
    foundation::core::{Canvas, Fps},
    foundation::error::ReelResult,
    scene::{
        model::{ElementSpec, SceneSpec},
        reveal::{RevealKind, TextReveal},
    },
    timeline::transition::{Presentation, TimingCurve, TransitionSpec},
};

/// Composition identifier.
pub const PROMO_ID: &str = "Main";
/// Declared budget: resolved length plus a trailing buffer.
pub const PROMO_BUDGET_FRAMES: u64 = 870;
/// Scene durations in frames, in order.
pub const PROMO_SCENE_FRAMES: [u64; 10] = [90, 75, 90, 80, 120, 90, 100, 90, 90, 120];
/// Every transition overlaps its neighbors by this many frames.
pub const PROMO_TRANSITION_FRAMES: u64 = 12;

const FPS: u32 = 30;
const WORDS_FRAMES: u64 = 30;
const CHARS_FRAMES: u64 = 45;
const COUNTER_FRAMES: u64 = 45;

const SCREENSHOT: &str = "screenshot";
const AI_ABSTRACT: &str = "aiAbstract";
const MUSIC: &str = "music";

fn assets() -> [(&'static str, AssetKind, &'static str); 3] {
    [
        (
            SCREENSHOT,
            AssetKind::Image,
            "https://pub-e3bfc0083b0644b296a7080b21024c5f.r2.dev/outrank/1770749485761_8usb3wev728_outrank_screenshot.png",
        ),
        (
            AI_ABSTRACT,
            AssetKind::Image,
            "https://pub-e3bfc0083b0644b296a7080b21024c5f.r2.dev/outrank/1770749496278_kud9z9xrqhl_ai_automation_abstract.png",
        ),
        (
            MUSIC,
            AssetKind::Audio,
            "https://pub-e3bfc0083b0644b296a7080b21024c5f.r2.dev/music/1770749518831_ubk8w8cvv8n_music_Premium_corporate_te.mp3",
        ),
    ]
}

fn fps() -> ReelResult<Fps> {
    Fps::new(FPS, 1)
}

fn canvas() -> Canvas {
    Canvas {
        width: 1280,
        height: 720,
    }
}

/// Transition sequence joining the ten scenes.
pub fn promo_transitions() -> Vec<TransitionSpec> {
    use Presentation as P;
    use TimingCurve as T;
    [
        (P::FlashBlack, T::Snappy),
        (P::Glitch, T::Snappy),
        (P::ZoomIn, T::Spring),
        (P::SlideLeft, T::Smooth),
        (P::WhipPan, T::Snappy),
        (P::BlurDissolve, T::Smooth),
        (P::ZoomOut, T::Spring),
        (P::FlashBlack, T::Snappy),
        (P::BlurDissolve, T::Smooth),
    ]
    .into_iter()
    .map(|(p, t)| TransitionSpec::new(p, t, PROMO_TRANSITION_FRAMES))
    .collect()
}

/// The ten scenes, in order.
pub fn promo_scenes() -> ReelResult<Vec<SceneSpec>> {
    Ok(vec![
        hook()?,
        amplify()?,
        problem()?,
        solution_intro()?,
        feature_demo()?,
        benefits()?,
        magic_moment()?,
        stats()?,
        tagline()?,
        cta()?,
    ])
}

/// Serializable form of the promo.
pub fn promo_def() -> ReelResult<CompositionDef> {
    let assets = assets()
        .into_iter()
        .map(|(key, kind, uri)| {
            (
                key.to_string(),
                AssetRef {
                    kind,
                    uri: uri.to_string(),
                },
            )
        })
        .collect::<BTreeMap<_, _>>();
    Ok(CompositionDef {
        config: CompositionConfig {
            id: PROMO_ID.to_string(),
            duration_frames: PROMO_BUDGET_FRAMES,
            fps: fps()?,
            canvas: canvas(),
            trailing: Default::default(),
        },
        assets,
        audio: Some(AudioBed {
            asset: MUSIC.to_string(),
            volume: 0.4,
            start_frame: 0,
        }),
        scenes: promo_scenes()?,
        transitions: promo_transitions(),
    })
}

/// Build the promo composition.
pub fn promo() -> ReelResult<Composition> {
    let mut b = CompositionBuilder::new(PROMO_ID, fps()?, canvas(), PROMO_BUDGET_FRAMES);
    for (key, kind, uri) in assets() {
        b = b.asset(
            key,
            AssetRef {
                kind,
                uri: uri.to_string(),
            },
        )?;
    }
    b = b.audio(MUSIC, 0.4);

    let mut transitions = promo_transitions().into_iter();
    for (i, scene) in promo_scenes()?.into_iter().enumerate() {
        if i > 0
            && let Some(t) = transitions.next()
        {
            b = b.transition(t.presentation, t.timing, t.duration_frames);
        }
        b = b.scene(scene);
    }
    b.build()
}

fn camera(frames: i64, from: f64, to: f64, ease: Ease) -> ReelResult<Anim> {
    Anim::tween(0, frames, from, to, ease)
}

/// Visible from local frame `at` on.
fn appear_at(at: i64) -> Anim {
    ops::switch(at, 0.0, 1.0)
}

fn dark_background() -> ReelResult<Vec<ElementSpec>> {
    let mut out = vec![
        ElementBuilder::new("grid")
            .prop("opacity", Anim::tween(0, 30, 0.0, 0.5, Ease::Linear)?)
            .build(),
    ];
    for (i, delay) in [0.0, 50.0, 100.0].into_iter().enumerate() {
        out.push(
            ElementBuilder::new(format!("orb{i}"))
                .prop(
                    "translate_x",
                    Anim::Oscillate(Oscillator::cosine(5.0, 35.0)?.delayed(delay)?),
                )
                .prop(
                    "translate_y",
                    Anim::Oscillate(Oscillator::sine(8.0, 25.0)?.delayed(delay)?),
                )
                .prop(
                    "scale",
                    Anim::Breathe(Oscillator::sine(0.1, 40.0)?.delayed(delay)?),
                )
                .build(),
        );
    }
    Ok(out)
}

fn light_background() -> Vec<ElementSpec> {
    vec![
        ElementBuilder::new("dots")
            .prop("opacity", Anim::constant(0.5))
            .build(),
    ]
}

fn words(name: &str, text: &str, start: u64) -> ElementSpec {
    let mut el = ElementBuilder::new(name).text(TextReveal::new(
        RevealKind::FadeInWords,
        text,
        start,
        WORDS_FRAMES,
    ));
    if start > 0 {
        el = el.prop("opacity", appear_at(start as i64));
    }
    el.build()
}

fn chars(name: &str, text: &str, start: u64) -> ElementSpec {
    ElementBuilder::new(name)
        .text(TextReveal::new(
            RevealKind::FadeInChars,
            text,
            start,
            CHARS_FRAMES,
        ))
        .prop("opacity", appear_at(start as i64))
        .build()
}

fn pop_logo() -> ReelResult<ElementBuilder> {
    Ok(ElementBuilder::new("logo").prop("scale", Anim::tween(0, 20, 0.8, 1.0, Ease::POP)?))
}

fn hook() -> ReelResult<SceneSpec> {
    let text = "Research Write Publish Rank";
    let reveal_frames = fps()?.secs_to_frames_round(0.35 * 4.0);
    SceneBuilder::new("hook", PROMO_SCENE_FRAMES[0])
        .camera(camera(90, 1.02, 1.0, Ease::OutCubic)?)
        .elements(dark_background()?)
        .element(
            ElementBuilder::new("headline")
                .text(TextReveal::new(RevealKind::StompStream, text, 0, reveal_frames))
                .build(),
        )
        .build()
}

fn amplify() -> ReelResult<SceneSpec> {
    SceneBuilder::new("amplify", PROMO_SCENE_FRAMES[1])
        .camera(camera(90, 1.0, 1.03, Ease::InOutCubic)?)
        .elements(dark_background()?)
        .element(words("headline", "All on Auto-Pilot", 0))
        .element(chars("subline", "Powered by AI. Built for Growth.", 25))
        .build()
}

fn problem() -> ReelResult<SceneSpec> {
    let shake = ops::step(
        45,
        Anim::Oscillate(Oscillator::sine(2.0, 1.25)?),
        Anim::constant(0.0),
    );
    SceneBuilder::new("problem", PROMO_SCENE_FRAMES[2])
        .camera(camera(90, 1.05, 1.0, Ease::OutCubic)?)
        .elements(light_background())
        .element(ElementBuilder::new("content").prop("translate_x", shake).build())
        .element(words("headline", "Still writing SEO content manually?", 0))
        .element(chars(
            "subline",
            "Hours of research. Endless revisions. Zero scale.",
            30,
        ))
        .build()
}

fn solution_intro() -> ReelResult<SceneSpec> {
    SceneBuilder::new("solution_intro", PROMO_SCENE_FRAMES[3])
        .camera(camera(90, 1.1, 1.0, Ease::OutCubic)?)
        .elements(dark_background()?)
        .element(
            pop_logo()?
                .prop("opacity", Anim::tween(0, 15, 0.0, 1.0, Ease::Linear)?)
                .build(),
        )
        .element(words("tagline", "AI-Powered SEO Content Automation", 25))
        .build()
}

fn feature_demo() -> ReelResult<SceneSpec> {
    SceneBuilder::new("feature_demo", PROMO_SCENE_FRAMES[4])
        .camera(camera(120, 1.0, 1.02, Ease::InOutCubic)?)
        .elements(light_background())
        .element(
            ElementBuilder::new("mockup")
                .asset(SCREENSHOT)
                .prop("scale", Anim::tween(0, 25, 0.9, 1.0, Ease::OutCubic)?)
                .prop("translate_y", Anim::tween(0, 25, 30.0, 0.0, Ease::OutCubic)?)
                .prop(
                    "rotate_y_deg",
                    Anim::tween(0, 120, -5.0, 5.0, Ease::InOutSine)?,
                )
                .build(),
        )
        .element(
            ElementBuilder::new("badges")
                .prop("opacity", appear_at(40))
                .prop("translate_y", ops::switch(40, 20.0, 0.0))
                .build(),
        )
        .element(
            ElementBuilder::new("badge")
                .prop("opacity", appear_at(0))
                .prop("translate_y", ops::switch(0, 10.0, 0.0))
                .repeat(
                    ["Keyword Research", "SERP Analysis", "Auto-Publish"],
                    Stagger::uniform(40, 8, 3),
                )
                .build(),
        )
        .build()
}

fn benefits() -> ReelResult<SceneSpec> {
    SceneBuilder::new("benefits", PROMO_SCENE_FRAMES[5])
        .camera(camera(90, 1.0, 1.02, Ease::InOutCubic)?)
        .elements(dark_background()?)
        .element(words("headline", "Scale Your Organic Traffic", 0))
        .element(
            ElementBuilder::new("benefit")
                .prop("opacity", Anim::tween(0, 15, 0.0, 1.0, Ease::Linear)?)
                .prop("translate_y", Anim::tween(0, 15, 30.0, 0.0, Ease::POP)?)
                .repeat(
                    ["10x Faster Content", "SEO-Optimized", "Auto Publishing"],
                    Stagger::uniform(20, 12, 3),
                )
                .build(),
        )
        .build()
}

fn magic_moment() -> ReelResult<SceneSpec> {
    SceneBuilder::new("magic_moment", PROMO_SCENE_FRAMES[6])
        .element(
            ElementBuilder::new("image")
                .asset(AI_ABSTRACT)
                .prop("scale", Anim::tween(0, 120, 1.05, 1.15, Ease::InOutSine)?)
                .build(),
        )
        .element(words("headline", "AI That Works While You Sleep", 15))
        .build()
}

fn stats() -> ReelResult<SceneSpec> {
    SceneBuilder::new("stats", PROMO_SCENE_FRAMES[7])
        .camera(camera(90, 1.02, 1.0, Ease::OutCubic)?)
        .elements(light_background())
        .element(
            ElementBuilder::new("counter")
                .text(TextReveal::new(
                    RevealKind::Counter {
                        from: 0.0,
                        to: 50.0,
                    },
                    "K+",
                    0,
                    COUNTER_FRAMES,
                ))
                .build(),
        )
        .element(words("caption", "Articles Created & Published", 20))
        .element(
            ElementBuilder::new("rating")
                .prop("opacity", appear_at(40))
                .prop("translate_y", ops::switch(40, 15.0, 0.0))
                .build(),
        )
        .element(
            ElementBuilder::new("star")
                .prop("opacity", ops::switch(0, 0.3, 1.0))
                .repeat(["★"; 5], Stagger::uniform(40, 4, 5))
                .build(),
        )
        .build()
}

fn tagline() -> ReelResult<SceneSpec> {
    let reveal_frames = fps()?.secs_to_frames_round(0.4 * 3.0);
    SceneBuilder::new("tagline", PROMO_SCENE_FRAMES[8])
        .camera(camera(90, 1.0, 1.02, Ease::InOutCubic)?)
        .elements(dark_background()?)
        .element(
            ElementBuilder::new("headline")
                .text(
                    TextReveal::new(
                        RevealKind::PushStream,
                        "Grow Organic Traffic on Auto-Pilot",
                        0,
                        reveal_frames,
                    )
                    .grouped(2),
                )
                .build(),
        )
        .build()
}

fn cta() -> ReelResult<SceneSpec> {
    let pulse = ops::step(
        25,
        Anim::constant(0.9),
        Anim::Breathe(Oscillator::sine(0.03, 15.0)?),
    );
    let glow = ops::remap(
        Anim::Oscillate(Oscillator::sine(1.0, 20.0)?),
        [-1.0, 1.0],
        [40.0, 60.0],
        InterpolateOpts::default(),
    );
    SceneBuilder::new("cta", PROMO_SCENE_FRAMES[9])
        .camera(camera(120, 1.05, 1.0, Ease::OutCubic)?)
        .elements(dark_background()?)
        .element(pop_logo()?.build())
        .element(
            ElementBuilder::new("button")
                .prop("opacity", appear_at(25))
                .prop("translate_y", ops::switch(25, 20.0, 0.0))
                .prop("scale", pulse)
                .prop("glow_px", glow)
                .build(),
        )
        .element(
            ElementBuilder::new("subtext")
                .prop("opacity", appear_at(40))
                .build(),
        )
        .build()
}

#[cfg(test)]
#[path = "../../tests/unit/composition/promo.rs"]
mod tests;
