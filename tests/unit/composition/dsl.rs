use super::*;
use crate::animation::ease::Ease;
use crate::foundation::core::FrameIndex;

fn fps() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn canvas() -> Canvas {
    Canvas {
        width: 640,
        height: 360,
    }
}

fn plain(id: &str, d: u64) -> SceneSpec {
    SceneBuilder::new(id, d).build().unwrap()
}

#[test]
fn builder_resolves_and_checks_budget() {
    let comp = CompositionBuilder::new("demo", fps(), canvas(), 60)
        .scene(plain("a", 30))
        .transition(Presentation::Crossfade, TimingCurve::Smooth, 6)
        .scene(plain("b", 30))
        .build()
        .unwrap();
    assert_eq!(comp.timeline().len_frames(), 54);
    assert_eq!(comp.trailing_frames(), 6);
    assert_eq!(comp.config().trailing, TrailingPolicy::Hold);

    let err = CompositionBuilder::new("demo", fps(), canvas(), 50)
        .scene(plain("a", 30))
        .transition(Presentation::Crossfade, TimingCurve::Smooth, 6)
        .scene(plain("b", 30))
        .build()
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn duplicate_asset_is_rejected() {
    let b = CompositionBuilder::new("demo", fps(), canvas(), 60)
        .image_asset("shot", "shot.png")
        .unwrap();
    assert!(b.image_asset("shot", "other.png").is_err());
}

#[test]
fn scene_builder_validates() {
    assert!(SceneBuilder::new("empty", 0).build().is_err());
    let el = ElementBuilder::new("x").build();
    assert!(
        SceneBuilder::new("dup", 10)
            .element(el.clone())
            .element(el)
            .build()
            .is_err()
    );
}

#[test]
fn element_builder_collects_props_and_repeat() {
    let el = ElementBuilder::new("badge")
        .prop("opacity", Anim::constant(0.5))
        .prop("opacity", Anim::constant(1.0))
        .repeat(["a", "b"], Stagger::uniform(10, 5, 2))
        .build();
    assert_eq!(el.props.len(), 1);
    assert_eq!(el.props["opacity"], Anim::constant(1.0));
    assert_eq!(el.repeat.as_ref().unwrap().labels, vec!["a", "b"]);
}

#[test]
fn code_scene_plugs_into_builder() {
    #[derive(Debug)]
    struct Pulse;
    impl Scene for Pulse {
        fn id(&self) -> &str {
            "pulse"
        }
        fn duration_frames(&self) -> u64 {
            20
        }
        fn render(
            &self,
            ctx: crate::animation::anim::SampleCtx,
        ) -> crate::scene::render_state::RenderState {
            let mut s = crate::scene::render_state::RenderState::new();
            s.set_number("local", ctx.local as f64);
            s
        }
    }

    let comp = CompositionBuilder::new("demo", fps(), canvas(), 40)
        .scene(Pulse)
        .transition(Presentation::Glitch, TimingCurve::Snappy, 4)
        .scene(
            SceneBuilder::new("tail", 20)
                .camera(Anim::tween(0, 20, 1.0, 1.1, Ease::OutCubic).unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    assert_eq!(comp.timeline().len_frames(), 36);
    assert!(comp.timeline().resolve(FrameIndex(17)).is_some());
}
