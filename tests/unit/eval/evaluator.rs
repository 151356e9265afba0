use super::*;
use crate::composition::dsl::{CompositionBuilder, ElementBuilder, SceneBuilder};
use crate::composition::promo::promo;
use crate::foundation::core::{Canvas, Fps};
use crate::animation::anim::Anim;
use crate::animation::ease::Ease;

fn small(trailing: TrailingPolicy) -> Composition {
    let scene = |id: &str| {
        SceneBuilder::new(id, 20)
            .element(
                ElementBuilder::new("box")
                    .prop("opacity", Anim::tween(0, 19, 0.0, 1.0, Ease::Linear).unwrap())
                    .build(),
            )
            .build()
            .unwrap()
    };
    CompositionBuilder::new("small", Fps::new(30, 1).unwrap(), Canvas { width: 64, height: 64 }, 40)
        .trailing(trailing)
        .scene(scene("a"))
        .transition(Presentation::Crossfade, TimingCurve::Linear, 5)
        .scene(scene("b"))
        .build()
        .unwrap()
}

#[test]
fn out_of_range_is_rejected() {
    let comp = small(TrailingPolicy::Hold);
    let err = Evaluator::eval_frame(&comp, FrameIndex(40)).unwrap_err();
    assert!(matches!(err, ReelError::OutOfRange { frame: 40, budget: 40 }));
    assert!(Evaluator::eval_frame(&comp, FrameIndex(39)).is_ok());
}

#[test]
fn transition_frames_carry_both_scenes() {
    let comp = small(TrailingPolicy::Hold);
    let f = Evaluator::eval_frame(&comp, FrameIndex(17)).unwrap();
    assert!(!f.buffer);
    match f.content {
        FrameContent::Transition {
            transition,
            outgoing,
            incoming,
        } => {
            assert_eq!(transition.index, 0);
            assert_eq!(transition.progress, 0.5);
            assert_eq!((outgoing.id.as_str(), outgoing.local_frame), ("a", 17));
            assert_eq!((incoming.id.as_str(), incoming.local_frame), ("b", 2));
        }
        other => panic!("expected transition, got {other:?}"),
    }
}

#[test]
fn trailing_policies() {
    let hold = small(TrailingPolicy::Hold);
    assert_eq!(hold.timeline().len_frames(), 35);
    let f = Evaluator::eval_frame(&hold, FrameIndex(38)).unwrap();
    assert!(f.buffer);
    match &f.content {
        FrameContent::Scene { scene } => {
            assert_eq!(scene.id, "b");
            assert_eq!(scene.local_frame, 19);
            assert_eq!(
                scene.state.number_at(&["elements", "box", "opacity"]),
                Some(1.0)
            );
        }
        other => panic!("expected held scene, got {other:?}"),
    }

    let blank = small(TrailingPolicy::Blank);
    let f = Evaluator::eval_frame(&blank, FrameIndex(35)).unwrap();
    assert!(f.buffer);
    assert_eq!(f.content, FrameContent::Blank);
}

#[test]
fn parallel_matches_serial() {
    let comp = promo().unwrap();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(870)).unwrap();
    let (serial, serial_stats) =
        eval_range_with_stats(&comp, range, &EvalThreading::default()).unwrap();
    let (parallel, parallel_stats) = eval_range_with_stats(
        &comp,
        range,
        &EvalThreading {
            parallel: true,
            chunk_size: 37,
            threads: Some(3),
        },
    )
    .unwrap();
    assert_eq!(serial.len(), 870);
    assert_eq!(serial, parallel);
    assert_eq!(serial_stats, parallel_stats);
    assert!(serial_stats.frames_distinct < serial_stats.frames_total);
    for (i, f) in serial.iter().enumerate() {
        assert_eq!(f.frame.0, i as u64);
    }
}

#[test]
fn range_checks() {
    let comp = small(TrailingPolicy::Hold);
    let past = FrameRange::new(FrameIndex(30), FrameIndex(41)).unwrap();
    assert!(Evaluator::eval_range(&comp, past, &EvalThreading::default()).is_err());
    let empty = FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap();
    assert!(Evaluator::eval_range(&comp, empty, &EvalThreading::default()).is_err());
    let zero_threads = EvalThreading {
        parallel: true,
        chunk_size: 0,
        threads: Some(0),
    };
    let ok = FrameRange::new(FrameIndex(0), FrameIndex(5)).unwrap();
    assert!(Evaluator::eval_range(&comp, ok, &zero_threads).is_err());
}

#[test]
fn frame_state_serializes_with_kind_tags() {
    let comp = promo().unwrap();
    let f = Evaluator::eval_frame(&comp, FrameIndex(80)).unwrap();
    let v = serde_json::to_value(&f).unwrap();
    assert_eq!(v["content"]["kind"], "transition");
    assert_eq!(v["content"]["transition"]["presentation"], "flash_black");
    assert_eq!(v["audio"]["volume"], 0.4);
}
