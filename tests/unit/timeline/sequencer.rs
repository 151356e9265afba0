use super::*;
use crate::foundation::error::ConfigSite;
use crate::scene::model::SceneSpec;
use crate::timeline::transition::{Presentation, TimingCurve};

const PROMO: [u64; 10] = [90, 75, 90, 80, 120, 90, 100, 90, 90, 120];

fn scene(id: &str, d: u64) -> Arc<dyn Scene> {
    Arc::new(SceneSpec {
        id: id.to_string(),
        duration_frames: d,
        camera: None,
        elements: Vec::new(),
    })
}

fn linear(t: u64) -> TransitionSpec {
    TransitionSpec::new(Presentation::Crossfade, TimingCurve::Linear, t)
}

fn timeline(durations: &[u64], overlaps: &[u64]) -> ReelResult<Timeline> {
    let scenes = durations
        .iter()
        .enumerate()
        .map(|(i, &d)| scene(&format!("s{i}"), d))
        .collect();
    Timeline::new(scenes, overlaps.iter().map(|&t| linear(t)).collect())
}

#[test]
fn promo_durations_resolve_to_837() {
    let (starts, len) = resolve_starts(&PROMO, &[12; 9]).unwrap();
    assert_eq!(len, 837);
    assert_eq!(len, PROMO.iter().sum::<u64>() - 9 * 12);
    assert_eq!(starts[0], 0);
    assert_eq!(starts[1], 78);
    assert_eq!(starts[2], 141);
    for i in 1..starts.len() {
        assert_eq!(starts[i], starts[i - 1] + PROMO[i - 1] - 12);
    }
}

#[test]
fn single_scene_needs_no_transitions() {
    assert_eq!(resolve_starts(&[40], &[]).unwrap(), (vec![0], 40));
}

#[test]
fn malformed_timelines_name_the_offender() {
    assert!(resolve_starts(&[], &[]).unwrap_err().is_configuration());
    assert!(resolve_starts(&[10, 10], &[]).unwrap_err().is_configuration());
    assert_eq!(
        resolve_starts(&[10, 0, 10], &[2, 2]).unwrap_err().site(),
        Some(ConfigSite::Scene(1))
    );
    assert_eq!(
        resolve_starts(&[10, 10], &[0]).unwrap_err().site(),
        Some(ConfigSite::Transition(0))
    );
    // t must be strictly shorter than both neighbors.
    assert_eq!(
        resolve_starts(&[30, 10, 30], &[5, 10]).unwrap_err().site(),
        Some(ConfigSite::Transition(1))
    );
    // Incoming and outgoing overlaps collide inside scene 1.
    assert_eq!(
        resolve_starts(&[30, 10, 30], &[6, 6]).unwrap_err().site(),
        Some(ConfigSite::Scene(1))
    );
    // Touching is fine.
    assert!(resolve_starts(&[30, 10, 30], &[5, 5]).is_ok());
    // Overlap sums past u64::MAX are a collision, not a panic.
    assert_eq!(
        resolve_starts(&[u64::MAX; 3], &[u64::MAX - 1; 2])
            .unwrap_err()
            .site(),
        Some(ConfigSite::Scene(1))
    );
    // Lengths past u64::MAX are rejected at the scene that overflows.
    assert_eq!(
        resolve_starts(&[u64::MAX, u64::MAX], &[1]).unwrap_err().site(),
        Some(ConfigSite::Scene(1))
    );
}

#[test]
fn every_frame_resolves_to_exactly_one_state() {
    let tl = timeline(&PROMO, &[12; 9]).unwrap();
    let mut transitions = 0;
    for f in 0..tl.len_frames() {
        match tl.resolve(FrameIndex(f)).unwrap() {
            TimelineState::Single { scene, local } => {
                let r = tl.scene_range(scene).unwrap();
                assert_eq!(r.start.0 + local, f);
                assert!(local < PROMO[scene]);
            }
            TimelineState::Transition {
                transition,
                outgoing,
                incoming,
                outgoing_local,
                incoming_local,
                progress,
            } => {
                transitions += 1;
                assert_eq!(incoming, outgoing + 1);
                assert_eq!(transition, outgoing);
                assert_eq!(outgoing_local, PROMO[outgoing] - 12 + incoming_local);
                assert!((0.0..=1.0).contains(&progress));
            }
        }
    }
    assert_eq!(transitions, 9 * 12);
    assert_eq!(tl.resolve(FrameIndex(837)), None);
    assert_eq!(tl.resolve(FrameIndex(869)), None);
}

#[test]
fn transition_boundaries() {
    let tl = timeline(&[20, 20], &[4]).unwrap();
    assert_eq!(tl.len_frames(), 36);
    assert_eq!(
        tl.resolve(FrameIndex(15)),
        Some(TimelineState::Single { scene: 0, local: 15 })
    );
    match tl.resolve(FrameIndex(16)).unwrap() {
        TimelineState::Transition {
            outgoing_local,
            incoming_local,
            progress,
            ..
        } => {
            assert_eq!((outgoing_local, incoming_local), (16, 0));
            assert_eq!(progress, 0.0);
        }
        other => panic!("expected transition, got {other:?}"),
    }
    match tl.resolve(FrameIndex(19)).unwrap() {
        TimelineState::Transition {
            outgoing_local,
            incoming_local,
            progress,
            ..
        } => {
            assert_eq!((outgoing_local, incoming_local), (19, 3));
            assert_eq!(progress, 1.0);
        }
        other => panic!("expected transition, got {other:?}"),
    }
    assert_eq!(
        tl.resolve(FrameIndex(20)),
        Some(TimelineState::Single { scene: 1, local: 4 })
    );
}

#[test]
fn layout_lists_windows() {
    let tl = timeline(&[20, 20, 20], &[4, 2]).unwrap();
    let layout = tl.layout();
    assert_eq!(layout.len_frames, 54);
    assert_eq!(layout.scenes[1], FrameRange::new(FrameIndex(16), FrameIndex(36)).unwrap());
    assert_eq!(
        layout.transitions[1],
        FrameRange::new(FrameIndex(34), FrameIndex(36)).unwrap()
    );
    assert_eq!(layout.scenes.last().unwrap().end.0, layout.len_frames);
}

#[test]
fn invalid_scene_is_reported_by_index() {
    let scenes = vec![scene("ok", 10), scene(" ", 10)];
    let err = Timeline::new(scenes, vec![linear(2)]).unwrap_err();
    assert_eq!(err.site(), Some(ConfigSite::Scene(1)));
}
