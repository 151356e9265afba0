use super::*;
use crate::animation::anim::SampleCtx;
use crate::foundation::core::FrameIndex;
use crate::scene::model::Scene;

fn scene(id: &str) -> SceneSpec {
    promo_scenes()
        .unwrap()
        .into_iter()
        .find(|s| s.id == id)
        .unwrap()
}

fn ctx(local: i64) -> SampleCtx {
    SampleCtx::local(local)
}

#[test]
fn promo_fits_its_budget() {
    let comp = promo().unwrap();
    assert_eq!(comp.config().id, "Main");
    assert_eq!(comp.fps().num, 30);
    assert_eq!(comp.timeline().scenes().len(), 10);
    assert_eq!(comp.timeline().transitions().len(), 9);
    assert_eq!(comp.timeline().len_frames(), 837);
    assert_eq!(comp.duration_frames(), 870);
    assert_eq!(comp.trailing_frames(), 33);
    for (s, d) in comp.timeline().scenes().iter().zip(PROMO_SCENE_FRAMES) {
        assert_eq!(s.duration_frames(), d);
    }
}

#[test]
fn def_and_builder_agree() {
    let from_def = promo_def().unwrap().build().unwrap();
    let built = promo().unwrap();
    assert_eq!(from_def.timeline().layout(), built.timeline().layout());
    assert_eq!(from_def.config(), built.config());
    assert_eq!(from_def.assets(), built.assets());
    assert_eq!(from_def.audio(), built.audio());
}

#[test]
fn def_survives_json() {
    let def = promo_def().unwrap();
    let json = def.to_json_pretty().unwrap();
    let back = CompositionDef::from_json_str(&json).unwrap();
    assert_eq!(back, def);
}

#[test]
fn transition_names_follow_the_cut_list() {
    let names: Vec<(&str, &str)> = promo_transitions()
        .iter()
        .map(|t| (t.presentation.name(), t.timing.name()))
        .collect();
    assert_eq!(names[0], ("flash_black", "snappy"));
    assert_eq!(names[2], ("zoom_in", "spring"));
    assert_eq!(names[6], ("zoom_out", "spring"));
    assert_eq!(names[8], ("blur_dissolve", "smooth"));
}

#[test]
fn audio_bed_runs_the_whole_budget() {
    let comp = promo().unwrap();
    let cue = comp.audio_at(FrameIndex(0)).unwrap();
    assert_eq!(cue.volume, 0.4);
    assert!(comp.audio_at(FrameIndex(869)).is_some());
    assert!(comp.audio_at(FrameIndex(870)).is_none());
}

#[test]
fn problem_shake_stops_at_45() {
    let s = scene("problem");
    let at = |f| {
        s.render(ctx(f))
            .number_at(&["elements", "content", "translate_x"])
            .unwrap()
    };
    assert!(at(44).abs() > 0.0);
    assert!(at(44).abs() <= 2.0);
    assert_eq!(at(45), 0.0);
    assert_eq!(at(80), 0.0);
}

#[test]
fn logo_pops_past_full_size() {
    let s = scene("solution_intro");
    let peak = (15..20)
        .map(|f| {
            s.render(ctx(f))
                .number_at(&["elements", "logo", "scale"])
                .unwrap()
        })
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
    assert_eq!(
        s.render(ctx(20))
            .number_at(&["elements", "logo", "scale"]),
        Some(1.0)
    );
}

#[test]
fn badges_and_stars_switch_in_order() {
    let s = scene("feature_demo");
    let badge = |f, i: usize| {
        let key = format!("item{i:02}");
        s.render(ctx(f))
            .number_at(&["elements", "badge", "items", key.as_str(), "opacity"])
            .unwrap()
    };
    assert_eq!(badge(47, 1), 0.0);
    assert_eq!(badge(48, 1), 1.0);
    assert_eq!(badge(55, 2), 0.0);
    assert_eq!(badge(56, 2), 1.0);

    let s = scene("stats");
    let star = s
        .render(ctx(43))
        .number_at(&["elements", "star", "items", "item01", "opacity"]);
    assert_eq!(star, Some(0.3));
}

#[test]
fn cta_button_pulses_after_25() {
    let s = scene("cta");
    let scale = |f| {
        s.render(ctx(f))
            .number_at(&["elements", "button", "scale"])
            .unwrap()
    };
    assert_eq!(scale(24), 0.9);
    for f in 25..120 {
        assert!((0.97..=1.03).contains(&scale(f)));
    }
    for f in 0..120 {
        let glow = s
            .render(ctx(f))
            .number_at(&["elements", "button", "glow_px"])
            .unwrap();
        assert!((40.0..=60.0).contains(&glow));
    }
}

#[test]
fn orbs_float_with_phase_offsets() {
    let s = scene("hook");
    let y = |orb: &str| {
        s.render(ctx(0))
            .number_at(&["elements", orb, "translate_y"])
            .unwrap()
    };
    assert_eq!(y("orb0"), 0.0);
    assert!((y("orb1") - 8.0 * (50.0f64 / 25.0).sin()).abs() < 1e-12);
    assert_eq!(
        s.render(ctx(30))
            .number_at(&["elements", "grid", "opacity"]),
        Some(0.5)
    );
}
