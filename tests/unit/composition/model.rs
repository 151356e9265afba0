use super::*;
use crate::foundation::error::ConfigSite;
use crate::scene::model::ElementSpec;
use crate::timeline::transition::{Presentation, TimingCurve};

fn config(budget: u64) -> CompositionConfig {
    CompositionConfig {
        id: "Main".to_string(),
        duration_frames: budget,
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas {
            width: 1280,
            height: 720,
        },
        trailing: TrailingPolicy::Hold,
    }
}

fn scene(id: &str, d: u64) -> SceneSpec {
    SceneSpec {
        id: id.to_string(),
        duration_frames: d,
        camera: None,
        elements: Vec::new(),
    }
}

fn def(budget: u64) -> CompositionDef {
    CompositionDef {
        config: config(budget),
        assets: BTreeMap::new(),
        audio: None,
        scenes: vec![scene("a", 40), scene("b", 40)],
        transitions: vec![TransitionSpec::new(
            Presentation::Wipe,
            TimingCurve::Linear,
            10,
        )],
    }
}

#[test]
fn budget_is_checked_at_build() {
    let comp = def(70).build().unwrap();
    assert_eq!(comp.timeline().len_frames(), 70);
    assert_eq!(comp.trailing_frames(), 0);

    let comp = def(100).build().unwrap();
    assert_eq!(comp.trailing_frames(), 30);

    let err = def(69).build().unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("budget"));
}

#[test]
fn config_rejects_degenerate_values() {
    let mut c = config(10);
    c.id = String::new();
    assert!(c.validate().is_err());
    let mut c = config(0);
    assert!(c.validate().is_err());
    c = config(10);
    c.canvas.width = 0;
    assert!(c.validate().is_err());
}

#[test]
fn unknown_asset_key_names_the_scene() {
    let mut d = def(100);
    d.scenes[1].elements.push(ElementSpec {
        name: "shot".to_string(),
        asset: Some("screenshot".to_string()),
        text: None,
        props: BTreeMap::new(),
        repeat: None,
    });
    let err = d.clone().build().unwrap_err();
    assert_eq!(err.site(), Some(ConfigSite::Scene(1)));

    d.assets.insert(
        "screenshot".to_string(),
        AssetRef {
            kind: AssetKind::Image,
            uri: "screenshot.png".to_string(),
        },
    );
    d.build().unwrap();
}

#[test]
fn audio_bed_plays_from_start_frame() {
    let mut d = def(100);
    d.assets.insert(
        "music".to_string(),
        AssetRef {
            kind: AssetKind::Audio,
            uri: "music.mp3".to_string(),
        },
    );
    d.audio = Some(AudioBed {
        asset: "music".to_string(),
        volume: 0.4,
        start_frame: 5,
    });
    let comp = d.clone().build().unwrap();
    assert_eq!(comp.audio_at(FrameIndex(4)), None);
    let cue = comp.audio_at(FrameIndex(8)).unwrap();
    assert_eq!(cue.offset_frames, 3);
    assert_eq!(cue.volume, 0.4);
    assert_eq!(cue.uri, "music.mp3");
    assert_eq!(comp.audio_at(FrameIndex(100)), None);

    let mut loud = d.clone();
    if let Some(bed) = loud.audio.as_mut() {
        bed.volume = 1.5;
    }
    assert!(loud.build().is_err());

    let mut wrong_kind = d;
    if let Some(bed) = wrong_kind.audio.as_mut() {
        bed.asset = "nope".to_string();
    }
    assert!(wrong_kind.build().is_err());
}

#[test]
fn json_round_trips_and_rejects_garbage() {
    let d = def(90);
    let json = d.to_json_pretty().unwrap();
    let back = CompositionDef::from_json_str(&json).unwrap();
    assert_eq!(back, d);
    assert_eq!(back.config.trailing, TrailingPolicy::Hold);

    assert!(matches!(
        CompositionDef::from_json_str("{\"config\": 1}"),
        Err(ReelError::Serde(_))
    ));
    assert!(CompositionDef::from_path("/definitely/not/here.json").is_err());
}
