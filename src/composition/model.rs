use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path, sync::Arc};

use crate::{
    foundation::core::{Canvas, Fps, FrameIndex},
    foundation::error::{ReelError, ReelResult},
    scene::model::{Scene, SceneSpec},
    timeline::{sequencer::Timeline, transition::TransitionSpec},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// What the frames between the resolved timeline length and the budget show.
pub enum TrailingPolicy {
    /// Keep showing the last scene's final frame.
    #[default]
    Hold,
    /// Show no scene.
    Blank,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Fixed composition declaration: identity, frame budget, rate and canvas.
pub struct CompositionConfig {
    /// Composition identifier.
    pub id: String,
    /// Declared total length in frames.
    pub duration_frames: u64,
    /// Frame rate.
    pub fps: Fps,
    /// Output canvas.
    pub canvas: Canvas,
    /// Trailing buffer behavior.
    #[serde(default)]
    pub trailing: TrailingPolicy,
}

impl CompositionConfig {
    /// Check identity, budget, fps and canvas.
    pub fn validate(&self) -> ReelResult<()> {
        if self.id.trim().is_empty() {
            return Err(ReelError::configuration("composition id must be non-empty"));
        }
        if self.duration_frames == 0 {
            return Err(ReelError::configuration(
                "composition duration must be > 0 frames",
            ));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(ReelError::configuration("fps must have num>0 and den>0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::configuration("canvas width/height must be > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Kind of opaque media referenced by key.
pub enum AssetKind {
    /// Still image.
    Image,
    /// Audio track.
    Audio,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Opaque media reference; the engine never loads it.
pub struct AssetRef {
    /// Media kind.
    pub kind: AssetKind,
    /// Source location, passed through to the renderer.
    pub uri: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Background audio track for the whole composition.
pub struct AudioBed {
    /// Audio asset key.
    pub asset: String,
    /// Linear gain in `[0, 1]`.
    #[serde(default = "default_volume")]
    pub volume: f64,
    /// Global frame at which playback starts.
    #[serde(default)]
    pub start_frame: u64,
}

fn default_volume() -> f64 {
    1.0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Audio playback state at one frame.
pub struct AudioCue {
    /// Audio asset key.
    pub asset: String,
    /// Source location.
    pub uri: String,
    /// Linear gain.
    pub volume: f64,
    /// Frames since playback started.
    pub offset_frames: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Serializable composition: config, assets, audio, declarative scenes and transitions.
pub struct CompositionDef {
    /// Composition declaration.
    pub config: CompositionConfig,
    /// Asset table keyed by stable user-facing keys.
    #[serde(default)]
    pub assets: BTreeMap<String, AssetRef>,
    /// Optional background audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioBed>,
    /// Scenes in order.
    pub scenes: Vec<SceneSpec>,
    /// Transitions in order, one fewer than scenes.
    #[serde(default)]
    pub transitions: Vec<TransitionSpec>,
}

impl CompositionDef {
    /// Parse a composition from JSON text.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ReelError::serde(format!("parse composition JSON: {e}")))
    }

    /// Parse a composition from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse composition JSON: {e}")))
    }

    /// Parse a composition from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::configuration(format!("open composition JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty JSON.
    pub fn to_json_pretty(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ReelError::serde(format!("serialize composition JSON: {e}")))
    }

    /// Validate and resolve into a runnable [`Composition`].
    pub fn build(self) -> ReelResult<Composition> {
        let scenes = self
            .scenes
            .into_iter()
            .map(|s| Arc::new(s) as Arc<dyn Scene>)
            .collect();
        Composition::new(
            self.config,
            self.assets,
            self.audio,
            scenes,
            self.transitions,
        )
    }
}

/// Validated composition: declaration plus resolved timeline. Immutable.
#[derive(Clone, Debug)]
pub struct Composition {
    config: CompositionConfig,
    assets: BTreeMap<String, AssetRef>,
    audio: Option<AudioBed>,
    timeline: Timeline,
}

impl Composition {
    /// Resolve the timeline and check it against the declared budget.
    #[tracing::instrument(skip_all, fields(id = %config.id, scenes = scenes.len()))]
    pub fn new(
        config: CompositionConfig,
        assets: BTreeMap<String, AssetRef>,
        audio: Option<AudioBed>,
        scenes: Vec<Arc<dyn Scene>>,
        transitions: Vec<TransitionSpec>,
    ) -> ReelResult<Self> {
        config.validate()?;
        for (key, asset) in &assets {
            if key.trim().is_empty() {
                return Err(ReelError::configuration("asset key must be non-empty"));
            }
            if asset.uri.trim().is_empty() {
                return Err(ReelError::configuration(format!(
                    "asset '{key}' uri must be non-empty"
                )));
            }
        }
        for (i, scene) in scenes.iter().enumerate() {
            for key in scene.asset_keys() {
                match assets.get(key) {
                    Some(a) if a.kind == AssetKind::Image => {}
                    Some(_) => {
                        return Err(ReelError::scene(
                            i,
                            format!("asset '{key}' is not an image"),
                        ));
                    }
                    None => {
                        return Err(ReelError::scene(i, format!("unknown asset key '{key}'")));
                    }
                }
            }
        }
        if let Some(bed) = &audio {
            match assets.get(&bed.asset) {
                Some(a) if a.kind == AssetKind::Audio => {}
                Some(_) => {
                    return Err(ReelError::configuration(format!(
                        "audio asset '{}' is not audio",
                        bed.asset
                    )));
                }
                None => {
                    return Err(ReelError::configuration(format!(
                        "unknown audio asset key '{}'",
                        bed.asset
                    )));
                }
            }
            if !bed.volume.is_finite() || !(0.0..=1.0).contains(&bed.volume) {
                return Err(ReelError::configuration(
                    "audio volume must be finite and in [0, 1]",
                ));
            }
            if bed.start_frame >= config.duration_frames {
                return Err(ReelError::configuration(
                    "audio start_frame must be inside the composition",
                ));
            }
        }

        let timeline = Timeline::new(scenes, transitions)?;
        if timeline.len_frames() > config.duration_frames {
            return Err(ReelError::configuration(format!(
                "timeline resolves to {} frames, exceeding the {}-frame budget",
                timeline.len_frames(),
                config.duration_frames
            )));
        }
        tracing::debug!(
            len_frames = timeline.len_frames(),
            budget = config.duration_frames,
            "composition built"
        );

        Ok(Self {
            config,
            assets,
            audio,
            timeline,
        })
    }

    /// Declaration this composition was built from.
    pub fn config(&self) -> &CompositionConfig {
        &self.config
    }

    /// Resolved timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Asset table.
    pub fn assets(&self) -> &BTreeMap<String, AssetRef> {
        &self.assets
    }

    /// Background audio, if any.
    pub fn audio(&self) -> Option<&AudioBed> {
        self.audio.as_ref()
    }

    /// Declared budget in frames.
    pub fn duration_frames(&self) -> u64 {
        self.config.duration_frames
    }

    /// Frame rate.
    pub fn fps(&self) -> Fps {
        self.config.fps
    }

    /// Frames between the resolved timeline length and the budget.
    pub fn trailing_frames(&self) -> u64 {
        self.config.duration_frames - self.timeline.len_frames()
    }

    /// Audio playback state at `frame`, if the bed has started.
    pub fn audio_at(&self, frame: FrameIndex) -> Option<AudioCue> {
        let bed = self.audio.as_ref()?;
        if frame.0 < bed.start_frame || frame.0 >= self.config.duration_frames {
            return None;
        }
        let asset = self.assets.get(&bed.asset)?;
        Some(AudioCue {
            asset: bed.asset.clone(),
            uri: asset.uri.clone(),
            volume: bed.volume,
            offset_frames: frame.0 - bed.start_frame,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
