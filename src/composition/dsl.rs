use std::{collections::BTreeMap, sync::Arc};

use crate::{
    animation::{anim::Anim, stagger::Stagger},
    composition::model::{
        AssetKind, AssetRef, AudioBed, Composition, CompositionConfig, TrailingPolicy,
    },
    foundation::core::{Canvas, Fps},
    foundation::error::{ReelError, ReelResult},
    scene::{
        model::{ElementSpec, Repeat, Scene, SceneSpec},
        reveal::TextReveal,
    },
    timeline::transition::{Presentation, TimingCurve, TransitionSpec},
};

/// Fluent builder for a [`Composition`]; all checks run in [`CompositionBuilder::build`].
pub struct CompositionBuilder {
    config: CompositionConfig,
    assets: BTreeMap<String, AssetRef>,
    audio: Option<AudioBed>,
    scenes: Vec<Arc<dyn Scene>>,
    transitions: Vec<TransitionSpec>,
}

impl CompositionBuilder {
    /// Start a composition with a fixed budget of `duration_frames`.
    pub fn new(id: impl Into<String>, fps: Fps, canvas: Canvas, duration_frames: u64) -> Self {
        Self {
            config: CompositionConfig {
                id: id.into(),
                duration_frames,
                fps,
                canvas,
                trailing: TrailingPolicy::default(),
            },
            assets: BTreeMap::new(),
            audio: None,
            scenes: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Trailing buffer behavior.
    pub fn trailing(mut self, policy: TrailingPolicy) -> Self {
        self.config.trailing = policy;
        self
    }

    /// Register an asset under a unique key.
    pub fn asset(mut self, key: impl Into<String>, asset: AssetRef) -> ReelResult<Self> {
        let key = key.into();
        if self.assets.contains_key(&key) {
            return Err(ReelError::configuration(format!(
                "duplicate asset key '{key}'"
            )));
        }
        self.assets.insert(key, asset);
        Ok(self)
    }

    /// Register an image asset.
    pub fn image_asset(self, key: impl Into<String>, uri: impl Into<String>) -> ReelResult<Self> {
        self.asset(
            key,
            AssetRef {
                kind: AssetKind::Image,
                uri: uri.into(),
            },
        )
    }

    /// Register an audio asset.
    pub fn audio_asset(self, key: impl Into<String>, uri: impl Into<String>) -> ReelResult<Self> {
        self.asset(
            key,
            AssetRef {
                kind: AssetKind::Audio,
                uri: uri.into(),
            },
        )
    }

    /// Play audio asset `key` at `volume` from the first frame.
    pub fn audio(mut self, key: impl Into<String>, volume: f64) -> Self {
        self.audio = Some(AudioBed {
            asset: key.into(),
            volume,
            start_frame: 0,
        });
        self
    }

    /// Append a scene.
    pub fn scene(mut self, scene: impl Scene + 'static) -> Self {
        self.scenes.push(Arc::new(scene));
        self
    }

    /// Append a transition joining the last scene and the next one.
    pub fn transition(
        mut self,
        presentation: Presentation,
        timing: TimingCurve,
        duration_frames: u64,
    ) -> Self {
        self.transitions.push(TransitionSpec::new(
            presentation,
            timing,
            duration_frames,
        ));
        self
    }

    /// Validate everything and resolve the timeline.
    pub fn build(self) -> ReelResult<Composition> {
        Composition::new(
            self.config,
            self.assets,
            self.audio,
            self.scenes,
            self.transitions,
        )
    }
}

/// Fluent builder for a declarative [`SceneSpec`].
pub struct SceneBuilder {
    spec: SceneSpec,
}

impl SceneBuilder {
    /// Scene `id` lasting `duration_frames`.
    pub fn new(id: impl Into<String>, duration_frames: u64) -> Self {
        Self {
            spec: SceneSpec {
                id: id.into(),
                duration_frames,
                camera: None,
                elements: Vec::new(),
            },
        }
    }

    /// Camera scale animation.
    pub fn camera(mut self, scale: Anim) -> Self {
        self.spec.camera = Some(scale);
        self
    }

    /// Append an element.
    pub fn element(mut self, element: ElementSpec) -> Self {
        self.spec.elements.push(element);
        self
    }

    /// Append several elements.
    pub fn elements(mut self, elements: impl IntoIterator<Item = ElementSpec>) -> Self {
        self.spec.elements.extend(elements);
        self
    }

    /// Validate and return the scene.
    pub fn build(self) -> ReelResult<SceneSpec> {
        self.spec.validate()?;
        Ok(self.spec)
    }
}

/// Fluent builder for an [`ElementSpec`]. Checked when the owning scene is built.
pub struct ElementBuilder {
    spec: ElementSpec,
}

impl ElementBuilder {
    /// Element called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            spec: ElementSpec {
                name: name.into(),
                asset: None,
                text: None,
                props: BTreeMap::new(),
                repeat: None,
            },
        }
    }

    /// Image asset key.
    pub fn asset(mut self, key: impl Into<String>) -> Self {
        self.spec.asset = Some(key.into());
        self
    }

    /// Text reveal.
    pub fn text(mut self, reveal: TextReveal) -> Self {
        self.spec.text = Some(reveal);
        self
    }

    /// Animated property; replaces an earlier one with the same key.
    pub fn prop(mut self, key: impl Into<String>, anim: Anim) -> Self {
        self.spec.props.insert(key.into(), anim);
        self
    }

    /// Repeat once per label, delayed by `stagger`.
    pub fn repeat<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = S>,
        stagger: Stagger,
    ) -> Self {
        self.spec.repeat = Some(Repeat {
            labels: labels.into_iter().map(Into::into).collect(),
            stagger,
        });
        self
    }

    /// Finished element.
    pub fn build(self) -> ElementSpec {
        self.spec
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
