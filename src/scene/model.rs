use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::{anim::Anim, anim::SampleCtx, ops, stagger::Stagger},
    foundation::core::{Transform2D, Vec2},
    foundation::error::{ReelError, ReelResult},
    scene::{render_state::RenderState, reveal::TextReveal},
};

/// A self-contained timed visual unit.
///
/// `render` must be a pure function of `ctx`: no interior state, no dependence on
/// previously rendered frames. It is total: frames outside `[0, duration)` hold the
/// nearest boundary state.
pub trait Scene: Send + Sync + std::fmt::Debug {
    /// Stable identifier.
    fn id(&self) -> &str;

    /// Intrinsic duration in frames.
    fn duration_frames(&self) -> u64;

    /// Property tree at `ctx.local`.
    fn render(&self, ctx: SampleCtx) -> RenderState;

    /// Check scene-internal configuration.
    fn validate(&self) -> ReelResult<()> {
        Ok(())
    }

    /// Asset keys referenced by this scene.
    fn asset_keys(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// Property names that feed the element's 2D transform.
const TRANSFORM_KEYS: [&str; 6] = [
    "translate_x",
    "translate_y",
    "scale",
    "scale_x",
    "scale_y",
    "rotate_deg",
];

/// Declarative scene: a camera move plus animated elements.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneSpec {
    /// Scene identifier.
    pub id: String,
    /// Intrinsic duration in frames.
    pub duration_frames: u64,
    /// Optional camera scale animation applied to the whole scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<Anim>,
    /// Elements in painter's order.
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

/// One animated element inside a [`SceneSpec`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementSpec {
    /// Element name, unique within the scene.
    pub name: String,
    /// Optional image asset key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    /// Optional text reveal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextReveal>,
    /// Animated numeric properties.
    #[serde(default)]
    pub props: BTreeMap<String, Anim>,
    /// Optional staggered repetition of this element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<Repeat>,
}

/// Staggered copies of an element, one per label.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Repeat {
    /// Label per item.
    pub labels: Vec<String>,
    /// Delay per item.
    pub stagger: Stagger,
}

impl SceneSpec {
    /// Check duration, element names, animations, reveals and stagger rows.
    pub fn validate(&self) -> ReelResult<()> {
        if self.id.trim().is_empty() {
            return Err(ReelError::configuration("scene id must be non-empty"));
        }
        if self.duration_frames == 0 {
            return Err(ReelError::configuration("scene duration must be > 0 frames"));
        }
        if let Some(camera) = &self.camera {
            camera
                .validate()
                .map_err(|e| ReelError::configuration(format!("camera: {e}")))?;
        }

        let mut names = BTreeSet::new();
        for el in &self.elements {
            if !names.insert(el.name.as_str()) {
                return Err(ReelError::configuration(format!(
                    "duplicate element name '{}'",
                    el.name
                )));
            }
            el.validate()
                .map_err(|e| ReelError::configuration(format!("element '{}': {e}", el.name)))?;
        }
        Ok(())
    }

    fn render_state(&self, ctx: SampleCtx) -> RenderState {
        let last = i64::try_from(self.duration_frames.saturating_sub(1)).unwrap_or(i64::MAX);
        let ctx = ctx.with_local(ctx.local.clamp(0, last));

        let mut out = RenderState::new();
        out.set_text("id", self.id.clone());
        out.set_number("local_frame", ctx.local as f64);
        if let Some(camera) = &self.camera {
            out.group_mut("camera").set_number("scale", camera.sample(ctx));
        }

        let elements = out.group_mut("elements");
        for el in &self.elements {
            elements.set_group(el.name.clone(), el.render(ctx));
        }
        out
    }
}

impl Scene for SceneSpec {
    fn id(&self) -> &str {
        &self.id
    }

    fn duration_frames(&self) -> u64 {
        self.duration_frames
    }

    fn render(&self, ctx: SampleCtx) -> RenderState {
        self.render_state(ctx)
    }

    fn validate(&self) -> ReelResult<()> {
        SceneSpec::validate(self)
    }

    fn asset_keys(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|el| el.asset.as_deref())
            .collect()
    }
}

impl ElementSpec {
    fn validate(&self) -> ReelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ReelError::configuration("element name must be non-empty"));
        }
        for (key, anim) in &self.props {
            anim.validate()
                .map_err(|e| ReelError::configuration(format!("property '{key}': {e}")))?;
        }
        if let Some(text) = &self.text {
            text.validate()?;
        }
        if let Some(repeat) = &self.repeat {
            repeat.stagger.validate()?;
            if repeat.labels.len() != repeat.stagger.len() {
                return Err(ReelError::configuration(format!(
                    "repeat has {} labels but stagger has {} items",
                    repeat.labels.len(),
                    repeat.stagger.len()
                )));
            }
        }
        Ok(())
    }

    fn render(&self, ctx: SampleCtx) -> RenderState {
        let mut out = RenderState::new();
        if let Some(asset) = &self.asset {
            out.set_text("asset", asset.clone());
        }
        if let Some(text) = &self.text {
            text.render_into(ctx.local, out.group_mut("text"));
        }

        match &self.repeat {
            None => write_props(&self.props, ctx, &mut out),
            Some(repeat) => {
                let items = out.group_mut("items");
                for (i, label) in repeat.labels.iter().enumerate() {
                    let delay = repeat.stagger.delay(i).unwrap_or(0);
                    let delayed: BTreeMap<String, Anim> = self
                        .props
                        .iter()
                        .map(|(k, a)| (k.clone(), ops::delay(a.clone(), delay)))
                        .collect();
                    let item = items.group_mut(format!("item{i:02}"));
                    item.set_text("label", label.clone());
                    item.set_number("delay", delay as f64);
                    write_props(&delayed, ctx, item);
                }
            }
        }
        out
    }
}

fn write_props(props: &BTreeMap<String, Anim>, ctx: SampleCtx, out: &mut RenderState) {
    for (key, anim) in props {
        let mut v = anim.sample(ctx);
        if key == "opacity" {
            v = v.clamp(0.0, 1.0);
        }
        out.set_number(key.clone(), v);
    }

    if TRANSFORM_KEYS.iter().any(|k| props.contains_key(*k)) {
        let get = |k: &str, default: f64| props.get(k).map_or(default, |a| a.sample(ctx));
        let uniform = get("scale", 1.0);
        let t = Transform2D {
            translate: Vec2::new(get("translate_x", 0.0), get("translate_y", 0.0)),
            rotation_rad: get("rotate_deg", 0.0).to_radians(),
            scale: Vec2::new(uniform * get("scale_x", 1.0), uniform * get("scale_y", 1.0)),
        };
        let [a, b, c, d, e, f] = t.to_affine().as_coeffs();
        let affine = out.group_mut("affine");
        for (k, v) in [("a", a), ("b", b), ("c", c), ("d", d), ("e", e), ("f", f)] {
            affine.set_number(k, v);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
