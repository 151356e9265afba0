use xxhash_rust::xxh3::Xxh3;

use crate::{
    eval::evaluator::{FrameContent, FrameState, SceneFrame},
    scene::render_state::{PropValue, RenderState},
};

const XXH3_SEED: u64 = 0x8b5ad4a0c7d8e9f1;

/// Stable 128-bit fingerprint of a frame's visual content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FrameFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl std::fmt::Display for FrameFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Compute a stable fingerprint for an evaluated frame.
///
/// The global frame index, buffer flag and audio cue are not hashed, so held frames share
/// a fingerprint with the frame they hold.
pub fn fingerprint_frame(frame: &FrameState) -> FrameFingerprint {
    let mut h = StableHasher::new();
    write_content(&mut h, &frame.content);
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> FrameFingerprint {
        let v = self.inner.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_content(h: &mut StableHasher, content: &FrameContent) {
    match content {
        FrameContent::Scene { scene } => {
            h.write_u8(0);
            write_scene(h, scene);
        }
        FrameContent::Transition {
            transition,
            outgoing,
            incoming,
        } => {
            h.write_u8(1);
            h.write_u64(transition.index as u64);
            h.write_str(transition.presentation.name());
            h.write_str(transition.timing.name());
            h.write_f64(transition.progress);
            write_scene(h, outgoing);
            write_scene(h, incoming);
        }
        FrameContent::Blank => h.write_u8(2),
    }
}

fn write_scene(h: &mut StableHasher, scene: &SceneFrame) {
    h.write_u64(scene.index as u64);
    h.write_str(&scene.id);
    write_state(h, &scene.state);
}

fn write_state(h: &mut StableHasher, state: &RenderState) {
    h.write_u64(state.len() as u64);
    for (key, value) in state.iter() {
        h.write_str(key);
        match value {
            PropValue::Number(v) => {
                h.write_u8(0);
                h.write_f64(*v);
            }
            PropValue::Text(s) => {
                h.write_u8(1);
                h.write_str(s);
            }
            PropValue::Group(g) => {
                h.write_u8(2);
                write_state(h, g);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fingerprint.rs"]
mod tests;
