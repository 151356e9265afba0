use std::collections::BTreeMap;

/// One resolved property value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Numeric property (opacity, scale, offsets, progress).
    Number(f64),
    /// Textual property (identifiers, asset references, reveal kinds).
    Text(String),
    /// Nested property group.
    Group(RenderState),
}

/// Property tree for one scene at one frame.
///
/// Recomputed for every frame and never shared between scenes. Keys are kept sorted so
/// serialization and fingerprints are stable.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RenderState(BTreeMap<String, PropValue>);

impl RenderState {
    /// Empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a numeric property, replacing any previous value.
    pub fn set_number(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), PropValue::Number(value));
    }

    /// Set a text property, replacing any previous value.
    pub fn set_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), PropValue::Text(value.into()));
    }

    /// Insert a finished group, replacing any previous value.
    pub fn set_group(&mut self, key: impl Into<String>, group: RenderState) {
        self.0.insert(key.into(), PropValue::Group(group));
    }

    /// Nested group under `key`, created (or replacing a leaf) when needed.
    pub fn group_mut(&mut self, key: impl Into<String>) -> &mut RenderState {
        let slot = self
            .0
            .entry(key.into())
            .or_insert_with(|| PropValue::Group(RenderState::new()));
        if !matches!(slot, PropValue::Group(_)) {
            *slot = PropValue::Group(RenderState::new());
        }
        match slot {
            PropValue::Group(g) => g,
            _ => unreachable!("slot was just made a group"),
        }
    }

    /// Value stored directly under `key`.
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    /// Value at a nested path such as `["elements", "logo", "opacity"]`.
    pub fn path(&self, path: &[&str]) -> Option<&PropValue> {
        let (last, parents) = path.split_last()?;
        let mut node = self;
        for key in parents {
            match node.0.get(*key)? {
                PropValue::Group(g) => node = g,
                _ => return None,
            }
        }
        node.0.get(*last)
    }

    /// Numeric value at a nested path.
    pub fn number_at(&self, path: &[&str]) -> Option<f64> {
        match self.path(path)? {
            PropValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Text value at a nested path.
    pub fn text_at(&self, path: &[&str]) -> Option<&str> {
        match self.path(path)? {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/render_state.rs"]
mod tests;
