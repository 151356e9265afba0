/// Convenience result type used across reeltime.
pub type ReelResult<T> = Result<T, ReelError>;

/// Location inside a timeline declaration that a configuration error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigSite {
    /// Zero-based scene index.
    Scene(usize),
    /// Zero-based transition index (transition `i` joins scenes `i` and `i + 1`).
    Transition(usize),
}

impl std::fmt::Display for ConfigSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scene(i) => write!(f, "scene #{i}"),
            Self::Transition(i) => write!(f, "transition #{i}"),
        }
    }
}

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Malformed composition data detected before any frame is evaluated.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Malformed scene or transition declaration, with the offending index.
    #[error("configuration error in {site}: {message}")]
    ConfigurationAt {
        /// Offending scene or transition.
        site: ConfigSite,
        /// Human-readable reason.
        message: String,
    },

    /// Per-frame query outside `[0, budget)`.
    #[error("frame {frame} is out of range [0, {budget})")]
    OutOfRange {
        /// Requested frame.
        frame: u64,
        /// Declared composition budget in frames.
        budget: u64,
    },

    /// Invalid input to an easing, interpolation or oscillator primitive.
    #[error("primitive error: {0}")]
    Primitive(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ReelError::ConfigurationAt`] value for scene `index`.
    pub fn scene(index: usize, msg: impl Into<String>) -> Self {
        Self::ConfigurationAt {
            site: ConfigSite::Scene(index),
            message: msg.into(),
        }
    }

    /// Build a [`ReelError::ConfigurationAt`] value for transition `index`.
    pub fn transition(index: usize, msg: impl Into<String>) -> Self {
        Self::ConfigurationAt {
            site: ConfigSite::Transition(index),
            message: msg.into(),
        }
    }

    /// Build a [`ReelError::Primitive`] value.
    pub fn primitive(msg: impl Into<String>) -> Self {
        Self::Primitive(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// The scene or transition a configuration error points at, if any.
    pub fn site(&self) -> Option<ConfigSite> {
        match self {
            Self::ConfigurationAt { site, .. } => Some(*site),
            _ => None,
        }
    }

    /// Whether this error was raised while building a composition.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::ConfigurationAt { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
