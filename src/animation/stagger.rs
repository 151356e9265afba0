use crate::foundation::error::{ReelError, ReelResult};

/// Per-item reveal delays for a row of sibling elements.
///
/// Item `i` starts `delays[i]` frames into the scene. Delays are non-decreasing, so
/// item `i` never appears before item `i - 1`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Stagger {
    /// `base + i * stride` for `i` in `0..count`.
    Uniform {
        /// Delay of the first item.
        base: u64,
        /// Extra delay per item.
        stride: u64,
        /// Number of items.
        count: usize,
    },
    /// Hand-picked delays.
    Explicit {
        /// Delay per item.
        delays: Vec<u64>,
    },
}

impl Stagger {
    /// `base + i * stride` for `count` items.
    pub fn uniform(base: u64, stride: u64, count: usize) -> Self {
        Self::Uniform {
            base,
            stride,
            count,
        }
    }

    /// Validated hand-picked delays.
    pub fn explicit(delays: Vec<u64>) -> ReelResult<Self> {
        let s = Self::Explicit { delays };
        s.validate()?;
        Ok(s)
    }

    /// Reject empty rows and decreasing delays.
    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Uniform { count, .. } => {
                if *count == 0 {
                    return Err(ReelError::configuration("stagger count must be > 0"));
                }
            }
            Self::Explicit { delays } => {
                if delays.is_empty() {
                    return Err(ReelError::configuration("stagger delays must be non-empty"));
                }
                if let Some(i) = delays.windows(2).position(|w| w[0] > w[1]) {
                    return Err(ReelError::configuration(format!(
                        "stagger delays must be non-decreasing (item {} < item {})",
                        i + 1,
                        i
                    )));
                }
            }
        }
        Ok(())
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        match self {
            Self::Uniform { count, .. } => *count,
            Self::Explicit { delays } => delays.len(),
        }
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delay of item `i`, or `None` past the end.
    pub fn delay(&self, i: usize) -> Option<u64> {
        match self {
            Self::Uniform {
                base,
                stride,
                count,
            } => (i < *count).then(|| base.saturating_add(stride.saturating_mul(i as u64))),
            Self::Explicit { delays } => delays.get(i).copied(),
        }
    }

    /// Every delay in item order.
    pub fn delays(&self) -> Vec<u64> {
        (0..self.len()).filter_map(|i| self.delay(i)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/stagger.rs"]
mod tests;
