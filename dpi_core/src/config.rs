//! Immutable configuration record for one controller instance.
//!
//! These are the runtime types used by `LevelController`. They are separate
//! from the TOML-deserialized config in `dpi_config`; see `conversions`.

use crate::error::LevelError;
use crate::index::Boundary;

/// Ordered, non-empty list of CPI values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTable(Vec<u32>);

impl StepTable {
    /// Validate and wrap a list of steps. Rejects empty tables and zero entries.
    pub fn new(steps: Vec<u32>) -> Result<Self, LevelError> {
        if steps.is_empty() {
            return Err(LevelError::ConfigurationInvalid(
                "step table must contain at least one entry".into(),
            ));
        }
        if let Some(pos) = steps.iter().position(|&s| s == 0) {
            return Err(LevelError::ConfigurationInvalid(format!(
                "step {pos} must be > 0"
            )));
        }
        Ok(Self(steps))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<u32> {
        self.0.get(index).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl TryFrom<Vec<u32>> for StepTable {
    type Error = LevelError;
    fn try_from(steps: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

impl TryFrom<&[u32]> for StepTable {
    type Error = LevelError;
    fn try_from(steps: &[u32]) -> Result<Self, Self::Error> {
        Self::new(steps.to_vec())
    }
}

/// Controller configuration: step table plus default/boundary/init policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelConfig {
    steps: StepTable,
    default_index: usize,
    wrap: bool,
    apply_on_init: bool,
    attribute: u32,
}

impl LevelConfig {
    /// Build a config with `wrap = false`, `apply_on_init = true`, attribute 0.
    ///
    /// `default_index` must be inside the table.
    pub fn new(steps: StepTable, default_index: usize) -> Result<Self, LevelError> {
        if default_index >= steps.len() {
            return Err(LevelError::ConfigurationInvalid(format!(
                "default_index {default_index} out of range for {} steps",
                steps.len()
            )));
        }
        Ok(Self {
            steps,
            default_index,
            wrap: false,
            apply_on_init: true,
            attribute: 0,
        })
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_apply_on_init(mut self, apply: bool) -> Self {
        self.apply_on_init = apply;
        self
    }

    pub fn with_attribute(mut self, attribute: u32) -> Self {
        self.attribute = attribute;
        self
    }

    pub fn steps(&self) -> &StepTable {
        &self.steps
    }

    pub fn default_index(&self) -> usize {
        self.default_index
    }

    pub fn wrap(&self) -> bool {
        self.wrap
    }

    pub fn apply_on_init(&self) -> bool {
        self.apply_on_init
    }

    pub fn attribute(&self) -> u32 {
        self.attribute
    }

    pub fn boundary(&self) -> Boundary {
        Boundary::from_wrap(self.wrap)
    }

    /// CPI at `index`. Indices produced by the controller are always in range.
    #[inline]
    pub(crate) fn cpi_at(&self, index: usize) -> u32 {
        self.steps.as_slice()[index]
    }
}
