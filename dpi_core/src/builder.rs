//! Type-state builder for a boxed-sensor `LevelController`.
//!
//! The builder enforces at compile time that a sensor and a step table are
//! provided before `build()` is available. `try_build()` is always available
//! for dynamic checks.

use std::marker::PhantomData;

use dpi_traits::Sensor;

use crate::config::{LevelConfig, StepTable};
use crate::controller::LevelController;
use crate::error::{BuildError, Result};

/// Sensor handle used by builder-made controllers.
pub type DynSensor = Box<dyn Sensor + Send>;

/// Controller over a boxed sensor, as produced by [`LevelControllerBuilder`].
pub type DynController = LevelController<DynSensor>;

// ── Type-state markers ───────────────────────────────────────────────────────

pub struct Missing;
pub struct Set;

/// Builder for `DynController`. Values are validated on `build()`.
pub struct LevelControllerBuilder<S, T> {
    sensor: Option<DynSensor>,
    steps: Option<Vec<u32>>,
    default_index: usize,
    wrap: bool,
    apply_on_init: bool,
    attribute: u32,
    _s: PhantomData<S>,
    _t: PhantomData<T>,
}

impl Default for LevelControllerBuilder<Missing, Missing> {
    fn default() -> Self {
        Self {
            sensor: None,
            steps: None,
            default_index: 0,
            wrap: false,
            apply_on_init: true,
            attribute: 0,
            _s: PhantomData,
            _t: PhantomData,
        }
    }
}

impl DynController {
    /// Start building a controller.
    pub fn builder() -> LevelControllerBuilder<Missing, Missing> {
        LevelControllerBuilder::default()
    }
}

impl<S, T> LevelControllerBuilder<S, T> {
    fn retype<S2, T2>(self) -> LevelControllerBuilder<S2, T2> {
        LevelControllerBuilder {
            sensor: self.sensor,
            steps: self.steps,
            default_index: self.default_index,
            wrap: self.wrap,
            apply_on_init: self.apply_on_init,
            attribute: self.attribute,
            _s: PhantomData,
            _t: PhantomData,
        }
    }

    pub fn with_sensor(
        mut self,
        sensor: impl Sensor + Send + 'static,
    ) -> LevelControllerBuilder<Set, T> {
        self.sensor = Some(Box::new(sensor));
        self.retype()
    }

    pub fn with_steps(mut self, steps: impl Into<Vec<u32>>) -> LevelControllerBuilder<S, Set> {
        self.steps = Some(steps.into());
        self.retype()
    }

    /// Copy every field of an existing config, step table included.
    pub fn with_config(mut self, cfg: &LevelConfig) -> LevelControllerBuilder<S, Set> {
        self.steps = Some(cfg.steps().as_slice().to_vec());
        self.default_index = cfg.default_index();
        self.wrap = cfg.wrap();
        self.apply_on_init = cfg.apply_on_init();
        self.attribute = cfg.attribute();
        self.retype()
    }

    pub fn default_index(mut self, index: usize) -> Self {
        self.default_index = index;
        self
    }

    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn apply_on_init(mut self, apply: bool) -> Self {
        self.apply_on_init = apply;
        self
    }

    pub fn attribute(mut self, attribute: u32) -> Self {
        self.attribute = attribute;
        self
    }

    /// Validate and build, reporting missing parts as `BuildError` and bad
    /// values as `LevelError::ConfigurationInvalid`.
    pub fn try_build(self) -> Result<DynController> {
        let sensor = self.sensor.ok_or(BuildError::MissingSensor)?;
        let steps = self.steps.ok_or(BuildError::MissingSteps)?;
        let cfg = LevelConfig::new(StepTable::new(steps)?, self.default_index)?
            .with_wrap(self.wrap)
            .with_apply_on_init(self.apply_on_init)
            .with_attribute(self.attribute);
        Ok(LevelController::new(cfg, sensor))
    }
}

impl LevelControllerBuilder<Set, Set> {
    /// Build once sensor and steps are known. Config values are still validated.
    pub fn build(self) -> Result<DynController> {
        self.try_build()
    }
}
