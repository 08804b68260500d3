//! Per-instance CPI level state and command handling.
//!
//! One mutex guards both the level state and the sensor handle, and it is
//! held across read-active-index, compute-target and commit. Two commands
//! on the same instance therefore never observe the same stale index.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dpi_traits::Sensor;
use tracing::{debug, error, info, warn};

use crate::command::Command;
use crate::config::LevelConfig;
use crate::error::LevelError;
use crate::hw_error::map_sensor_error;

/// Last successfully applied level.
///
/// While `is_committed` is false nothing has reached the sensor yet and
/// `current_index` is only the boot default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelState {
    pub current_index: usize,
    pub is_committed: bool,
}

impl LevelState {
    fn boot(default_index: usize) -> Self {
        Self {
            current_index: default_index,
            is_committed: false,
        }
    }

    /// Index that arithmetic starts from.
    #[inline]
    fn active(&self, default_index: usize) -> usize {
        if self.is_committed {
            self.current_index
        } else {
            default_index
        }
    }
}

/// Result of a successfully handled command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The sensor was written and state now points at `index`.
    Applied { index: usize, cpi: u32 },
    /// Target equalled the committed index; no write was issued.
    Unchanged { index: usize, cpi: u32 },
}

impl Outcome {
    pub fn index(&self) -> usize {
        match *self {
            Outcome::Applied { index, .. } | Outcome::Unchanged { index, .. } => index,
        }
    }

    pub fn cpi(&self) -> u32 {
        match *self {
            Outcome::Applied { cpi, .. } | Outcome::Unchanged { cpi, .. } => cpi,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }
}

struct Inner<S> {
    state: LevelState,
    sensor: S,
}

/// Resolution level controller for one sensor.
pub struct LevelController<S> {
    config: Arc<LevelConfig>,
    inner: Mutex<Inner<S>>,
}

impl<S> core::fmt::Debug for LevelController<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LevelController")
            .field("steps", &self.config.steps().as_slice())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Compute the target index for `command` starting from `active`.
///
/// Reset bypasses the boundary policy; the default index is in range by
/// construction.
pub fn resolve_target(config: &LevelConfig, active: usize, command: Command) -> usize {
    let len = config.steps().len();
    let policy = config.boundary();
    let active = active as i64;
    match command {
        Command::StepUp(d) => policy.apply(active + i64::from(d.max(1)), len),
        Command::StepDown(d) => policy.apply(active - i64::from(d.max(1)), len),
        Command::SetIndex(v) => policy.apply(i64::from(v), len),
        Command::Reset => config.default_index(),
    }
}

impl<S> LevelController<S> {
    /// Create a controller in the boot state (`default_index`, uncommitted).
    ///
    /// Nothing is written to the sensor; call [`LevelController::init`] to
    /// apply the default when `apply_on_init` is set.
    pub fn new(config: impl Into<Arc<LevelConfig>>, sensor: S) -> Self {
        let config = config.into();
        let state = LevelState::boot(config.default_index());
        Self {
            config,
            inner: Mutex::new(Inner { state, sensor }),
        }
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Snapshot of the current level state.
    pub fn state(&self) -> LevelState {
        self.lock().state
    }

    /// CPI of the last committed level, if any write has succeeded.
    pub fn committed_cpi(&self) -> Option<u32> {
        let state = self.state();
        state
            .is_committed
            .then(|| self.config.cpi_at(state.current_index))
    }

    /// CPI that the next step command will start from.
    pub fn active_cpi(&self) -> u32 {
        let state = self.state();
        self.config
            .cpi_at(state.active(self.config.default_index()))
    }

    /// Run `f` with shared access to the sensor.
    pub fn with_sensor<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.lock().sensor)
    }

    // State is only written after a successful sensor write, so a guard
    // recovered from a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Sensor> LevelController<S> {
    /// Apply the default level if configured to do so.
    ///
    /// A sensor that is not ready yet is not an error: the controller stays
    /// uncommitted and the first command retries the write. A rejected write
    /// is returned, but the controller remains usable. Once a level has been
    /// committed, `init` does nothing.
    pub fn init(&self) -> Result<(), LevelError> {
        let mut inner = self.lock();
        if inner.state.is_committed {
            debug!(index = inner.state.current_index, "CPI level already committed");
            return Ok(());
        }
        if !inner.sensor.is_ready() {
            warn!(sensor = inner.sensor.name(), "sensor is not ready at boot");
            return Ok(());
        }
        if self.config.apply_on_init() {
            self.commit(&mut inner, self.config.default_index())?;
        }
        Ok(())
    }

    /// Interpret `command` and commit the resulting level if it changed.
    pub fn handle(&self, command: Command) -> Result<Outcome, LevelError> {
        let mut inner = self.lock();
        if !inner.sensor.is_ready() {
            warn!(sensor = inner.sensor.name(), %command, "sensor not ready");
            return Err(LevelError::DeviceNotReady(inner.sensor.name().to_string()));
        }

        let active = inner.state.active(self.config.default_index());
        let target = resolve_target(&self.config, active, command);

        if inner.state.is_committed && target == inner.state.current_index {
            debug!(%command, index = target, "CPI level unchanged");
            return Ok(Outcome::Unchanged {
                index: target,
                cpi: self.config.cpi_at(target),
            });
        }
        self.commit(&mut inner, target)
    }

    /// Decode a `(code, value)` binding and handle it.
    pub fn handle_binding(&self, code: u32, value: i32) -> Result<Outcome, LevelError> {
        let command = Command::from_binding(code, value)?;
        self.handle(command)
    }

    fn commit(&self, inner: &mut Inner<S>, index: usize) -> Result<Outcome, LevelError> {
        let cpi = self.config.cpi_at(index);
        if let Err(e) = inner.sensor.set_attribute(self.config.attribute(), cpi) {
            let err = map_sensor_error(&*e, inner.sensor.name(), cpi);
            error!(sensor = inner.sensor.name(), cpi, error = %e, "failed to set CPI");
            return Err(err);
        }
        inner.state = LevelState {
            current_index: index,
            is_committed: true,
        };
        info!(sensor = inner.sensor.name(), cpi, index, "CPI set");
        Ok(Outcome::Applied { index, cpi })
    }
}
