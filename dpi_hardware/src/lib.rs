pub mod error;
pub mod resolution;
#[cfg(all(feature = "hardware", target_os = "linux"))]
pub mod pmw3610;

use dpi_traits::Sensor;
use error::HwError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

/// Simulated pointing sensor.
///
/// Accepts every attribute write unless it has been told to fail the next
/// few writes or to report itself as not ready. A [`SimulatedProbe`] shares
/// the counters so callers can observe writes after the sensor has been
/// handed to a controller.
pub struct SimulatedSensor {
    name: String,
    ready: Arc<AtomicBool>,
    fail_remaining: Arc<AtomicU32>,
    last_value: Arc<AtomicU32>,
    writes: Arc<AtomicUsize>,
}

/// Read-side view of a [`SimulatedSensor`].
#[derive(Clone)]
pub struct SimulatedProbe {
    ready: Arc<AtomicBool>,
    fail_remaining: Arc<AtomicU32>,
    last_value: Arc<AtomicU32>,
    writes: Arc<AtomicUsize>,
}

impl SimulatedSensor {
    pub fn new(name: impl Into<String>) -> Self {
        SimulatedSensor {
            name: name.into(),
            ready: Arc::new(AtomicBool::new(true)),
            fail_remaining: Arc::new(AtomicU32::new(0)),
            last_value: Arc::new(AtomicU32::new(0)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_ready(self, ready: bool) -> Self {
        self.ready.store(ready, Ordering::Relaxed);
        self
    }

    /// Reject the next `n` writes with [`HwError::Rejected`].
    pub fn with_failures(self, n: u32) -> Self {
        self.fail_remaining.store(n, Ordering::Relaxed);
        self
    }

    pub fn probe(&self) -> SimulatedProbe {
        SimulatedProbe {
            ready: self.ready.clone(),
            fail_remaining: self.fail_remaining.clone(),
            last_value: self.last_value.clone(),
            writes: self.writes.clone(),
        }
    }
}

impl SimulatedProbe {
    /// Last value accepted by the sensor, if any write succeeded.
    pub fn last_value(&self) -> Option<u32> {
        match self.last_value.load(Ordering::Relaxed) {
            0 => None,
            v => Some(v),
        }
    }

    /// Number of accepted writes.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Relaxed);
    }

    pub fn fail_next(&self, n: u32) {
        self.fail_remaining.store(n, Ordering::Relaxed);
    }
}

impl Sensor for SimulatedSensor {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Relaxed)
    }

    fn set_attribute(
        &mut self,
        attribute: u32,
        value: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !self.is_ready() {
            return Err(Box::new(HwError::NotReady));
        }
        let remaining = self.fail_remaining.load(Ordering::Relaxed);
        if remaining > 0 {
            self.fail_remaining.store(remaining - 1, Ordering::Relaxed);
            tracing::debug!(attribute, value, remaining, "simulated write rejected");
            return Err(Box::new(HwError::Rejected { attribute, value }));
        }
        self.last_value.store(value, Ordering::Relaxed);
        self.writes.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(attribute, value, "simulated write");
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_sensor_records_writes() {
        let mut sensor = SimulatedSensor::new("sim");
        let probe = sensor.probe();
        sensor.set_attribute(0, 800).unwrap();
        sensor.set_attribute(0, 1600).unwrap();
        assert_eq!(probe.writes(), 2);
        assert_eq!(probe.last_value(), Some(1600));
    }

    #[test]
    fn test_simulated_sensor_not_ready() {
        let mut sensor = SimulatedSensor::new("sim").with_ready(false);
        assert!(!sensor.is_ready());
        let err = sensor.set_attribute(0, 800).unwrap_err();
        assert!(matches!(err.downcast_ref::<HwError>(), Some(HwError::NotReady)));
    }
}
