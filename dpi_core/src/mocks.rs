//! Test and helper mocks for dpi_core

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct Recorded {
    ready: bool,
    fail_next: u32,
    attempts: usize,
    writes: Vec<(u32, u32)>,
}

/// A sensor that records every accepted `(attribute, value)` write.
///
/// Clones share the same record, so a test can keep one clone and hand the
/// other to a controller. It can be switched to not-ready or told to reject
/// the next few writes.
#[derive(Debug, Clone)]
pub struct RecordingSensor {
    rec: Arc<Mutex<Recorded>>,
}

impl Default for RecordingSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSensor {
    pub fn new() -> Self {
        Self {
            rec: Arc::new(Mutex::new(Recorded {
                ready: true,
                fail_next: 0,
                attempts: 0,
                writes: Vec::new(),
            })),
        }
    }

    fn rec(&self) -> MutexGuard<'_, Recorded> {
        self.rec.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_ready(&self, ready: bool) {
        self.rec().ready = ready;
    }

    /// Reject the next `n` writes.
    pub fn fail_next(&self, n: u32) {
        self.rec().fail_next = n;
    }

    /// Values of all accepted writes, in order.
    pub fn values(&self) -> Vec<u32> {
        self.rec().writes.iter().map(|&(_, v)| v).collect()
    }

    /// All accepted `(attribute, value)` writes, in order.
    pub fn writes(&self) -> Vec<(u32, u32)> {
        self.rec().writes.clone()
    }

    /// Number of write attempts, accepted or rejected.
    pub fn attempts(&self) -> usize {
        self.rec().attempts
    }
}

impl dpi_traits::Sensor for RecordingSensor {
    fn is_ready(&self) -> bool {
        self.rec().ready
    }

    fn set_attribute(
        &mut self,
        attribute: u32,
        value: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut rec = self.rec();
        rec.attempts += 1;
        if rec.fail_next > 0 {
            rec.fail_next -= 1;
            return Err(Box::new(std::io::Error::other("write rejected")));
        }
        rec.writes.push((attribute, value));
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
