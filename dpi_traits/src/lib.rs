//! Hardware seam for the CPI level controller.
//!
//! The controller never talks to a bus directly; it only needs to know
//! whether the sensor is up and to push a single attribute value to it.

/// Capability to reprogram a pointing sensor's scaling attribute.
///
/// - is_ready(): whether the sensor can accept writes right now
/// - set_attribute(): write `value` to the attribute identified by `attribute`
/// - name(): label used in log lines
pub trait Sensor {
    fn is_ready(&self) -> bool;

    fn set_attribute(
        &mut self,
        attribute: u32,
        value: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    fn name(&self) -> &str {
        "sensor"
    }
}

impl<S: Sensor + ?Sized> Sensor for Box<S> {
    #[inline]
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    #[inline]
    fn set_attribute(
        &mut self,
        attribute: u32,
        value: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        (**self).set_attribute(attribute, value)
    }

    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }
}
