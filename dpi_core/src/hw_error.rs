//! Maps `Box<dyn Error>` from the sensor trait boundary to typed `LevelError`.
//!
//! `dpi_traits::Sensor` reports failures as `Box<dyn Error + Send + Sync>`;
//! this module turns them into either `DeviceNotReady` or
//! `AdapterWriteFailed`, with an optional feature-gated path for
//! `dpi_hardware::HwError` downcasting.

use crate::error::LevelError;

/// Map a sensor write error to a typed `LevelError`.
///
/// Attempts to downcast known hardware error types first, then falls back
/// to string-based detection of "not ready".
pub fn map_sensor_error(
    e: &(dyn std::error::Error + 'static),
    sensor: &str,
    cpi: u32,
) -> LevelError {
    #[cfg(feature = "hardware-errors")]
    {
        if let Some(hw) = e.downcast_ref::<dpi_hardware::error::HwError>() {
            return match hw {
                dpi_hardware::error::HwError::NotReady => {
                    LevelError::DeviceNotReady(sensor.to_string())
                }
                other => LevelError::AdapterWriteFailed {
                    cpi,
                    cause: other.to_string(),
                },
            };
        }
    }

    let cause = e.to_string();
    if cause.to_lowercase().contains("not ready") {
        LevelError::DeviceNotReady(sensor.to_string())
    } else {
        LevelError::AdapterWriteFailed { cpi, cause }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_errors_become_write_failures() {
        let e = std::io::Error::other("bus nak");
        let mapped = map_sensor_error(&e, "ball", 800);
        assert_eq!(
            mapped,
            LevelError::AdapterWriteFailed {
                cpi: 800,
                cause: "bus nak".to_string()
            }
        );
    }

    #[test]
    fn not_ready_text_is_detected() {
        let e = std::io::Error::other("device not ready");
        let mapped = map_sensor_error(&e, "ball", 800);
        assert_eq!(mapped, LevelError::DeviceNotReady("ball".to_string()));
    }

    #[cfg(feature = "hardware-errors")]
    #[test]
    fn hw_errors_are_downcast() {
        use dpi_hardware::error::HwError;
        let ready = map_sensor_error(&HwError::NotReady, "ball", 400);
        assert_eq!(ready, LevelError::DeviceNotReady("ball".to_string()));

        let rejected = map_sensor_error(
            &HwError::Rejected {
                attribute: 0,
                value: 400,
            },
            "ball",
            400,
        );
        assert!(matches!(
            rejected,
            LevelError::AdapterWriteFailed { cpi: 400, .. }
        ));
    }
}
