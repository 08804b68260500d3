//! PMW3610 resolution encoding.
//!
//! The RES_STEP register holds the resolution in 200 CPI units, so only
//! multiples of 200 between 200 and 3200 are representable.

use crate::error::{HwError, Result};

pub const RES_STEP: u32 = 200;
pub const RES_MIN: u32 = 200;
pub const RES_MAX: u32 = 3200;

/// Register bits for `cpi`, or [`HwError::OutOfRange`] if the sensor cannot
/// represent it exactly.
pub fn res_step_bits(cpi: u32) -> Result<u8> {
    if !(RES_MIN..=RES_MAX).contains(&cpi) || cpi % RES_STEP != 0 {
        return Err(HwError::OutOfRange(cpi));
    }
    u8::try_from(cpi / RES_STEP).map_err(|_| HwError::OutOfRange(cpi))
}
