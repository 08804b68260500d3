//! PMW3610 resolution register access over the Raspberry Pi SPI bus.
//!
//! Only the resolution attribute is supported; it is written to the
//! RES_STEP register on page 1 in 200 CPI increments.

use rppal::spi::{Bus, Mode, SlaveSelect, Spi};
use tracing::{debug, trace};

use crate::error::{HwError, Result};
use crate::resolution::res_step_bits;

/// Attribute id accepted by [`Pmw3610`] for resolution writes.
pub const ATTR_RESOLUTION: u32 = 0;

const REG_PROD_ID: u8 = 0x00;
const REG_RES_STEP: u8 = 0x05;
const REG_SPI_CLK_ON_REQ: u8 = 0x41;
const REG_SPI_PAGE0: u8 = 0x7f;
const REG_SPI_PAGE1: u8 = 0x7f;

const PRODUCT_ID: u8 = 0x3e;
const SPI_WRITE: u8 = 0x80;
const SPI_CLOCK_ON: u8 = 0xba;
const SPI_CLOCK_OFF: u8 = 0xb5;
const PAGE0_TO_1: u8 = 0xff;
const PAGE1_TO_0: u8 = 0x00;
const RES_STEP_MASK: u8 = 0x1f;

pub struct Pmw3610 {
    spi: Spi,
    name: String,
    ready: bool,
}

impl Pmw3610 {
    pub fn new(name: impl Into<String>, clock_hz: u32) -> Result<Self> {
        let spi = Spi::new(Bus::Spi0, SlaveSelect::Ss0, clock_hz, Mode::Mode3)
            .map_err(|e| HwError::Spi(e.to_string()))?;
        let mut dev = Self {
            spi,
            name: name.into(),
            ready: false,
        };
        // A missing sensor is not fatal; writes report NotReady until probe() succeeds.
        if let Err(e) = dev.probe() {
            tracing::warn!(sensor = %dev.name, error = %e, "pmw3610 not ready at open");
        }
        Ok(dev)
    }

    fn read_reg(&mut self, addr: u8) -> Result<u8> {
        let mut rx = [0u8; 2];
        self.spi
            .transfer(&mut rx, &[addr & 0x7f, 0])
            .map_err(|e| HwError::Spi(e.to_string()))?;
        trace!(addr, value = rx[1], "pmw3610 read");
        Ok(rx[1])
    }

    fn write_reg(&mut self, addr: u8, value: u8) -> Result<()> {
        self.spi
            .write(&[addr | SPI_WRITE, value])
            .map_err(|e| HwError::Spi(e.to_string()))?;
        trace!(addr, value, "pmw3610 write");
        Ok(())
    }

    fn set_resolution(&mut self, cpi: u32) -> Result<()> {
        let bits = res_step_bits(cpi)?;
        self.write_reg(REG_SPI_CLK_ON_REQ, SPI_CLOCK_ON)?;
        self.write_reg(REG_SPI_PAGE0, PAGE0_TO_1)?;
        let mut val = self.read_reg(REG_RES_STEP)?;
        val &= !RES_STEP_MASK;
        val |= bits;
        self.write_reg(REG_RES_STEP, val)?;
        self.write_reg(REG_SPI_PAGE1, PAGE1_TO_0)?;
        self.write_reg(REG_SPI_CLK_ON_REQ, SPI_CLOCK_OFF)?;
        debug!(cpi, "pmw3610 resolution set");
        Ok(())
    }
}

impl dpi_traits::Sensor for Pmw3610 {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn set_attribute(
        &mut self,
        attribute: u32,
        value: u32,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !self.ready {
            return Err(Box::new(HwError::NotReady));
        }
        if attribute != ATTR_RESOLUTION {
            return Err(Box::new(HwError::Rejected { attribute, value }));
        }
        self.set_resolution(value).map_err(Into::into)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Pmw3610 {
    /// Check the product id register; returns [`HwError::NotReady`] on mismatch.
    pub fn probe(&mut self) -> Result<()> {
        let id = self.read_reg(REG_PROD_ID)?;
        self.ready = id == PRODUCT_ID;
        if !self.ready {
            tracing::warn!(id, "unexpected pmw3610 product id");
            return Err(HwError::NotReady);
        }
        Ok(())
    }
}
