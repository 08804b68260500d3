//! Conversions from `dpi_config` (TOML-deserialized) types to core runtime types.

use crate::config::{LevelConfig, StepTable};
use crate::error::LevelError;

impl TryFrom<&dpi_config::StepsCfg> for LevelConfig {
    type Error = LevelError;

    fn try_from(s: &dpi_config::StepsCfg) -> Result<Self, Self::Error> {
        let steps = StepTable::try_from(s.cpi.as_slice())?;
        Ok(LevelConfig::new(steps, s.default_index)?
            .with_wrap(s.wrap)
            .with_apply_on_init(s.apply_on_init))
    }
}

impl TryFrom<&dpi_config::Config> for LevelConfig {
    type Error = LevelError;

    fn try_from(c: &dpi_config::Config) -> Result<Self, Self::Error> {
        Ok(LevelConfig::try_from(&c.steps)?.with_attribute(c.sensor.attribute))
    }
}
