#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the CPI level controller.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The step table is checked here so that a bad file is rejected before
//!   any controller is built.
use serde::Deserialize;

/// Largest table a device binding can address (indices are 8-bit).
pub const MAX_STEPS: usize = 256;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SensorCfg {
    /// Label used in log lines.
    pub name: String,
    /// Sensor attribute id written on every commit.
    pub attribute: u32,
}

impl Default for SensorCfg {
    fn default() -> Self {
        Self {
            name: "trackball".to_string(),
            attribute: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StepsCfg {
    /// CPI values, lowest level first. Also accepts alias "steps".
    #[serde(alias = "steps")]
    pub cpi: Vec<u32>,
    /// Index selected at boot and by reset. Also accepts alias "default_step_index".
    #[serde(default, alias = "default_step_index")]
    pub default_index: usize,
    /// Step past either end wraps around instead of saturating.
    #[serde(default)]
    pub wrap: bool,
    /// Write the default level to the sensor at startup.
    #[serde(default = "default_true", alias = "apply_default_on_init")]
    pub apply_on_init: bool,
}

fn default_true() -> bool {
    true
}

/// Log rotation policy for the optional log file.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    Never,
    Daily,
    Hourly,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Rotation,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Simulation {
    /// Report the simulated sensor as ready
    pub ready: bool,
    /// Reject this many writes before accepting any
    pub fail_writes: u32,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            ready: true,
            fail_writes: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sensor: SensorCfg,
    pub steps: StepsCfg,
    #[serde(default)]
    pub logging: Logging,
    /// Simulated sensor behavior (CLI sim backend only)
    #[serde(default)]
    pub simulation: Simulation,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read, parse and validate a config file.
pub fn load_file(path: &std::path::Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    let cfg = load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))?;
    cfg.validate()?;
    Ok(cfg)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Steps
        if self.steps.cpi.is_empty() {
            eyre::bail!("steps.cpi must contain at least one entry");
        }
        if self.steps.cpi.len() > MAX_STEPS {
            eyre::bail!(
                "steps.cpi has {} entries; at most {MAX_STEPS} are supported",
                self.steps.cpi.len()
            );
        }
        if let Some(pos) = self.steps.cpi.iter().position(|&c| c == 0) {
            eyre::bail!("steps.cpi[{pos}] must be > 0");
        }
        if self.steps.default_index >= self.steps.cpi.len() {
            eyre::bail!(
                "steps.default_index must be < {} (got {})",
                self.steps.cpi.len(),
                self.steps.default_index
            );
        }

        // Sensor
        if self.sensor.name.trim().is_empty() {
            eyre::bail!("sensor.name must not be empty");
        }

        // Logging
        if let Some(level) = &self.logging.level {
            let known = ["error", "warn", "info", "debug", "trace"];
            if !known.contains(&level.to_ascii_lowercase().as_str()) {
                eyre::bail!("logging.level must be one of {}", known.join("|"));
            }
        }

        Ok(())
    }
}
