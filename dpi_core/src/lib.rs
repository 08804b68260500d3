#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core CPI level logic (hardware-agnostic).
//!
//! This crate keeps the resolution level of one pointing sensor and decides
//! when the sensor has to be reprogrammed. All hardware interaction goes
//! through the `dpi_traits::Sensor` trait.
//!
//! ## Architecture
//!
//! - **Index arithmetic**: clamp and wrap policies (`index` module)
//! - **Commands**: step up/down, set, reset, decoded from bindings or text (`command`)
//! - **Configuration**: validated step table and policy flags (`config`)
//! - **Controller**: locked read-compute-commit per command (`controller`)
//!
//! The sensor is written only when the target level differs from the last
//! committed one, or when nothing has been committed yet. A failed write
//! leaves the recorded level untouched.

pub mod builder;
pub mod command;
pub mod config;
pub mod controller;
pub mod conversions;
pub mod error;
pub mod hw_error;
pub mod index;
pub mod mocks;

pub use builder::{DynController, DynSensor, LevelControllerBuilder};
pub use command::Command;
pub use config::{LevelConfig, StepTable};
pub use controller::{LevelController, LevelState, Outcome, resolve_target};
pub use error::{BuildError, LevelError};
pub use index::{Boundary, clamp_index, wrap_index};
