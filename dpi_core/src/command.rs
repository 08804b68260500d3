//! Level commands and their decoding from device bindings and text.

use std::fmt;
use std::str::FromStr;

use crate::error::LevelError;

/// Binding code: step the level up by `value` (or one step when `value <= 0`).
pub const CMD_STEP_UP: u32 = 0;
/// Binding code: step the level down by `value` (or one step when `value <= 0`).
pub const CMD_STEP_DOWN: u32 = 1;
/// Binding code: jump to index `value`.
pub const CMD_SET_INDEX: u32 = 2;
/// Binding code: return to the configured default index.
pub const CMD_RESET: u32 = 3;

/// A single request to change the resolution level.
///
/// Step magnitudes of 0 are treated as 1 when the command is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StepUp(u32),
    StepDown(u32),
    SetIndex(i32),
    Reset,
}

impl Command {
    /// Decode a `(code, value)` binding pair.
    pub fn from_binding(code: u32, value: i32) -> Result<Self, LevelError> {
        let steps = if value > 0 { value.unsigned_abs() } else { 1 };
        match code {
            CMD_STEP_UP => Ok(Command::StepUp(steps)),
            CMD_STEP_DOWN => Ok(Command::StepDown(steps)),
            CMD_SET_INDEX => Ok(Command::SetIndex(value)),
            CMD_RESET => Ok(Command::Reset),
            other => {
                tracing::error!(code = other, "unsupported DPI command");
                Err(LevelError::InvalidCommand(format!("code {other}")))
            }
        }
    }

    /// The binding code this command decodes from.
    pub fn code(self) -> u32 {
        match self {
            Command::StepUp(_) => CMD_STEP_UP,
            Command::StepDown(_) => CMD_STEP_DOWN,
            Command::SetIndex(_) => CMD_SET_INDEX,
            Command::Reset => CMD_RESET,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::StepUp(d) => write!(f, "up {d}"),
            Command::StepDown(d) => write!(f, "down {d}"),
            Command::SetIndex(i) => write!(f, "set {i}"),
            Command::Reset => f.write_str("reset"),
        }
    }
}

/// Text form used by scripts:
///
/// - `up [n]`, `down [n]`: step by `n` (default 1)
/// - `set <i>`: jump to index `i`
/// - `reset`
/// - `<code> [value]`: raw binding pair, decoded with [`Command::from_binding`]
impl FromStr for Command {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LevelError::InvalidCommand(s.trim().to_string());
        let mut parts = s.split_whitespace();
        let head = parts.next().ok_or_else(invalid)?;
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        let cmd = match head.to_ascii_lowercase().as_str() {
            "up" | "step-up" => match arg {
                Some(a) => Command::StepUp(a.parse().map_err(|_| invalid())?),
                None => Command::StepUp(1),
            },
            "down" | "step-down" => match arg {
                Some(a) => Command::StepDown(a.parse().map_err(|_| invalid())?),
                None => Command::StepDown(1),
            },
            "set" => {
                let a = arg.ok_or_else(invalid)?;
                Command::SetIndex(a.parse().map_err(|_| invalid())?)
            }
            "reset" if arg.is_none() => Command::Reset,
            raw => {
                let code: u32 = raw.parse().map_err(|_| invalid())?;
                let value = match arg {
                    Some(a) => a.parse().map_err(|_| invalid())?,
                    None => 0,
                };
                Command::from_binding(code, value)?
            }
        };
        Ok(cmd)
    }
}
