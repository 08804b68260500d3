//! Human-readable error descriptions and structured JSON error formatting.

use dpi_core::error::{BuildError, LevelError};

/// Stable name of a `LevelError` variant, used in JSON output.
pub fn error_kind_name(e: &LevelError) -> &'static str {
    match e {
        LevelError::InvalidCommand(_) => "InvalidCommand",
        LevelError::DeviceNotReady(_) => "DeviceNotReady",
        LevelError::AdapterWriteFailed { .. } => "AdapterWriteFailed",
        LevelError::ConfigurationInvalid(_) => "ConfigurationInvalid",
    }
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(le) = err.downcast_ref::<LevelError>() {
        return match le {
            LevelError::InvalidCommand(what) => format!(
                "What happened: Unsupported command ({what}).\nLikely causes: Typo in the command or an unknown binding code.\nHow to fix: Use up [n], down [n], set <index>, reset, or codes 0-3."
            ),
            LevelError::DeviceNotReady(sensor) => format!(
                "What happened: Sensor {sensor} is not ready.\nLikely causes: Sensor not powered, not wired, or still booting.\nHow to fix: Check the sensor connection and retry; the level was not changed."
            ),
            LevelError::AdapterWriteFailed { cpi, cause } => format!(
                "What happened: The sensor rejected CPI {cpi} ({cause}).\nLikely causes: Value unsupported by the sensor or a bus error.\nHow to fix: Check steps.cpi against the sensor's supported range and retry; the level was not changed."
            ),
            LevelError::ConfigurationInvalid(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Empty or zero-valued steps.cpi, or default_index outside the table.\nHow to fix: Edit the config file, then rerun."
            ),
        };
    }

    if let Some(be) = err.downcast_ref::<BuildError>() {
        return format!(
            "What happened: Controller could not be assembled ({be}).\nLikely causes: The builder was finished without a sensor or a step table.\nHow to fix: Call with_sensor(..) and with_steps(..) (or with_config(..)) before building."
        );
    }

    // Generic fallback
    let msg = err.to_string();
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Map LevelError kinds to stable exit codes; anything else returns 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match err.downcast_ref::<LevelError>() {
        Some(LevelError::DeviceNotReady(_)) => 3,
        Some(LevelError::AdapterWriteFailed { .. }) => 4,
        Some(LevelError::ConfigurationInvalid(_)) => 5,
        Some(LevelError::InvalidCommand(_)) => 6,
        None => 1,
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let reason = err
        .downcast_ref::<LevelError>()
        .map_or("Error", error_kind_name);
    json!({ "reason": reason, "message": humanize(err) }).to_string()
}
