//! Controller assembly from config and command execution/reporting.

use std::io::{BufRead, Write};

use dpi_core::{Command, DynController, LevelConfig, LevelError, Outcome};
use serde_json::json;

use dpi_traits::Sensor;

use crate::error_fmt::error_kind_name;

/// Open the configured sensor and build a controller in the boot state.
pub fn build_controller(cfg: &dpi_config::Config) -> eyre::Result<DynController> {
    let level = LevelConfig::try_from(cfg)?;

    #[cfg(all(feature = "hardware", target_os = "linux"))]
    let sensor = dpi_hardware::pmw3610::Pmw3610::new(cfg.sensor.name.clone(), 2_000_000)
        .map_err(|e| eyre::eyre!("open pmw3610: {e}"))?;
    #[cfg(not(all(feature = "hardware", target_os = "linux")))]
    let sensor = dpi_hardware::SimulatedSensor::new(cfg.sensor.name.clone())
        .with_ready(cfg.simulation.ready)
        .with_failures(cfg.simulation.fail_writes);

    DynController::builder()
        .with_config(&level)
        .with_sensor(sensor)
        .build()
}

/// Apply the boot-time default. Failures leave the controller uncommitted
/// and are logged; the next command retries the write.
pub fn boot(ctl: &DynController) {
    if let Err(e) = ctl.init() {
        tracing::warn!(error = %e, "default CPI not applied at boot");
    }
}

fn outcome_line(command: &Command, outcome: &Outcome, json: bool) -> String {
    if json {
        json!({
            "command": command.to_string(),
            "applied": outcome.is_applied(),
            "index": outcome.index(),
            "cpi": outcome.cpi(),
        })
        .to_string()
    } else if outcome.is_applied() {
        format!(
            "{command}: CPI {} (index {})",
            outcome.cpi(),
            outcome.index()
        )
    } else {
        format!(
            "{command}: unchanged at CPI {} (index {})",
            outcome.cpi(),
            outcome.index()
        )
    }
}

fn error_line(input: &str, err: &LevelError, json: bool) -> String {
    if json {
        json!({
            "command": input,
            "error": error_kind_name(err),
            "message": err.to_string(),
        })
        .to_string()
    } else {
        format!("{input}: error: {err}")
    }
}

/// Handle one command and print its result. Errors propagate to the caller.
pub fn run_one(
    ctl: &DynController,
    command: Command,
    json: bool,
    out: &mut impl Write,
) -> eyre::Result<()> {
    let outcome = ctl.handle(command)?;
    writeln!(out, "{}", outcome_line(&command, &outcome, json))?;
    Ok(())
}

/// Apply each script line in order. Failed lines are reported on `out` and
/// skipped. Returns the number of failed lines.
pub fn run_script(
    ctl: &DynController,
    input: impl BufRead,
    json: bool,
    out: &mut impl Write,
) -> eyre::Result<usize> {
    let mut failed = 0usize;
    for (lineno, line) in input.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let result = text
            .parse::<Command>()
            .and_then(|cmd| ctl.handle(cmd).map(|o| (cmd, o)));
        match result {
            Ok((cmd, outcome)) => writeln!(out, "{}", outcome_line(&cmd, &outcome, json))?,
            Err(e) => {
                failed += 1;
                tracing::warn!(line = lineno + 1, input = text, error = %e, "command failed");
                writeln!(out, "{}", error_line(text, &e, json))?;
            }
        }
    }
    if failed > 0 {
        tracing::info!(failed, "script finished with failures");
    }
    Ok(failed)
}

/// Print the step table and current state.
pub fn show(
    ctl: &DynController,
    sensor: &str,
    json: bool,
    out: &mut impl Write,
) -> eyre::Result<()> {
    let cfg = ctl.config();
    let state = ctl.state();
    if json {
        let v = json!({
            "sensor": sensor,
            "attribute": cfg.attribute(),
            "steps": cfg.steps().as_slice(),
            "default_index": cfg.default_index(),
            "wrap": cfg.wrap(),
            "current_index": state.current_index,
            "committed": state.is_committed,
            "cpi": ctl.active_cpi(),
        });
        writeln!(out, "{v}")?;
        return Ok(());
    }
    writeln!(out, "sensor {sensor} (attribute {})", cfg.attribute())?;
    for (i, cpi) in cfg.steps().as_slice().iter().enumerate() {
        let mark = if i == state.current_index { '*' } else { ' ' };
        let default = if i == cfg.default_index() {
            " (default)"
        } else {
            ""
        };
        writeln!(out, "{mark} [{i}] {cpi}{default}")?;
    }
    writeln!(
        out,
        "policy: {}, committed: {}",
        if cfg.wrap() { "wrap" } else { "clamp" },
        if state.is_committed { "yes" } else { "no" }
    )?;
    Ok(())
}

/// Report sensor readiness; a missing sensor is an error.
pub fn self_check(ctl: &DynController, json: bool, out: &mut impl Write) -> eyre::Result<()> {
    let (name, ready) = ctl.with_sensor(|s| (s.name().to_string(), s.is_ready()));
    if !ready {
        return Err(LevelError::DeviceNotReady(name).into());
    }
    let steps = ctl.config().steps().len();
    if json {
        writeln!(out, "{}", json!({ "ok": true, "sensor": name, "steps": steps }))?;
    } else {
        writeln!(out, "ok: sensor {name} ready, {steps} steps")?;
    }
    Ok(())
}
