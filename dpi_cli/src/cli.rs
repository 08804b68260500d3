//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "dpi", version, about = "Trackball CPI level controller")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/dpi_config.toml")]
    pub config: PathBuf,

    /// Log and print results as JSON lines instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the step table and the level after boot
    Show,
    /// Step the CPI level up
    Up {
        /// Number of steps (0 means 1)
        #[arg(long, default_value_t = 1)]
        by: u32,
    },
    /// Step the CPI level down
    Down {
        /// Number of steps (0 means 1)
        #[arg(long, default_value_t = 1)]
        by: u32,
    },
    /// Jump to a step index (out-of-range values are clamped or wrapped)
    Set {
        /// Target step index
        #[arg(long, allow_hyphen_values = true)]
        index: i32,
    },
    /// Return to the configured default step
    Reset,
    /// Apply commands line by line from a script (stdin when no file is given)
    #[command(
        long_about = "Apply commands line by line.\n\nEach line is one of: `up [n]`, `down [n]`, `set <index>`, `reset`, or a raw binding pair `<code> [value]` (0 = up, 1 = down, 2 = set, 3 = reset). Blank lines and lines starting with '#' are ignored. A line that fails is reported and the run continues."
    )]
    Run {
        /// Script file; reads stdin when omitted
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,
    },
    /// Quick health check (sensor presence / sim ok)
    SelfCheck,
}
