mod apply;
mod cli;
mod error_fmt;
mod logging;

use std::io::BufReader;

use clap::Parser;
use dpi_core::{Command, LevelError};

use crate::cli::{Cli, Commands, JSON_MODE};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let cli = Cli::parse();
    let _ = color_eyre::install();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = run(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&e));
        } else {
            eprintln!("{}", humanize(&e));
        }
        std::process::exit(exit_code_for_error(&e));
    }
}

fn run(cli: Cli) -> eyre::Result<()> {
    let cfg = dpi_config::load_file(&cli.config)
        .map_err(|e| LevelError::ConfigurationInvalid(format!("{e:#}")))?;
    logging::init(&cli.log_level, cli.json, &cfg.logging)?;
    tracing::debug!(config = %cli.config.display(), steps = ?cfg.steps.cpi, "config loaded");

    let ctl = apply::build_controller(&cfg)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let command = match cli.cmd {
        Commands::SelfCheck => return apply::self_check(&ctl, cli.json, &mut out),
        Commands::Show => {
            apply::boot(&ctl);
            return apply::show(&ctl, &cfg.sensor.name, cli.json, &mut out);
        }
        Commands::Run { script } => {
            apply::boot(&ctl);
            let failed = match script {
                Some(path) => {
                    let file = std::fs::File::open(&path)
                        .map_err(|e| eyre::eyre!("open script {:?}: {}", path, e))?;
                    apply::run_script(&ctl, BufReader::new(file), cli.json, &mut out)?
                }
                None => apply::run_script(&ctl, std::io::stdin().lock(), cli.json, &mut out)?,
            };
            tracing::debug!(failed, "script complete");
            return Ok(());
        }
        Commands::Up { by } => Command::StepUp(by),
        Commands::Down { by } => Command::StepDown(by),
        Commands::Set { index } => Command::SetIndex(index),
        Commands::Reset => Command::Reset,
    };

    apply::boot(&ctl);
    apply::run_one(&ctl, command, cli.json, &mut out)
}
