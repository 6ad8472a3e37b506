mod cli;
mod commands;
mod errors;
mod manifest;
mod utils;
mod walk;

use crate::errors::{SoundpackError, SoundpackResult};
use crate::utils::Config;
use clap::Parser;
use cli::Cli;
use console::style;
use directories::ProjectDirs;
use std::fs;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::fmt::time;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(time::UtcTime::rfc_3339());

    Registry::default()
        .with(EnvFilter::from_default_env())
        .with(fmt_layer)
        .init();
}

fn run(cli: Cli) -> SoundpackResult<()> {
    let proj_dirs = ProjectDirs::from("dev", "soundpack", "soundpack").ok_or_else(|| {
        SoundpackError::Other("Unable to determine project directories".into())
    })?;

    let config_dir = proj_dirs.config_dir();
    fs::create_dir_all(config_dir)?;

    let mut config = Config::load(config_dir)?;

    commands::handle_command(cli.command, &mut config)
}

fn main() -> ExitCode {
    let now = Instant::now();
    init_tracing();

    tracing::debug!("CLI starting up");
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::debug!("run failed: {e:?}");
        eprintln!("{}: {e}", style("error").red().bold());
        if e.is_configuration() {
            eprintln!("{}: nothing was changed on disk", style("note").green().bold());
        }
        return ExitCode::FAILURE;
    }

    println!(
        "{} in {:.3}s.",
        style("Finished").green().bold(),
        now.elapsed().as_secs_f32()
    );
    ExitCode::SUCCESS
}
