//! glitch-level CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use glitch_level_cli::{Args, Outcome, error_adapter};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = match args.log_level.parse::<LevelFilter>() {
        Ok(level) => level,
        Err(_) => {
            eprintln!("unknown log level `{}`, logging warnings only", args.log_level);
            LevelFilter::Warn
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!(args:?; "Parsed arguments");

    match glitch_level_cli::run(&args) {
        Ok(Outcome::Success) => {
            info!("Done");
            ExitCode::SUCCESS
        }
        // The report on stdout already says why.
        Ok(Outcome::Rejected) => ExitCode::FAILURE,
        Err(err) => {
            error!("{}", error_adapter::render(error_adapter::report(&err).as_ref()));
            ExitCode::FAILURE
        }
    }
}
