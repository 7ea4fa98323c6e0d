//! Matrix CLI
//!
//! Menu-driven front-end over `matrix-registry`. Reads commands from stdin,
//! prints results to stdout and logs to stderr.
//!
//! Environment:
//! - `RUST_LOG` - log filter (default `warn`)
//! - `MATRIX_CLI_PRECISION` - decimal places when `--precision` is absent

mod app;
mod config;
mod render;

use app::Session;
use clap::Parser;
use config::{Args, Config};
use std::io;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_args(&args);
    info!(precision = config.precision, json = config.json, "starting session");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(config, stdin.lock(), stdout.lock());

    match session.run() {
        Ok(()) => {
            info!(matrices = session.registry().len(), "session ended");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("I/O error: {}", e);
            ExitCode::FAILURE
        }
    }
}
