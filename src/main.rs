//! cat-test - runs the built-in self-test series of the cat framework
//!
//! Registration is an explicit pass over the test-definition modules, done
//! before any series runs.

mod selftest;

use clap::Parser;
use std::path::PathBuf;

use cat::commands::Commands;
use cat::common::config::Config;
use cat::common::logging;
use cat::{cli, Error, Registry, Result};

#[derive(Parser)]
#[command(name = "cat-test", about = "Minimal unit-testing micro-framework")]
#[command(version, long_about = None)]
struct Cli {
    /// Configuration file (default: platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write full-detail logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let guard = match &cli.log_file {
        Some(path) => match logging::init_with_file(path) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Error: could not open log file '{}': {e}", path.display());
                std::process::exit(1);
            }
        },
        None => {
            logging::init_cli();
            None
        }
    };

    let result = run(cli);
    drop(guard);

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(exit_code(&e));
    }
}

/// 2 for a broken setup, 1 for everything else
fn exit_code(error: &Error) -> i32 {
    if error.is_configuration() {
        2
    } else {
        1
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut registry = Registry::new();
    selftest::register(&mut registry)?;

    cli::dispatch(cli.command, &registry, &config)
}
