//! CLI command definitions
//!
//! Defines the clap commands for the test runner CLI.

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a test series (every registered test by default)
    Run(RunArgs),

    /// List registered test case names
    #[command(alias = "ls")]
    List,
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// YAML file describing the series to run
    #[arg(long, short = 's', conflicts_with = "tests")]
    pub series: Option<PathBuf>,

    /// Run only these tests, in the order given
    /// Can be specified multiple times: --test A --test B
    #[arg(long = "test", short = 't')]
    pub tests: Vec<String>,

    /// Emit JSON lines instead of console output
    #[arg(long)]
    pub json: bool,

    /// Print every assertion
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Skip unregistered names instead of aborting the series
    #[arg(long)]
    pub skip_unknown: bool,
}
