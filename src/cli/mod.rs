//! CLI command handling
//!
//! Resolves CLI flags against the configuration file, subscribes the
//! selected reporter and drives the runner.

use std::io;
use tracing::debug;

use crate::commands::{Commands, RunArgs};
use crate::common::config::{ColorChoice, Config, OutputFormat, UnknownTestPolicy};
use crate::common::Result;
use crate::registry::Registry;
use crate::reporter::Reporters;
use crate::reporters::{ConsoleReporter, JsonReporter};
use crate::runner::{SeriesSummary, TestRunner};
use crate::series::TestSeries;

/// Name of the series built from `--test` selections
pub const SELECTED_SERIES: &str = "selected";

/// Effective run settings after flags override config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    pub format: OutputFormat,
    pub verbose: bool,
    pub color: ColorChoice,
    pub on_unknown: UnknownTestPolicy,
}

impl RunSettings {
    pub fn resolve(args: &RunArgs, config: &Config) -> Self {
        Self {
            format: if args.json {
                OutputFormat::Json
            } else {
                config.output.format
            },
            verbose: args.verbose || config.output.verbose,
            color: if args.no_color {
                ColorChoice::Never
            } else {
                config.output.color
            },
            on_unknown: if args.skip_unknown {
                UnknownTestPolicy::Skip
            } else {
                config.runner.on_unknown
            },
        }
    }
}

/// Dispatch a CLI command
pub fn dispatch(command: Commands, registry: &Registry, config: &Config) -> Result<()> {
    match command {
        Commands::List => {
            for name in registry.all_names() {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Run(args) => run(&args, registry, config).map(|_| ()),
    }
}

/// Pick the series a `run` invocation asks for
pub fn select_series(args: &RunArgs, registry: &Registry) -> Result<TestSeries> {
    if let Some(path) = &args.series {
        return TestSeries::from_yaml_file(path);
    }
    if !args.tests.is_empty() {
        return Ok(TestSeries::new(SELECTED_SERIES, args.tests.iter().cloned()));
    }
    Ok(registry.series_all())
}

/// Run the selected series to stdout
///
/// Fails with `Error::TestsFailed` when any case did not pass.
pub fn run(args: &RunArgs, registry: &Registry, config: &Config) -> Result<SeriesSummary> {
    let settings = RunSettings::resolve(args, config);
    debug!(?settings, "resolved run settings");

    match settings.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {}
    }

    let series = select_series(args, registry)?;

    let console;
    let json;
    let mut reporters = Reporters::new();
    match settings.format {
        OutputFormat::Console => {
            console = ConsoleReporter::stdout(settings.verbose);
            reporters.add(&console);
        }
        OutputFormat::Json => {
            json = JsonReporter::new(io::stdout());
            reporters.add(&json);
        }
    }

    TestRunner::new(registry, &reporters)
        .with_policy(settings.on_unknown)
        .run(&series)?
        .into_result()
}
