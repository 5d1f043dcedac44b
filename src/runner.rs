//! Test runner
//!
//! Executes a series against a registry, one test case after another,
//! notifying the reporters in a fixed order:
//!
//! 1. series start
//! 2. per name: load, test starting, run, test finished
//! 3. series end
//!
//! A configuration problem (unknown name, under the default policy) or a
//! body that returns an error stops the series immediately: neither the
//! current test's "finished" event nor "series end" fires. Panics raised by
//! a body are not caught.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::common::config::UnknownTestPolicy;
use crate::common::{Error, Result};
use crate::registry::Registry;
use crate::reporter::Reporters;
use crate::series::TestSeries;
use crate::test_case::TestCase;

/// Outcome of one executed test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseResult {
    pub name: String,
    /// `None` when the body recorded no assertions
    pub verdict: Option<bool>,
    pub assertions: usize,
}

impl CaseResult {
    /// A case without assertions does not count as passed
    pub fn passed(&self) -> bool {
        self.verdict == Some(true)
    }
}

/// Outcome of a completed series run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesSummary {
    pub series: String,
    pub results: Vec<CaseResult>,
    /// Names skipped under [`UnknownTestPolicy::Skip`]
    pub skipped: Vec<String>,
}

impl SeriesSummary {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// `Ok` when every case passed, `Error::TestsFailed` otherwise
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::TestsFailed {
                failed: self.failed(),
                total: self.total(),
            })
        }
    }
}

/// Runs series against a registry, reporting to a reporter list
///
/// Holds no state between runs.
#[derive(Debug, Clone, Copy)]
pub struct TestRunner<'a> {
    registry: &'a Registry,
    reporters: &'a Reporters<'a>,
    on_unknown: UnknownTestPolicy,
}

impl<'a> TestRunner<'a> {
    pub fn new(registry: &'a Registry, reporters: &'a Reporters<'a>) -> Self {
        Self {
            registry,
            reporters,
            on_unknown: UnknownTestPolicy::default(),
        }
    }

    /// Choose what happens to names missing from the registry
    pub fn with_policy(mut self, on_unknown: UnknownTestPolicy) -> Self {
        self.on_unknown = on_unknown;
        self
    }

    /// Run every test of `series` in order
    pub fn run(&self, series: &TestSeries) -> Result<SeriesSummary> {
        info!(series = %series.name(), tests = series.len(), "starting series");
        self.reporters.series_start(series);

        let mut summary = SeriesSummary {
            series: series.name().to_string(),
            results: Vec::with_capacity(series.len()),
            skipped: Vec::new(),
        };

        for name in series.tests() {
            let mut body = match self.registry.load(name) {
                Ok(body) => body,
                Err(Error::UnknownTestCase(missing))
                    if self.on_unknown == UnknownTestPolicy::Skip =>
                {
                    warn!(series = %series.name(), test = %missing, "skipping unknown test case");
                    summary.skipped.push(missing);
                    continue;
                }
                Err(e) => {
                    warn!(series = %series.name(), error = %e, "aborting series");
                    return Err(e);
                }
            };

            let mut case = TestCase::new(name.as_str(), self.reporters);
            self.reporters.test_starting(&case);

            debug!(test = %name, "running test case");
            body.run(&mut case).map_err(|e| {
                warn!(test = %name, error = %e, "test case aborted the series");
                Error::test_aborted(name, e)
            })?;

            self.reporters.test_finished(&case);

            summary.results.push(CaseResult {
                name: name.clone(),
                verdict: case.verdict().ok(),
                assertions: case.assertions(),
            });
        }

        self.reporters.series_end(series);
        info!(
            series = %series.name(),
            passed = summary.passed(),
            failed = summary.failed(),
            "finished series"
        );
        Ok(summary)
    }
}
