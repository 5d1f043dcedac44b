//! Reporter protocol
//!
//! Reporters observe a series run. Every subscribed reporter receives every
//! event, synchronously and in subscription order, before control returns
//! to the runner or test case.

use crate::assertion::Assertion;
use crate::series::TestSeries;
use crate::test_case::TestCase;

/// Observer of series and test case events
///
/// All hooks default to doing nothing. Hooks take `&self`; reporters that
/// accumulate state keep it behind interior mutability.
pub trait Reporter {
    fn on_series_start(&self, _series: &TestSeries) {}

    fn on_test_starting(&self, _case: &TestCase<'_>) {}

    fn on_assert(&self, _case: &TestCase<'_>, _assertion: &Assertion) {}

    fn on_test_finished(&self, _case: &TestCase<'_>) {}

    fn on_series_end(&self, _series: &TestSeries) {}
}

/// Ordered list of subscribed reporters
///
/// The list borrows its reporters; whoever subscribes one keeps ownership
/// and can inspect it once the run is over.
#[derive(Default, Clone)]
pub struct Reporters<'a> {
    reporters: Vec<&'a dyn Reporter>,
}

impl<'a> Reporters<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a reporter after all previously added ones
    pub fn add(&mut self, reporter: &'a dyn Reporter) -> &mut Self {
        self.reporters.push(reporter);
        self
    }

    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }

    pub fn series_start(&self, series: &TestSeries) {
        for r in &self.reporters {
            r.on_series_start(series);
        }
    }

    pub fn test_starting(&self, case: &TestCase<'_>) {
        for r in &self.reporters {
            r.on_test_starting(case);
        }
    }

    pub fn assert(&self, case: &TestCase<'_>, assertion: &Assertion) {
        for r in &self.reporters {
            r.on_assert(case, assertion);
        }
    }

    pub fn test_finished(&self, case: &TestCase<'_>) {
        for r in &self.reporters {
            r.on_test_finished(case);
        }
    }

    pub fn series_end(&self, series: &TestSeries) {
        for r in &self.reporters {
            r.on_series_end(series);
        }
    }
}

impl std::fmt::Debug for Reporters<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporters")
            .field("len", &self.reporters.len())
            .finish()
    }
}
