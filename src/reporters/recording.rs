//! Reporter that remembers every event it sees

use std::cell::RefCell;
use std::fmt;

use crate::assertion::Assertion;
use crate::reporter::Reporter;
use crate::series::TestSeries;
use crate::test_case::TestCase;

/// One observed reporter event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SeriesStart(String),
    TestStarting(String),
    Assert { test: String, assertion: Assertion },
    TestFinished { test: String, verdict: Option<bool> },
    SeriesEnd(String),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::SeriesStart(series) => write!(f, "series_start({})", series),
            Event::TestStarting(test) => write!(f, "test_starting({})", test),
            Event::Assert { test, assertion } => write!(
                f,
                "assert({}, {} = {})",
                test,
                assertion.expression(),
                assertion.result()
            ),
            Event::TestFinished { test, .. } => write!(f, "test_finished({})", test),
            Event::SeriesEnd(series) => write!(f, "series_end({})", series),
        }
    }
}

/// Captures the event sequence of a run
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: RefCell<Vec<Event>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Assertions recorded for `test`, in order
    pub fn assertions_for(&self, test: &str) -> Vec<Assertion> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Assert { test: t, assertion } if t == test => Some(assertion.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl Reporter for RecordingReporter {
    fn on_series_start(&self, series: &TestSeries) {
        self.push(Event::SeriesStart(series.name().to_string()));
    }

    fn on_test_starting(&self, case: &TestCase<'_>) {
        self.push(Event::TestStarting(case.name().to_string()));
    }

    fn on_assert(&self, case: &TestCase<'_>, assertion: &Assertion) {
        self.push(Event::Assert {
            test: case.name().to_string(),
            assertion: assertion.clone(),
        });
    }

    fn on_test_finished(&self, case: &TestCase<'_>) {
        self.push(Event::TestFinished {
            test: case.name().to_string(),
            verdict: case.verdict().ok(),
        });
    }

    fn on_series_end(&self, series: &TestSeries) {
        self.push(Event::SeriesEnd(series.name().to_string()));
    }
}
