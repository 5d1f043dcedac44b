//! Machine-readable reporter: one JSON object per event per line

use serde::Serialize;
use std::cell::RefCell;
use std::io::Write;
use tracing::warn;

use crate::assertion::Assertion;
use crate::reporter::Reporter;
use crate::series::TestSeries;
use crate::test_case::TestCase;

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum JsonEvent<'a> {
    SeriesStart {
        series: &'a str,
        tests: &'a [String],
    },
    TestStarting {
        test: &'a str,
    },
    Assert {
        test: &'a str,
        assertion: &'a Assertion,
    },
    TestFinished {
        test: &'a str,
        verdict: Option<bool>,
        assertions: usize,
    },
    SeriesEnd {
        series: &'a str,
    },
}

/// Writes JSON lines to any writer
pub struct JsonReporter<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn emit(&self, event: &JsonEvent<'_>) {
        let mut out = self.out.borrow_mut();
        let written = serde_json::to_writer(&mut *out, event)
            .map_err(std::io::Error::from)
            .and_then(|()| out.write_all(b"\n"));
        if let Err(e) = written {
            warn!(error = %e, "failed to write JSON report line");
        }
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn on_series_start(&self, series: &TestSeries) {
        self.emit(&JsonEvent::SeriesStart {
            series: series.name(),
            tests: series.tests(),
        });
    }

    fn on_test_starting(&self, case: &TestCase<'_>) {
        self.emit(&JsonEvent::TestStarting { test: case.name() });
    }

    fn on_assert(&self, case: &TestCase<'_>, assertion: &Assertion) {
        self.emit(&JsonEvent::Assert {
            test: case.name(),
            assertion,
        });
    }

    fn on_test_finished(&self, case: &TestCase<'_>) {
        self.emit(&JsonEvent::TestFinished {
            test: case.name(),
            verdict: case.verdict().ok(),
            assertions: case.assertions(),
        });
    }

    fn on_series_end(&self, series: &TestSeries) {
        self.emit(&JsonEvent::SeriesEnd {
            series: series.name(),
        });
        let _ = self.out.borrow_mut().flush();
    }
}
