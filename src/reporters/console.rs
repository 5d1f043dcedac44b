//! Colored console reporter

use colored::Colorize;
use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use tracing::warn;

use crate::assertion::Assertion;
use crate::reporter::Reporter;
use crate::series::TestSeries;
use crate::test_case::TestCase;

/// Human-readable progress output
///
/// Write errors are logged and otherwise ignored; a broken pipe must not
/// change the outcome of the run.
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: RefCell<W>,
    verbose: bool,
    passed: Cell<usize>,
    failed: Cell<usize>,
}

impl ConsoleReporter<io::Stdout> {
    /// Report to stdout
    pub fn stdout(verbose: bool) -> Self {
        Self::new(io::stdout(), verbose)
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// `verbose` adds one line per assertion
    pub fn new(out: W, verbose: bool) -> Self {
        Self {
            out: RefCell::new(out),
            verbose,
            passed: Cell::new(0),
            failed: Cell::new(0),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn line(&self, text: impl std::fmt::Display) {
        if let Err(e) = writeln!(self.out.borrow_mut(), "{}", text) {
            warn!(error = %e, "failed to write console report line");
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_series_start(&self, series: &TestSeries) {
        self.passed.set(0);
        self.failed.set(0);
        self.line(
            format!("Starting test series {}", series.name())
                .green()
                .bold(),
        );
    }

    fn on_test_starting(&self, case: &TestCase<'_>) {
        self.line(format!("Running test case {}", case.name()).green().bold());
    }

    fn on_assert(&self, case: &TestCase<'_>, assertion: &Assertion) {
        if !self.verbose {
            return;
        }
        let text = format!(
            "Test Case {} - Assert: {} : {}",
            case.name(),
            assertion,
            assertion.result()
        );
        if assertion.result() {
            self.line(text.green());
        } else {
            self.line(text.red().bold());
        }
    }

    fn on_test_finished(&self, case: &TestCase<'_>) {
        match case.verdict() {
            Ok(true) => {
                self.passed.set(self.passed.get() + 1);
                self.line(format!("Test Case {} passed", case.name()).green().bold());
            }
            Ok(false) => {
                self.failed.set(self.failed.get() + 1);
                self.line(format!("Test Case {} failed", case.name()).red().bold());
            }
            Err(_) => {
                self.failed.set(self.failed.get() + 1);
                self.line(
                    format!("Test Case {} failed (no assertions)", case.name())
                        .yellow()
                        .bold(),
                );
            }
        }
    }

    fn on_series_end(&self, series: &TestSeries) {
        self.line(
            format!("Completed test series {}", series.name())
                .green()
                .bold(),
        );
        let tally = format!(
            "{} passed, {} failed",
            self.passed.get(),
            self.failed.get()
        );
        if self.failed.get() == 0 {
            self.line(tally.green());
        } else {
            self.line(tally.red());
        }
        if let Err(e) = self.out.borrow_mut().flush() {
            warn!(error = %e, "failed to flush console report");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::Reporters;

    /// Writer whose every write and flush fails
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    fn drive<W: Write>(console: &ConsoleReporter<W>) {
        let mut reporters = Reporters::new();
        reporters.add(console);
        let series = TestSeries::new("demo", ["Good", "Bad"]);
        reporters.series_start(&series);

        let mut good = TestCase::new("Good", &reporters);
        reporters.test_starting(&good);
        good.check(crate::check!(1 + 1 == 2));
        reporters.test_finished(&good);

        let mut bad = TestCase::new("Bad", &reporters);
        reporters.test_starting(&bad);
        bad.check(crate::check!(1 + 1 == 3));
        reporters.test_finished(&bad);

        reporters.series_end(&series);
    }

    fn render(verbose: bool) -> String {
        let console = ConsoleReporter::new(Vec::new(), verbose);
        drive(&console);
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn test_lifecycle_lines() {
        let out = render(false);
        assert!(out.contains("Starting test series demo"));
        assert!(out.contains("Running test case Good"));
        assert!(out.contains("Test Case Good passed"));
        assert!(out.contains("Test Case Bad failed"));
        assert!(out.contains("Completed test series demo"));
        assert!(out.contains("1 passed, 1 failed"));
        assert!(!out.contains("Assert:"));
    }

    #[test]
    fn test_verbose_prints_assertions() {
        let out = render(true);
        assert!(out.contains("Test Case Bad - Assert: 1 + 1 == 3 (2 == 3) : false"));
    }

    #[test]
    fn test_write_errors_do_not_stop_reporting() {
        let console = ConsoleReporter::new(ClosedPipe, true);
        drive(&console);
        assert_eq!(console.passed.get(), 1);
        assert_eq!(console.failed.get(), 1);
    }
}
