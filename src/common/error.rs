//! Error types for the test framework
//!
//! Only configuration and execution problems are errors. A failing
//! assertion is an ordinary `false` result and never shows up here.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the framework and its CLI
#[derive(Error, Debug)]
pub enum Error {
    // === Registration Errors ===
    #[error("Duplicate test case factory: {0}")]
    DuplicateTestCase(String),

    #[error("Invalid test case name {0:?}: names must be non-empty")]
    InvalidTestName(String),

    // === Execution Errors ===
    #[error("Unknown test case '{0}'. Use 'cat-test list' to see registered names")]
    UnknownTestCase(String),

    #[error("Test case '{0}' recorded no assertions")]
    NoAssertions(String),

    #[error("Test case '{test}' aborted: {reason}")]
    TestAborted { test: String, reason: String },

    #[error("{failed} of {total} test cases failed")]
    TestsFailed { failed: usize, total: usize },

    // === Configuration Errors ===
    #[error("Invalid test series file: {0}")]
    SeriesParse(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },
}

impl Error {
    /// Create a test aborted error from anything printable
    pub fn test_aborted(test: &str, reason: impl std::fmt::Display) -> Self {
        Self::TestAborted {
            test: test.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a file read error for `path`
    pub fn file_read(path: &std::path::Path, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Whether this error describes a broken test setup rather than a test
    /// that ran and failed
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::DuplicateTestCase(_)
                | Error::InvalidTestName(_)
                | Error::UnknownTestCase(_)
                | Error::SeriesParse(_)
                | Error::ConfigParse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_test() {
        let e = Error::UnknownTestCase("Missing".into());
        assert!(e.to_string().contains("'Missing'"));

        let e = Error::test_aborted("Boom", "exploded");
        assert_eq!(e.to_string(), "Test case 'Boom' aborted: exploded");
    }

    #[test]
    fn test_configuration_classification() {
        assert!(Error::DuplicateTestCase("A".into()).is_configuration());
        assert!(Error::UnknownTestCase("A".into()).is_configuration());
        assert!(!Error::NoAssertions("A".into()).is_configuration());
        assert!(!Error::TestsFailed { failed: 1, total: 2 }.is_configuration());
    }
}
