//! Test series
//!
//! A series is a named, ordered list of test case names. Series files are
//! YAML documents:
//!
//! ```yaml
//! name: smoke
//! tests:
//!   - TestCasePass
//!   - TestCaseFail
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::common::{Error, Result};

/// Named, ordered list of test case names
///
/// Duplicates are allowed; each occurrence runs a fresh instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSeries {
    name: String,
    #[serde(default)]
    tests: Vec<String>,
}

impl TestSeries {
    pub fn new<I, S>(name: impl Into<String>, tests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            tests: tests.into_iter().map(Into::into).collect(),
        }
    }

    /// Label used in reports
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names to run, in order
    pub fn tests(&self) -> &[String] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Parse a series from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let series: TestSeries =
            serde_yaml::from_str(content).map_err(|e| Error::SeriesParse(e.to_string()))?;
        if series.name.is_empty() {
            return Err(Error::SeriesParse("series name must not be empty".to_string()));
        }
        Ok(series)
    }

    /// Load a series from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
        let series = Self::from_yaml(&content).map_err(|e| match e {
            Error::SeriesParse(msg) => Error::SeriesParse(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        debug!(path = %path.display(), series = %series.name, tests = series.len(), "loaded series");
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_order_and_duplicates() {
        let series = TestSeries::new("s", ["B", "A", "B"]);
        assert_eq!(series.name(), "s");
        assert_eq!(series.tests(), ["B", "A", "B"]);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_from_yaml() {
        let series = TestSeries::from_yaml("name: smoke\ntests:\n  - One\n  - Two\n").unwrap();
        assert_eq!(series, TestSeries::new("smoke", ["One", "Two"]));
    }

    #[test]
    fn test_from_yaml_without_tests_is_empty() {
        let series = TestSeries::from_yaml("name: nothing\n").unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_from_yaml_rejects_bad_documents() {
        assert!(matches!(
            TestSeries::from_yaml("tests: [A]\n"),
            Err(Error::SeriesParse(_))
        ));
        assert!(matches!(
            TestSeries::from_yaml("name: ''\ntests: [A]\n"),
            Err(Error::SeriesParse(_))
        ));
    }
}
