//! Test case registry
//!
//! Catalog of test case factories keyed by name. Test-definition modules
//! fill it through an explicit registration pass before any series runs.

use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::common::{Error, Result};
use crate::series::TestSeries;
use crate::test_case::TestBody;

/// Builds a fresh body for every execution
pub type TestFactory = Box<dyn Fn() -> Box<dyn TestBody> + Send + Sync>;

/// Name of the series returned by [`Registry::series_all`]
pub const ALL_SERIES: &str = "all";

/// Name to factory catalog
#[derive(Default)]
pub struct Registry {
    catalog: BTreeMap<String, TestFactory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`
    ///
    /// A second registration of the same name is rejected and leaves the
    /// first one in place.
    pub fn register<F, B>(&mut self, name: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn() -> B + Send + Sync + 'static,
        B: TestBody + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidTestName(name));
        }
        if self.catalog.contains_key(&name) {
            return Err(Error::DuplicateTestCase(name));
        }

        debug!(test = %name, "registered test case");
        self.catalog.insert(
            name,
            Box::new(move || Box::new(factory()) as Box<dyn TestBody>),
        );
        Ok(())
    }

    /// Register a type whose `Default` value is the body
    pub fn register_type<T>(&mut self, name: impl Into<String>) -> Result<()>
    where
        T: TestBody + Default + 'static,
    {
        self.register(name, T::default)
    }

    /// Construct a fresh body for `name`
    pub fn load(&self, name: &str) -> Result<Box<dyn TestBody>> {
        let factory = self
            .catalog
            .get(name)
            .ok_or_else(|| Error::UnknownTestCase(name.to_string()))?;
        Ok(factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.catalog.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Every registered name, sorted
    pub fn all_names(&self) -> Vec<String> {
        self.catalog.keys().cloned().collect()
    }

    /// A series named "all" that runs every registered case in name order
    pub fn series_all(&self) -> TestSeries {
        TestSeries::new(ALL_SERIES, self.all_names())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.catalog.keys().collect::<Vec<_>>())
            .finish()
    }
}
