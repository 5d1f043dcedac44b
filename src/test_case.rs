//! Test cases and the verdict fold
//!
//! A [`TestBody`] is the user-written logic. A [`TestCase`] is the record the
//! runner creates for one execution of a body: it folds every assertion the
//! body reports into a verdict and streams each one to the reporters.

use tracing::trace;

use crate::assertion::Assertion;
use crate::common::{Error, Result};
use crate::reporter::Reporters;

/// User logic of a test case
///
/// Only assertions passed to [`TestCase::record_assertion`] count toward the
/// verdict. Returning `Err` aborts the whole series.
pub trait TestBody {
    fn run(&mut self, case: &mut TestCase<'_>) -> Result<()>;
}

impl<F> TestBody for F
where
    F: FnMut(&mut TestCase<'_>) -> Result<()>,
{
    fn run(&mut self, case: &mut TestCase<'_>) -> Result<()> {
        self(case)
    }
}

/// One execution of a named test
pub struct TestCase<'r> {
    name: String,
    verdict: Option<bool>,
    assertions: usize,
    reporters: &'r Reporters<'r>,
}

impl<'r> TestCase<'r> {
    pub fn new(name: impl Into<String>, reporters: &'r Reporters<'r>) -> Self {
        Self {
            name: name.into(),
            verdict: None,
            assertions: 0,
            reporters,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fold an assertion into the verdict and hand it to every reporter
    ///
    /// Returns the assertion's own result so call sites can bail out early.
    pub fn record_assertion(&mut self, assertion: Assertion) -> bool {
        let result = assertion.result();
        self.verdict = Some(self.verdict.unwrap_or(true) && result);
        self.assertions += 1;

        trace!(
            test = %self.name,
            expression = assertion.expression(),
            result,
            "assertion recorded"
        );

        let reporters = self.reporters;
        reporters.assert(self, &assertion);
        result
    }

    /// Shorthand for [`record_assertion`](Self::record_assertion)
    pub fn check(&mut self, assertion: Assertion) -> bool {
        self.record_assertion(assertion)
    }

    /// The AND of every recorded result
    pub fn verdict(&self) -> Result<bool> {
        self.verdict
            .ok_or_else(|| Error::NoAssertions(self.name.clone()))
    }

    /// Whether at least one assertion was recorded and none failed
    pub fn passed(&self) -> bool {
        self.verdict == Some(true)
    }

    /// Number of assertions recorded so far
    pub fn assertions(&self) -> usize {
        self.assertions
    }
}

impl std::fmt::Debug for TestCase<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("verdict", &self.verdict)
            .field("assertions", &self.assertions)
            .finish()
    }
}

/// Declare a test case type
///
/// Expands to a unit struct implementing [`TestBody`] with a `NAME`
/// constant equal to the identifier. `?` works inside the body.
///
/// ```
/// cat::test_case! {
///     fn Arithmetic(t) {
///         t.check(cat::check!(1 + 1 == 2));
///     }
/// }
/// assert_eq!(Arithmetic::NAME, "Arithmetic");
/// ```
#[macro_export]
macro_rules! test_case {
    ($(#[$meta:meta])* $vis:vis fn $name:ident($case:ident) $body:block) => {
        $(#[$meta])*
        #[allow(non_camel_case_types)]
        #[derive(Debug, Default, Clone, Copy)]
        $vis struct $name;

        impl $name {
            pub const NAME: &'static str = ::core::stringify!($name);
        }

        impl $crate::TestBody for $name {
            #[allow(unreachable_code)]
            fn run(&mut self, $case: &mut $crate::TestCase<'_>) -> $crate::Result<()> {
                $body;
                ::core::result::Result::Ok(())
            }
        }
    };
}

/// Register `test_case!` types in the order given
///
/// Stops at the first registration error.
#[macro_export]
macro_rules! register_tests {
    ($registry:expr, [$($case:ty),* $(,)?]) => {{
        let registry: &mut $crate::Registry = $registry;
        (|| -> $crate::Result<()> {
            $(registry.register_type::<$case>(<$case>::NAME)?;)*
            ::core::result::Result::Ok(())
        })()
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::RecordingReporter;

    #[test]
    fn test_verdict_requires_an_assertion() {
        let reporters = Reporters::new();
        let case = TestCase::new("Empty", &reporters);
        assert!(matches!(case.verdict(), Err(Error::NoAssertions(name)) if name == "Empty"));
        assert!(!case.passed());
    }

    #[test]
    fn test_fold_is_and() {
        let reporters = Reporters::new();
        let mut case = TestCase::new("Fold", &reporters);
        case.record_assertion(crate::check!(1 == 1));
        case.record_assertion(crate::check!(2 == 2));
        assert!(case.verdict().unwrap());

        case.record_assertion(crate::check!(1 == 2));
        case.record_assertion(crate::check!(3 == 3));
        assert!(!case.verdict().unwrap());
        assert_eq!(case.assertions(), 4);
    }

    #[test]
    fn test_first_failure_seeds_false() {
        let reporters = Reporters::new();
        let mut case = TestCase::new("Seed", &reporters);
        assert!(!case.check(crate::check!(1 > 2)));
        assert!(!case.verdict().unwrap());
    }

    #[test]
    fn test_assertions_reach_every_reporter_in_order() {
        let first = RecordingReporter::new();
        let second = RecordingReporter::new();
        let mut reporters = Reporters::new();
        reporters.add(&first);
        reporters.add(&second);

        let mut case = TestCase::new("Forward", &reporters);
        assert!(case.record_assertion(crate::check!(4 >= 3)));

        for recorder in [&first, &second] {
            let events = recorder.events();
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].to_string(), "assert(Forward, 4 >= 3 = true)");
        }
    }

    #[test]
    fn test_function_body() {
        let reporters = Reporters::new();
        let mut case = TestCase::new("Function", &reporters);
        fn body(t: &mut TestCase<'_>) -> Result<()> {
            t.check(crate::check!(1 < 2));
            Ok(())
        }
        let mut body = body;
        body.run(&mut case).unwrap();
        assert!(case.passed());
    }

    crate::test_case! {
        fn MacroDeclared(t) {
            t.check(crate::check!(2 <= 2));
            t.check(crate::check!(true && true));
        }
    }

    #[test]
    fn test_macro_declared_case() {
        assert_eq!(MacroDeclared::NAME, "MacroDeclared");
        let reporters = Reporters::new();
        let mut case = TestCase::new(MacroDeclared::NAME, &reporters);
        MacroDeclared.run(&mut case).unwrap();
        assert_eq!(case.assertions(), 2);
        assert!(case.verdict().unwrap());
    }
}
