//! Built-in test cases shipped with the binary
//!
//! `TestCaseFail` fails on purpose, so running the full series exits with
//! a non-zero status.

use cat::{check, register_tests, test_case, Registry, Result};

test_case! {
    /// Every supported operator, every assertion true
    fn TestCasePass(t) {
        t.check(check!(1 + 1 == 2));
        t.check(check!(1 != 2));
        t.check(check!(1 < 2));
        t.check(check!(2 <= 2));
        t.check(check!(4 >= 3));
        t.check(check!(4 > 3));
        t.check(check!(true && true));
    }
}

test_case! {
    /// Every supported operator, every assertion false
    fn TestCaseFail(t) {
        t.check(check!(1 + 1 == 3));
        t.check(check!(1 != 1));
        t.check(check!(3 < 2));
        t.check(check!(4 <= 3));
        t.check(check!(2 >= 3));
        t.check(check!(2 > 3));
        t.check(check!(true && false));
    }
}

test_case! {
    fn Strings(t) {
        let greeting = format!("{}, {}", "hello", "cat");
        t.check(check!(greeting == "hello, cat"));
        t.check(check!(greeting.len() > 5));
        t.check(check!(greeting.as_str() < "world"));
    }
}

test_case! {
    fn Collections(t) {
        let mut primes = vec![7, 2, 5, 3];
        primes.sort_unstable();
        t.check(check!(primes == [2, 3, 5, 7]));
        t.check(check!(primes.first() == Some(&2)));
        t.check(check!((primes.iter().sum::<i32>()) >= 17));
    }
}

test_case! {
    fn ShortCircuit(t) {
        let missing: Option<u32> = None;
        let present = Some(3u32);
        t.check(check!(missing.is_none() && true));
        t.check(check!(present.is_some() && present.unwrap_or(0) == 3));
    }
}

/// Register every built-in case
pub fn register(registry: &mut Registry) -> Result<()> {
    register_tests!(
        registry,
        [TestCasePass, TestCaseFail, Strings, Collections, ShortCircuit]
    )
}
