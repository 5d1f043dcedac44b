//! Assertion decomposition
//!
//! `check!(lhs <op> rhs)` records the operator and both operand values of a
//! boolean expression without the author spelling any of them out twice.
//! The macro finds the outermost supported operator in the token stream and
//! expands into a two-stage builder: [`Decomposer::capture`] holds the left
//! operand, and the operator method on [`Captured`] evaluates the comparison
//! against the right operand and fills in the [`Assertion`].
//!
//! Supported operators are `==`, `!=`, `<`, `<=`, `>`, `>=` and `&&`. A
//! top-level `||`, or an expression with none of these operators, fails to
//! compile. Operands that contain `<` or `>` of their own (turbofish,
//! generic casts, closures) have to be parenthesized.

use serde::Serialize;
use std::fmt;

/// The binary operator an assertion was decomposed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    /// Not decomposed yet; never present in a completed assertion
    #[default]
    None,
    Eq,
    Ne,
    Le,
    Lt,
    Ge,
    Gt,
    And,
}

impl OpKind {
    /// Source spelling of the operator
    pub fn symbol(self) -> &'static str {
        match self {
            OpKind::None => "",
            OpKind::Eq => "==",
            OpKind::Ne => "!=",
            OpKind::Le => "<=",
            OpKind::Lt => "<",
            OpKind::Ge => ">=",
            OpKind::Gt => ">",
            OpKind::And => "&&",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpKind::None => write!(f, "none"),
            op => write!(f, "{}", op.symbol()),
        }
    }
}

/// One evaluated boolean expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assertion {
    expression: String,
    op: OpKind,
    result: bool,
    lhs: String,
    rhs: String,
}

impl Assertion {
    /// Verbatim source text of the expression
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn op(&self) -> OpKind {
        self.op
    }

    pub fn result(&self) -> bool {
        self.result
    }

    /// Rendered left operand, empty if the type has no `Debug` impl
    pub fn lhs(&self) -> &str {
        &self.lhs
    }

    /// Rendered right operand, empty if the type has no `Debug` impl or
    /// the right side of `&&` was short-circuited
    pub fn rhs(&self) -> &str {
        &self.rhs
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {} {})",
            self.expression, self.lhs, self.op, self.rhs
        )
    }
}

/// First stage: knows the expression text, waiting for the left operand
#[derive(Debug)]
pub struct Decomposer {
    assertion: Assertion,
}

impl Decomposer {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            assertion: Assertion {
                expression: expression.into(),
                op: OpKind::None,
                result: false,
                lhs: String::new(),
                rhs: String::new(),
            },
        }
    }

    /// Capture the left operand and its rendering
    pub fn capture<L: ?Sized>(mut self, lhs: &L, lhs_text: String) -> Captured<'_, L> {
        self.assertion.lhs = lhs_text;
        Captured {
            lhs,
            assertion: self.assertion,
        }
    }
}

/// Second stage: holds the captured left operand and the assertion being
/// built. Each operator method consumes it and yields the finished
/// [`Assertion`].
#[must_use = "a captured operand does nothing until an operator is applied"]
#[derive(Debug)]
pub struct Captured<'a, L: ?Sized> {
    lhs: &'a L,
    assertion: Assertion,
}

impl<L: ?Sized> Captured<'_, L> {
    fn finish(mut self, op: OpKind, result: bool, rhs_text: String) -> Assertion {
        self.assertion.op = op;
        self.assertion.result = result;
        self.assertion.rhs = rhs_text;
        self.assertion
    }

    pub fn eq<R: ?Sized>(self, rhs: &R, rhs_text: String) -> Assertion
    where
        L: PartialEq<R>,
    {
        let result = *self.lhs == *rhs;
        self.finish(OpKind::Eq, result, rhs_text)
    }

    pub fn ne<R: ?Sized>(self, rhs: &R, rhs_text: String) -> Assertion
    where
        L: PartialEq<R>,
    {
        let result = *self.lhs != *rhs;
        self.finish(OpKind::Ne, result, rhs_text)
    }

    pub fn lt<R: ?Sized>(self, rhs: &R, rhs_text: String) -> Assertion
    where
        L: PartialOrd<R>,
    {
        let result = *self.lhs < *rhs;
        self.finish(OpKind::Lt, result, rhs_text)
    }

    pub fn le<R: ?Sized>(self, rhs: &R, rhs_text: String) -> Assertion
    where
        L: PartialOrd<R>,
    {
        let result = *self.lhs <= *rhs;
        self.finish(OpKind::Le, result, rhs_text)
    }

    pub fn gt<R: ?Sized>(self, rhs: &R, rhs_text: String) -> Assertion
    where
        L: PartialOrd<R>,
    {
        let result = *self.lhs > *rhs;
        self.finish(OpKind::Gt, result, rhs_text)
    }

    pub fn ge<R: ?Sized>(self, rhs: &R, rhs_text: String) -> Assertion
    where
        L: PartialOrd<R>,
    {
        let result = *self.lhs >= *rhs;
        self.finish(OpKind::Ge, result, rhs_text)
    }
}

impl Captured<'_, bool> {
    /// Logical and. The right side only runs when the left side is `true`,
    /// otherwise the assertion is `false` with an empty right operand.
    pub fn and<F>(self, rhs: F) -> Assertion
    where
        F: FnOnce() -> (bool, String),
    {
        if !*self.lhs {
            return self.finish(OpKind::And, false, String::new());
        }
        let (result, rhs_text) = rhs();
        self.finish(OpKind::And, result, rhs_text)
    }
}

/// Operand wrapper used by `check!` to pick a rendering at compile time
#[doc(hidden)]
pub struct Render<'a, T: ?Sized>(pub &'a T);

#[doc(hidden)]
pub trait RenderDebug {
    fn render(&self) -> String;
}

impl<T: fmt::Debug + ?Sized> RenderDebug for Render<'_, T> {
    fn render(&self) -> String {
        format!("{:?}", self.0)
    }
}

/// Chosen through one extra autoref, so only when `RenderDebug` does not apply
#[doc(hidden)]
pub trait RenderFallback {
    fn render(&self) -> String;
}

impl<T: ?Sized> RenderFallback for &Render<'_, T> {
    fn render(&self) -> String {
        String::new()
    }
}

/// Decompose a binary boolean expression into an [`Assertion`]
///
/// ```
/// let a = cat::check!(1 + 1 == 2);
/// assert!(a.result());
/// assert_eq!(a.op(), cat::OpKind::Eq);
/// assert_eq!(a.lhs(), "2");
/// ```
#[macro_export]
macro_rules! check {
    ($($expr:tt)+) => {
        $crate::__check_scan!(@any [$($expr)+] [] $($expr)+)
    };
}

/// Single left-to-right scan over the top-level tokens of `check!`
///
/// `@any` has seen no operator yet, `@cmp` holds the first comparison split
/// and keeps looking for `&&`, `@and` holds the first `&&` split and only
/// looks for `||`. Each token costs one level of expansion.
#[doc(hidden)]
#[macro_export]
macro_rules! __check_scan {
    (@any [$($all:tt)+] [$($acc:tt)*] || $($rest:tt)*) => {
        $crate::__check_scan!(@or [$($all)+])
    };
    // leading `&&` is a double borrow, not the operator
    (@any [$($all:tt)+] [] && $($rest:tt)+) => {
        $crate::__check_scan!(@any [$($all)+] [&&] $($rest)+)
    };
    (@any [$($all:tt)+] [$($acc:tt)+] && $($rest:tt)+) => {
        $crate::__check_scan!(@and [$($all)+] [$($acc)+] [$($rest)+] $($rest)+)
    };
    (@any [$($all:tt)+] [$($acc:tt)+] == $($rest:tt)+) => {
        $crate::__check_scan!(@cmp [$($all)+] [$($acc)+ ==] [eq [$($acc)+] [$($rest)+]] $($rest)+)
    };
    (@any [$($all:tt)+] [$($acc:tt)+] != $($rest:tt)+) => {
        $crate::__check_scan!(@cmp [$($all)+] [$($acc)+ !=] [ne [$($acc)+] [$($rest)+]] $($rest)+)
    };
    (@any [$($all:tt)+] [$($acc:tt)+] <= $($rest:tt)+) => {
        $crate::__check_scan!(@cmp [$($all)+] [$($acc)+ <=] [le [$($acc)+] [$($rest)+]] $($rest)+)
    };
    (@any [$($all:tt)+] [$($acc:tt)+] >= $($rest:tt)+) => {
        $crate::__check_scan!(@cmp [$($all)+] [$($acc)+ >=] [ge [$($acc)+] [$($rest)+]] $($rest)+)
    };
    (@any [$($all:tt)+] [$($acc:tt)+] < $($rest:tt)+) => {
        $crate::__check_scan!(@cmp [$($all)+] [$($acc)+ <] [lt [$($acc)+] [$($rest)+]] $($rest)+)
    };
    (@any [$($all:tt)+] [$($acc:tt)+] > $($rest:tt)+) => {
        $crate::__check_scan!(@cmp [$($all)+] [$($acc)+ >] [gt [$($acc)+] [$($rest)+]] $($rest)+)
    };
    (@any [$($all:tt)+] [$($acc:tt)*] $head:tt $($rest:tt)*) => {
        $crate::__check_scan!(@any [$($all)+] [$($acc)* $head] $($rest)*)
    };
    (@any [$($all:tt)+] [$($acc:tt)*]) => {
        ::core::compile_error!(::core::concat!(
            "check! expects a binary `==`, `!=`, `<`, `<=`, `>`, `>=` or `&&` expression, got: ",
            ::core::stringify!($($all)+)
        ))
    };

    (@cmp [$($all:tt)+] [$($acc:tt)+] [$($split:tt)+] || $($rest:tt)*) => {
        $crate::__check_scan!(@or [$($all)+])
    };
    (@cmp [$($all:tt)+] [$($acc:tt)+] [$($split:tt)+] && $($rest:tt)+) => {
        $crate::__check_scan!(@and [$($all)+] [$($acc)+] [$($rest)+] $($rest)+)
    };
    (@cmp [$($all:tt)+] [$($acc:tt)+] [$($split:tt)+] $head:tt $($rest:tt)*) => {
        $crate::__check_scan!(@cmp [$($all)+] [$($acc)+ $head] [$($split)+] $($rest)*)
    };
    (@cmp [$($all:tt)+] [$($acc:tt)+] [$method:ident [$($lhs:tt)+] [$($rhs:tt)+]]) => {
        $crate::__check_build!($method [$($all)+] [$($lhs)+] [$($rhs)+])
    };

    (@and [$($all:tt)+] [$($lhs:tt)+] [$($rhs:tt)+] || $($rest:tt)*) => {
        $crate::__check_scan!(@or [$($all)+])
    };
    (@and [$($all:tt)+] [$($lhs:tt)+] [$($rhs:tt)+] $head:tt $($rest:tt)*) => {
        $crate::__check_scan!(@and [$($all)+] [$($lhs)+] [$($rhs)+] $($rest)*)
    };
    (@and [$($all:tt)+] [$($lhs:tt)+] [$($rhs:tt)+]) => {
        $crate::__check_build!(and [$($all)+] [$($lhs)+] [$($rhs)+])
    };

    (@or [$($all:tt)+]) => {
        ::core::compile_error!(::core::concat!(
            "check! does not support a top-level `||`, parenthesize it: ",
            ::core::stringify!($($all)+)
        ))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_build {
    (and [$($all:tt)+] [$($lhs:tt)+] [$($rhs:tt)+]) => {{
        #[allow(unused_imports)]
        use $crate::assertion::{RenderDebug as _, RenderFallback as _};
        let lhs: &bool = &($($lhs)+);
        let lhs_text = (&$crate::assertion::Render(lhs)).render();
        $crate::assertion::Decomposer::new(::core::stringify!($($all)+))
            .capture(lhs, lhs_text)
            .and(|| {
                let rhs: bool = $($rhs)+;
                let rhs_text = (&$crate::assertion::Render(&rhs)).render();
                (rhs, rhs_text)
            })
    }};
    ($method:ident [$($all:tt)+] [$($lhs:tt)+] [$($rhs:tt)+]) => {{
        #[allow(unused_imports)]
        use $crate::assertion::{RenderDebug as _, RenderFallback as _};
        let lhs = &($($lhs)+);
        let lhs_text = (&$crate::assertion::Render(lhs)).render();
        let rhs = &($($rhs)+);
        let rhs_text = (&$crate::assertion::Render(rhs)).render();
        $crate::assertion::Decomposer::new(::core::stringify!($($all)+))
            .capture(lhs, lhs_text)
            .$method(rhs, rhs_text)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passing_scenario() {
        let all = [
            crate::check!(1 + 1 == 2),
            crate::check!(1 != 2),
            crate::check!(1 < 2),
            crate::check!(2 <= 2),
            crate::check!(4 >= 3),
            crate::check!(4 > 3),
            crate::check!(true && true),
        ];
        let ops: Vec<OpKind> = all.iter().map(|a| a.op()).collect();
        assert_eq!(
            ops,
            [
                OpKind::Eq,
                OpKind::Ne,
                OpKind::Lt,
                OpKind::Le,
                OpKind::Ge,
                OpKind::Gt,
                OpKind::And
            ]
        );
        assert!(all.iter().all(|a| a.result()));
    }

    #[test]
    fn test_failing_scenario() {
        let all = [
            crate::check!(1 + 1 == 3),
            crate::check!(1 != 1),
            crate::check!(3 < 2),
            crate::check!(4 <= 3),
            crate::check!(2 >= 3),
            crate::check!(2 > 3),
            crate::check!(true && false),
        ];
        assert!(all.iter().all(|a| !a.result()));
        assert!(all.iter().all(|a| a.op() != OpKind::None));
    }

    #[test]
    fn test_operand_text() {
        let a = crate::check!(1 + 1 == 3);
        assert_eq!(a.expression(), "1 + 1 == 3");
        assert_eq!(a.lhs(), "2");
        assert_eq!(a.rhs(), "3");
        assert_eq!(a.to_string(), "1 + 1 == 3 (2 == 3)");
    }

    #[test]
    fn test_operands_are_not_moved() {
        let names = vec!["a".to_string(), "b".to_string()];
        let a = crate::check!(names.len() == 2);
        let b = crate::check!(names == vec!["a".to_string(), "b".to_string()]);
        assert!(a.result() && b.result());
        assert_eq!(names.len(), 2);
        assert_eq!(b.lhs(), r#"["a", "b"]"#);
    }

    #[test]
    fn test_mixed_operand_types() {
        let owned = String::from("cat");
        let a = crate::check!(owned == "cat");
        assert!(a.result());
        assert_eq!(a.lhs(), "\"cat\"");
        assert_eq!(a.rhs(), "\"cat\"");
    }

    #[test]
    fn test_operand_without_debug_renders_empty() {
        struct Opaque(u8);
        impl PartialEq for Opaque {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        let a = crate::check!(Opaque(1) == Opaque(1));
        assert!(a.result());
        assert_eq!(a.lhs(), "");
        assert_eq!(a.rhs(), "");
    }

    #[test]
    fn test_and_splits_at_outermost_operator() {
        let x = 5;
        let a = crate::check!(x > 1 && x < 3);
        assert_eq!(a.op(), OpKind::And);
        assert!(!a.result());
        assert_eq!(a.lhs(), "true");
        assert_eq!(a.rhs(), "false");
    }

    #[test]
    fn test_and_short_circuits() {
        let value: Option<i32> = None;
        let a = crate::check!(value.is_some() && value.unwrap() > 0);
        assert!(!a.result());
        assert_eq!(a.lhs(), "false");
        assert_eq!(a.rhs(), "");
    }

    #[test]
    fn test_parenthesized_operands() {
        let a = crate::check!((1 < 2) == (3 < 4));
        assert_eq!(a.op(), OpKind::Eq);
        assert!(a.result());
        assert_eq!(a.lhs(), "true");
    }

    #[test]
    fn test_long_operands() {
        let a = crate::check!(
            1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1
                + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1
                == 40
        );
        assert_eq!(a.op(), OpKind::Eq);
        assert!(a.result());
        assert_eq!(a.lhs(), "40");

        let b = crate::check!(
            1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 < 30
                && 2 + 2 + 2 + 2 + 2 + 2 + 2 + 2 + 2 + 2 + 2 + 2 + 2 + 2 + 2 + 2 + 2 + 2 + 2 + 2
                    >= 40
        );
        assert_eq!(b.op(), OpKind::And);
        assert!(b.result());
        assert_eq!(b.lhs(), "true");
        assert_eq!(b.rhs(), "true");
    }

    #[test]
    fn test_builder_directly() {
        let lhs = 3.5_f64;
        let a = Decomposer::new("lhs >= 4.0")
            .capture(&lhs, "3.5".into())
            .ge(&4.0, "4.0".into());
        assert_eq!(a.op(), OpKind::Ge);
        assert!(!a.result());
        assert_eq!(a.expression(), "lhs >= 4.0");
    }

    #[test]
    fn test_nan_comparisons_are_false() {
        let nan = f64::NAN;
        assert!(!crate::check!(nan == nan).result());
        assert!(!crate::check!(nan < 1.0).result());
        assert!(crate::check!(nan != nan).result());
    }

    #[test]
    fn test_op_symbols() {
        assert_eq!(OpKind::Le.symbol(), "<=");
        assert_eq!(OpKind::And.to_string(), "&&");
        assert_eq!(OpKind::None.to_string(), "none");
    }
}
