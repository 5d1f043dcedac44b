//! cat - a minimal unit-testing micro-framework
//!
//! Test bodies report assertions written as plain expressions with
//! [`check!`]; each one is decomposed into its operator and operand values.
//! Bodies are registered by name in a [`Registry`], grouped into a
//! [`TestSeries`], and executed by a [`TestRunner`] that streams progress to
//! the subscribed [`Reporter`]s.

pub mod assertion;
pub mod cli;
pub mod commands;
pub mod common;
pub mod registry;
pub mod reporter;
pub mod reporters;
pub mod runner;
pub mod series;
pub mod test_case;

pub use assertion::{Assertion, OpKind};
pub use common::{Error, Result};
pub use registry::Registry;
pub use reporter::{Reporter, Reporters};
pub use runner::{CaseResult, SeriesSummary, TestRunner};
pub use series::TestSeries;
pub use test_case::{TestBody, TestCase};
