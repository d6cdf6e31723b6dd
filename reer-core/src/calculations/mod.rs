//! Tax and loan calculations for REER contribution scenarios.
//!
//! The progressive tax evaluation lives on [`BracketTable`](crate::BracketTable)
//! itself; this module builds the refund, loan cost and advice on top of it.

pub mod advisory;
pub mod common;
pub mod loan;
pub mod progressive;
pub mod scenario;

pub use advisory::{DEFAULT_ADVISED_BRACKET, advisory_for};
pub use loan::loan_cost;
pub use scenario::{ScenarioEvaluator, evaluate_scenario};
