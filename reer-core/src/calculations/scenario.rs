//! Refund, interest and net gain of a single contribution scenario.
//!
//! # Steps
//!
//! | Step | Value |
//! |------|-------|
//! | 1    | Tax on gross income |
//! | 2    | Tax on income minus the contribution |
//! | 3    | Refund: step 1 − step 2, from the exact taxes |
//! | 4    | Bridge interest on the full contribution until the refund arrives |
//! | 5    | Residual principal: contribution − refund, minimum 0 |
//! | 6    | Interest on the residual over the repayment horizon |
//! | 7    | Net gain: refund − (step 4 + step 6) |
//!
//! Steps 3, 4 and 6 are rounded to cents, so the interest cost and net gain
//! are exactly the sum or difference of the reported parts. The refund is
//! the exact tax difference rounded once; the reported taxes are each
//! rounded for display and may differ from it by a cent.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use reer_core::{Bracket, BracketTable, Outlook, Scenario};
//! use reer_core::calculations::ScenarioEvaluator;
//!
//! let table = BracketTable::new(vec![
//!     Bracket::new(dec!(0), dec!(0.25)),
//!     Bracket::new(dec!(51708), dec!(0.3253)),
//!     Bracket::new(dec!(103545), dec!(0.4112)),
//! ])
//! .unwrap();
//!
//! let scenario = Scenario {
//!     income: dec!(80000),
//!     contribution: dec!(10000),
//!     loan_rate: dec!(0.06),
//!     horizon_months: 12,
//! };
//!
//! let result = ScenarioEvaluator::new(&table).evaluate(&scenario).unwrap();
//!
//! assert_eq!(result.refund, dec!(3253.00));
//! assert_eq!(result.interest_cost, dec!(554.82));
//! assert_eq!(result.net_gain, dec!(2698.18));
//! assert_eq!(result.outlook, Outlook::Favorable);
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::advisory::{DEFAULT_ADVISED_BRACKET, advisory_for};
use crate::calculations::common::round_half_up;
use crate::calculations::loan::loan_cost;
use crate::models::{BracketTable, LoanTerms, Outlook, Scenario, ScenarioError, ScenarioResult};

/// Evaluates contribution scenarios against one bracket table.
///
/// Holds no mutable state: evaluating the same scenario twice gives the same
/// result, and one evaluator can be shared between threads.
#[derive(Debug, Clone)]
pub struct ScenarioEvaluator<'a> {
    table: &'a BracketTable,
    terms: LoanTerms,
    advised_bracket: usize,
}

impl<'a> ScenarioEvaluator<'a> {
    /// Creates an evaluator using the default three-month bridge period.
    pub fn new(table: &'a BracketTable) -> Self {
        Self {
            table,
            terms: LoanTerms::default(),
            advised_bracket: DEFAULT_ADVISED_BRACKET,
        }
    }

    pub fn with_terms(
        mut self,
        terms: LoanTerms,
    ) -> Self {
        self.terms = terms;
        self
    }

    /// Index of the bracket whose threshold the crossing advisory watches.
    pub fn with_advised_bracket(
        mut self,
        index: usize,
    ) -> Self {
        self.advised_bracket = index;
        self
    }

    pub fn table(&self) -> &BracketTable {
        self.table
    }

    /// Evaluates one scenario.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError`] if the scenario fails validation or its
    /// interest is too large to represent.
    pub fn evaluate(
        &self,
        scenario: &Scenario,
    ) -> Result<ScenarioResult, ScenarioError> {
        scenario.validate()?;

        let reduced_income = scenario.reduced_income();
        let exact_without = self.table.compute_tax(scenario.income)?;
        let exact_with = self.table.compute_tax(reduced_income)?;
        let refund = round_half_up(exact_without - exact_with);

        let loan = loan_cost(
            scenario.contribution,
            refund,
            scenario.loan_rate,
            scenario.horizon_months,
            self.terms,
        )?;
        let interest_cost = loan.total_interest;
        let net_gain = refund - interest_cost;
        let outlook = Outlook::from_net_gain(net_gain);

        let advisory = advisory_for(
            self.table,
            self.advised_bracket,
            scenario.income,
            reduced_income,
        );
        if !advisory.is_none() {
            debug!(?advisory, "threshold advisory");
        }
        if outlook == Outlook::Unfavorable {
            warn!(
                refund = %refund,
                interest_cost = %interest_cost,
                "Interest cost exceeds refund; contribution loses money"
            );
        }

        debug!(
            income = %scenario.income,
            contribution = %scenario.contribution,
            refund = %refund,
            interest_cost = %interest_cost,
            net_gain = %net_gain,
            "evaluated scenario"
        );

        Ok(ScenarioResult {
            income: scenario.income,
            contribution: scenario.contribution,
            reduced_income,
            tax_without: round_half_up(exact_without),
            tax_with: round_half_up(exact_with),
            refund,
            loan,
            interest_cost,
            net_gain,
            marginal_rate: self.table.marginal_rate(scenario.income),
            outlook,
            advisory,
        })
    }

    /// Evaluates every contribution in `options` that does not exceed
    /// `income`, keeping the order of `options`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScenarioError`] encountered, e.g. for a negative
    /// income or loan rate. Income and rate are checked before any option
    /// is filtered out.
    pub fn sweep(
        &self,
        income: Decimal,
        loan_rate: Decimal,
        horizon_months: u32,
        options: &[Decimal],
    ) -> Result<Vec<ScenarioResult>, ScenarioError> {
        Scenario {
            income,
            contribution: Decimal::ZERO,
            loan_rate,
            horizon_months,
        }
        .validate()?;

        options
            .iter()
            .filter(|&&contribution| contribution <= income)
            .map(|&contribution| {
                self.evaluate(&Scenario {
                    income,
                    contribution,
                    loan_rate,
                    horizon_months,
                })
            })
            .collect()
    }
}

/// Evaluates `scenario` with the default loan terms.
///
/// Shorthand for `ScenarioEvaluator::new(table).evaluate(scenario)`.
pub fn evaluate_scenario(
    table: &BracketTable,
    scenario: &Scenario,
) -> Result<ScenarioResult, ScenarioError> {
    ScenarioEvaluator::new(table).evaluate(scenario)
}
