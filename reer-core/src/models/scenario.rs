use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when scenario inputs are invalid.
///
/// Every variant names the offending input so a front end can point the user
/// at the right field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("income must be non-negative, got {0}")]
    NegativeIncome(Decimal),

    #[error("contribution must be non-negative, got {0}")]
    NegativeContribution(Decimal),

    #[error("contribution {contribution} exceeds income {income}")]
    ContributionExceedsIncome {
        contribution: Decimal,
        income: Decimal,
    },

    #[error("loan_rate must be non-negative, got {0}")]
    NegativeLoanRate(Decimal),

    /// The loan rate is a fraction; 6% is `0.06`, not `6`.
    #[error("loan_rate must be a fraction no greater than 1, got {0}")]
    LoanRateAboveOne(Decimal),

    /// Interest on `principal` does not fit in a `Decimal`.
    #[error("interest on {principal} over {months} months is too large to compute")]
    AmountTooLarge { principal: Decimal, months: u32 },

    /// A value falls outside the domain declared for an input field.
    #[error("{field} value {value} is outside its allowed domain")]
    OutOfDomain { field: &'static str, value: Decimal },
}

/// Terms of the bridge loan used to fund the contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Months between the contribution and the refund arriving. During this
    /// period interest accrues on the full contribution.
    pub bridge_months: u32,
}

impl LoanTerms {
    pub const DEFAULT_BRIDGE_MONTHS: u32 = 3;
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self {
            bridge_months: Self::DEFAULT_BRIDGE_MONTHS,
        }
    }
}

/// A single contribution scenario.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use reer_core::{Scenario, ScenarioError};
///
/// let scenario = Scenario {
///     income: dec!(80000),
///     contribution: dec!(90000),
///     loan_rate: dec!(0.06),
///     horizon_months: 12,
/// };
///
/// assert_eq!(
///     scenario.validate(),
///     Err(ScenarioError::ContributionExceedsIncome {
///         contribution: dec!(90000),
///         income: dec!(80000),
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Gross annual income.
    pub income: Decimal,
    /// Amount contributed, deducted from taxable income.
    pub contribution: Decimal,
    /// Annual loan interest rate as a fraction.
    pub loan_rate: Decimal,
    /// Months needed to repay whatever the refund does not cover.
    pub horizon_months: u32,
}

impl Scenario {
    /// Checks every input, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError`] if income, contribution or loan rate is
    /// negative, if the contribution exceeds income, or if the loan rate is
    /// above 1.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.income < Decimal::ZERO {
            return Err(ScenarioError::NegativeIncome(self.income));
        }
        if self.contribution < Decimal::ZERO {
            return Err(ScenarioError::NegativeContribution(self.contribution));
        }
        if self.contribution > self.income {
            return Err(ScenarioError::ContributionExceedsIncome {
                contribution: self.contribution,
                income: self.income,
            });
        }
        if self.loan_rate < Decimal::ZERO {
            return Err(ScenarioError::NegativeLoanRate(self.loan_rate));
        }
        if self.loan_rate > Decimal::ONE {
            return Err(ScenarioError::LoanRateAboveOne(self.loan_rate));
        }
        Ok(())
    }

    /// Taxable income once the contribution is deducted.
    pub fn reduced_income(&self) -> Decimal {
        self.income - self.contribution
    }
}
