//! Cost of borrowing the contribution.
//!
//! The contribution is funded by a loan. Until the refund arrives
//! (`bridge_months` after contributing) interest runs on the whole amount.
//! The refund then pays down the loan and whatever principal remains carries
//! simple interest for the repayment horizon. Nothing compounds.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use reer_core::LoanTerms;
//! use reer_core::calculations::loan_cost;
//!
//! let cost = loan_cost(dec!(10000), dec!(3248.29), dec!(0.06), 12, LoanTerms::default())
//!     .unwrap();
//!
//! assert_eq!(cost.bridge_interest, dec!(150.00));
//! assert_eq!(cost.residual_principal, dec!(6751.71));
//! assert_eq!(cost.residual_interest, dec!(405.10));
//! assert_eq!(cost.total_interest, dec!(555.10));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::{max, round_half_up, simple_interest};
use crate::models::{LoanCost, LoanTerms, ScenarioError};

/// Interest owed on a loan of `contribution`, part of which is repaid by
/// `refund` once the bridge period ends.
///
/// Each phase is rounded to cents, so `total_interest` is exactly the sum of
/// the two reported phases.
///
/// # Errors
///
/// Returns [`ScenarioError::AmountTooLarge`] when an interest amount does not
/// fit in a `Decimal`.
pub fn loan_cost(
    contribution: Decimal,
    refund: Decimal,
    loan_rate: Decimal,
    horizon_months: u32,
    terms: LoanTerms,
) -> Result<LoanCost, ScenarioError> {
    let interest = |principal: Decimal, months: u32| {
        simple_interest(principal, loan_rate, months)
            .map(round_half_up)
            .ok_or(ScenarioError::AmountTooLarge { principal, months })
    };

    let bridge_interest = interest(contribution, terms.bridge_months)?;
    let residual_principal = max(contribution - refund, Decimal::ZERO);
    let residual_interest = interest(residual_principal, horizon_months)?;
    let total_interest = bridge_interest.checked_add(residual_interest).ok_or(
        ScenarioError::AmountTooLarge {
            principal: contribution,
            months: terms.bridge_months.saturating_add(horizon_months),
        },
    )?;

    Ok(LoanCost {
        bridge_interest,
        residual_principal,
        residual_interest,
        total_interest,
    })
}
