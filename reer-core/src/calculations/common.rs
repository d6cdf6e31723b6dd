//! Shared arithmetic for the tax and loan calculations.

use rust_decimal::{Decimal, RoundingStrategy};

const MONTHS_PER_YEAR: u32 = 12;

/// Rounds a money amount to cents, with midpoints rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use reer_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(22130.3876)), dec!(22130.39));
/// assert_eq!(round_half_up(dec!(405.105)), dec!(405.11));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two amounts.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Simple (non-compounding) interest on `principal` for `months` months at
/// an annual rate expressed as a fraction.
///
/// Returns `None` if the result does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use reer_core::calculations::common::simple_interest;
///
/// // 10,000 at 6% for a quarter
/// assert_eq!(simple_interest(dec!(10000), dec!(0.06), 3), Some(dec!(150)));
/// ```
pub fn simple_interest(
    principal: Decimal,
    annual_rate: Decimal,
    months: u32,
) -> Option<Decimal> {
    principal
        .checked_mul(annual_rate)?
        .checked_div(Decimal::from(MONTHS_PER_YEAR))?
        .checked_mul(Decimal::from(months))
}
