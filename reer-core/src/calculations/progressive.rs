//! Progressive (marginal) tax evaluation over a [`BracketTable`].
//!
//! Income inside each bracket is taxed at that bracket's rate only, so the
//! tax function is continuous and piecewise linear: crossing a threshold
//! changes the slope, never the level.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use reer_core::{Bracket, BracketTable};
//!
//! let table = BracketTable::new(vec![
//!     Bracket::new(dec!(0), dec!(0.25)),
//!     Bracket::new(dec!(51708), dec!(0.3253)),
//!     Bracket::new(dec!(103545), dec!(0.4112)),
//! ])
//! .unwrap();
//!
//! // 0.25 × 51,708 + 0.3253 × (80,000 − 51,708)
//! assert_eq!(table.compute_tax(dec!(80000)).unwrap(), dec!(22130.3876));
//! assert_eq!(table.marginal_rate(dec!(80000)), dec!(0.3253));
//! ```

use rust_decimal::Decimal;

use crate::models::{BracketSlice, BracketTable, ScenarioError};

impl BracketTable {
    /// Total tax owed on `income`.
    ///
    /// The result is exact; callers decide when to round.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::NegativeIncome`] if `income` is negative.
    pub fn compute_tax(
        &self,
        income: Decimal,
    ) -> Result<Decimal, ScenarioError> {
        Ok(self.tax_breakdown(income)?.iter().map(|slice| slice.tax).sum())
    }

    /// Splits `income` across the brackets it reaches.
    ///
    /// Only brackets holding a positive slice of income are returned, lowest
    /// first. The `tax` fields sum to [`BracketTable::compute_tax`].
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::NegativeIncome`] if `income` is negative.
    pub fn tax_breakdown(
        &self,
        income: Decimal,
    ) -> Result<Vec<BracketSlice>, ScenarioError> {
        if income < Decimal::ZERO {
            return Err(ScenarioError::NegativeIncome(income));
        }

        let mut slices = Vec::new();
        for (index, bracket) in self.brackets().iter().enumerate() {
            if income <= bracket.threshold {
                break;
            }
            let upper = self.upper_bound(index);
            let ceiling = upper.map_or(income, |u| income.min(u));
            let taxable = ceiling - bracket.threshold;
            slices.push(BracketSlice {
                threshold: bracket.threshold,
                upper,
                rate: bracket.rate,
                taxable,
                tax: taxable * bracket.rate,
            });
        }

        Ok(slices)
    }

    /// Rate applied to the last dollar of `income`.
    ///
    /// Scans from the top bracket down and returns the rate of the first
    /// bracket whose threshold is strictly below `income`. At or below zero
    /// the bottom bracket's rate applies.
    pub fn marginal_rate(
        &self,
        income: Decimal,
    ) -> Decimal {
        let brackets = self.brackets();
        brackets
            .iter()
            .rev()
            .find(|b| b.threshold < income)
            .or_else(|| brackets.first())
            .map_or(Decimal::ZERO, |b| b.rate)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use crate::models::Bracket;

    use super::*;

    fn qc_2026() -> BracketTable {
        BracketTable::new(vec![
            Bracket::new(dec!(0), dec!(0.25)),
            Bracket::new(dec!(51708), dec!(0.3253)),
            Bracket::new(dec!(103545), dec!(0.4112)),
            Bracket::new(dec!(126000), dec!(0.4571)),
            Bracket::new(dec!(173205), dec!(0.50)),
            Bracket::new(dec!(243723), dec!(0.53)),
        ])
        .expect("valid table")
    }

    // =========================================================================
    // compute_tax tests
    // =========================================================================

    #[test]
    fn compute_tax_zero_income_is_zero() {
        assert_eq!(qc_2026().compute_tax(dec!(0)).unwrap(), dec!(0));
    }

    #[test]
    fn compute_tax_single_bracket() {
        assert_eq!(qc_2026().compute_tax(dec!(40000)).unwrap(), dec!(10000));
        assert_eq!(qc_2026().compute_tax(dec!(35000)).unwrap(), dec!(8750));
    }

    #[test]
    fn compute_tax_two_brackets() {
        let table = qc_2026();

        assert_eq!(table.compute_tax(dec!(80000)).unwrap(), dec!(22130.3876));
        assert_eq!(table.compute_tax(dec!(70000)).unwrap(), dec!(18877.3876));
    }

    #[test]
    fn compute_tax_exactly_at_threshold() {
        // 0.25 × 51,708
        assert_eq!(qc_2026().compute_tax(dec!(51708)).unwrap(), dec!(12927));
    }

    #[test]
    fn compute_tax_top_bracket_is_unbounded() {
        let table = qc_2026();
        let at_top = table.compute_tax(dec!(243723)).unwrap();
        let above = table.compute_tax(dec!(343723)).unwrap();

        assert_eq!(above - at_top, dec!(53000));
    }

    #[test]
    fn compute_tax_rejects_negative_income() {
        assert_eq!(
            qc_2026().compute_tax(dec!(-1)),
            Err(ScenarioError::NegativeIncome(dec!(-1)))
        );
    }

    // =========================================================================
    // tax_breakdown tests
    // =========================================================================

    #[test]
    fn tax_breakdown_lists_reached_brackets_only() {
        let slices = qc_2026().tax_breakdown(dec!(80000)).unwrap();

        assert_eq!(
            slices,
            vec![
                BracketSlice {
                    threshold: dec!(0),
                    upper: Some(dec!(51708)),
                    rate: dec!(0.25),
                    taxable: dec!(51708),
                    tax: dec!(12927),
                },
                BracketSlice {
                    threshold: dec!(51708),
                    upper: Some(dec!(103545)),
                    rate: dec!(0.3253),
                    taxable: dec!(28292),
                    tax: dec!(9203.3876),
                },
            ]
        );
    }

    #[test]
    fn tax_breakdown_of_zero_is_empty() {
        assert!(qc_2026().tax_breakdown(dec!(0)).unwrap().is_empty());
    }

    #[test]
    fn tax_breakdown_top_slice_has_no_upper_bound() {
        let slices = qc_2026().tax_breakdown(dec!(300000)).unwrap();

        assert_eq!(slices.len(), 6);
        assert_eq!(slices[5].upper, None);
        assert_eq!(slices[5].taxable, dec!(56277));
    }

    // =========================================================================
    // marginal_rate tests
    // =========================================================================

    #[test]
    fn marginal_rate_in_second_bracket() {
        assert_eq!(qc_2026().marginal_rate(dec!(80000)), dec!(0.3253));
    }

    #[test]
    fn marginal_rate_at_threshold_uses_lower_bracket() {
        // The threshold itself is the last dollar of the lower bracket.
        assert_eq!(qc_2026().marginal_rate(dec!(103545)), dec!(0.3253));
        assert_eq!(qc_2026().marginal_rate(dec!(103546)), dec!(0.4112));
    }

    #[test]
    fn marginal_rate_at_zero_is_bottom_rate() {
        assert_eq!(qc_2026().marginal_rate(dec!(0)), dec!(0.25));
    }

    #[test]
    fn marginal_rate_top_bracket() {
        assert_eq!(qc_2026().marginal_rate(dec!(1000000)), dec!(0.53));
    }

    // =========================================================================
    // properties
    // =========================================================================

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(256))]

        #[test]
        fn prop_compute_tax_is_monotonic(a in 0u32..400_000, b in 0u32..400_000) {
            let table = qc_2026();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };

            let tax_low = table.compute_tax(Decimal::from(low)).unwrap();
            let tax_high = table.compute_tax(Decimal::from(high)).unwrap();

            prop_assert!(tax_low <= tax_high);
        }

        #[test]
        fn prop_compute_tax_never_exceeds_income(income in 0u32..1_000_000) {
            let income = Decimal::from(income);
            let tax = qc_2026().compute_tax(income).unwrap();

            prop_assert!(tax >= Decimal::ZERO);
            prop_assert!(tax <= income);
        }

        #[test]
        fn prop_breakdown_sums_to_income(cents in 0u64..50_000_000) {
            let income = Decimal::new(cents as i64, 2);
            let slices = qc_2026().tax_breakdown(income).unwrap();
            let covered: Decimal = slices.iter().map(|s| s.taxable).sum();

            prop_assert_eq!(covered, income);
        }
    }

    #[test]
    fn slope_below_each_threshold_equals_bracket_rate() {
        let table = qc_2026();
        let step = dec!(0.01);

        for (index, bracket) in table.brackets().iter().enumerate().skip(1) {
            let below = table.compute_tax(bracket.threshold - step).unwrap();
            let at = table.compute_tax(bracket.threshold).unwrap();
            let lower_rate = table.brackets()[index - 1].rate;

            assert_eq!((at - below) / step, lower_rate, "bracket {index}");
        }
    }

    #[test]
    fn tax_is_continuous_at_thresholds() {
        let table = qc_2026();
        let step = dec!(0.0001);

        for bracket in table.brackets().iter().skip(1) {
            let below = table.compute_tax(bracket.threshold - step).unwrap();
            let above = table.compute_tax(bracket.threshold + step).unwrap();

            assert!(above - below <= step * Decimal::TWO, "jump at {}", bracket.threshold);
        }
    }
}
