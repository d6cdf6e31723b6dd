//! Threshold advice for a contribution.

use rust_decimal::Decimal;

use crate::models::{Advisory, BracketTable};

/// Bracket whose threshold is watched for the crossing advisory: the one
/// starting at 103,545 (41.12%) in the Québec + Federal table.
pub const DEFAULT_ADVISED_BRACKET: usize = 2;

/// Picks the advisory for moving taxable income from `income` down to
/// `reduced_income`.
///
/// Dropping below the lowest positive threshold takes precedence. Otherwise
/// the threshold of bracket `advised_bracket` is reported as crossed when it
/// lies strictly between the two incomes. An index past the end of the
/// table never advises a crossing.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use reer_core::{Advisory, Bracket, BracketTable};
/// use reer_core::calculations::advisory::{DEFAULT_ADVISED_BRACKET, advisory_for};
///
/// let table = BracketTable::new(vec![
///     Bracket::new(dec!(0), dec!(0.25)),
///     Bracket::new(dec!(51708), dec!(0.3253)),
///     Bracket::new(dec!(103545), dec!(0.4112)),
/// ])
/// .unwrap();
///
/// assert_eq!(
///     advisory_for(&table, DEFAULT_ADVISED_BRACKET, dec!(110000), dec!(100000)),
///     Advisory::CrossedThreshold { threshold: dec!(103545), rate_avoided: dec!(0.4112) },
/// );
/// ```
pub fn advisory_for(
    table: &BracketTable,
    advised_bracket: usize,
    income: Decimal,
    reduced_income: Decimal,
) -> Advisory {
    let Some(lowest) = table.lowest_positive_threshold() else {
        return Advisory::None;
    };

    if reduced_income < lowest.threshold {
        return Advisory::BelowLowestThreshold {
            threshold: lowest.threshold,
            rate: table.brackets()[0].rate,
        };
    }

    match table.brackets().get(advised_bracket) {
        Some(b) if reduced_income < b.threshold && b.threshold < income => {
            Advisory::CrossedThreshold {
                threshold: b.threshold,
                rate_avoided: b.rate,
            }
        }
        _ => Advisory::None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
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

    fn advise(
        income: Decimal,
        reduced_income: Decimal,
    ) -> Advisory {
        advisory_for(&qc_2026(), DEFAULT_ADVISED_BRACKET, income, reduced_income)
    }

    #[test]
    fn below_lowest_threshold_warns() {
        let advisory = advise(dec!(60000), dec!(50000));

        assert_eq!(
            advisory,
            Advisory::BelowLowestThreshold {
                threshold: dec!(51708),
                rate: dec!(0.25),
            }
        );
    }

    #[test]
    fn below_lowest_threshold_wins_over_crossing() {
        // Crosses 103,545 too, but the low-bracket warning takes precedence.
        let advisory = advise(dec!(110000), dec!(50000));

        assert!(matches!(advisory, Advisory::BelowLowestThreshold { .. }));
    }

    #[test]
    fn crossing_41_percent_threshold() {
        let advisory = advise(dec!(110000), dec!(95000));

        assert_eq!(
            advisory,
            Advisory::CrossedThreshold {
                threshold: dec!(103545),
                rate_avoided: dec!(0.4112),
            }
        );
    }

    #[test]
    fn crossing_higher_thresholds_still_reports_advised_bracket() {
        // 130,000 → 100,000 also crosses 126,000, but only 103,545 is watched.
        let advisory = advise(dec!(130000), dec!(100000));

        assert_eq!(
            advisory,
            Advisory::CrossedThreshold {
                threshold: dec!(103545),
                rate_avoided: dec!(0.4112),
            }
        );
    }

    #[test]
    fn crossing_only_higher_thresholds_is_not_reported() {
        let advisory = advise(dec!(180000), dec!(120000));

        assert_eq!(advisory, Advisory::None);
    }

    #[test]
    fn advised_bracket_is_configurable() {
        let advisory = advisory_for(&qc_2026(), 3, dec!(130000), dec!(100000));

        assert_eq!(
            advisory,
            Advisory::CrossedThreshold {
                threshold: dec!(126000),
                rate_avoided: dec!(0.4571),
            }
        );
    }

    #[test]
    fn advised_bracket_past_table_end_never_advises_crossing() {
        assert_eq!(
            advisory_for(&qc_2026(), 9, dec!(300000), dec!(100000)),
            Advisory::None
        );
    }

    #[test]
    fn crossing_lowest_threshold_alone_is_not_reported() {
        // 90,000 → 60,000 stays in the 32.53% bracket, above 51,708.
        let advisory = advise(dec!(90000), dec!(60000));

        assert_eq!(advisory, Advisory::None);
    }

    #[test]
    fn landing_exactly_on_threshold_is_not_a_crossing() {
        let advisory = advise(dec!(110000), dec!(103545));

        assert_eq!(advisory, Advisory::None);
    }

    #[test]
    fn no_contribution_has_no_advisory() {
        assert_eq!(advise(dec!(80000), dec!(80000)), Advisory::None);
    }

    #[test]
    fn low_income_without_contribution_still_warns() {
        let advisory = advise(dec!(40000), dec!(40000));

        assert!(matches!(advisory, Advisory::BelowLowestThreshold { .. }));
    }

    #[test]
    fn flat_table_never_advises() {
        let flat = BracketTable::new(vec![Bracket::new(dec!(0), dec!(0.2))]).unwrap();

        assert_eq!(
            advisory_for(&flat, DEFAULT_ADVISED_BRACKET, dec!(50000), dec!(0)),
            Advisory::None
        );
    }
}
