use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Interest owed on the bridge loan, split by phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanCost {
    /// Interest on the full contribution until the refund arrives.
    pub bridge_interest: Decimal,
    /// Principal left once the refund has been applied to the loan.
    pub residual_principal: Decimal,
    /// Interest on the residual principal over the repayment horizon.
    pub residual_interest: Decimal,
    /// `bridge_interest + residual_interest`.
    pub total_interest: Decimal,
}

/// Whether the contribution pays off once interest is deducted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outlook {
    Favorable,
    Neutral,
    Unfavorable,
}

impl Outlook {
    pub fn from_net_gain(net_gain: Decimal) -> Self {
        if net_gain > Decimal::ZERO {
            Self::Favorable
        } else if net_gain < Decimal::ZERO {
            Self::Unfavorable
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Favorable => "favorable",
            Self::Neutral => "neutral",
            Self::Unfavorable => "unfavorable",
        }
    }
}

/// Advice about where the contribution moves taxable income relative to the
/// bracket thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Reduced income fell below the lowest positive threshold, where each
    /// further dollar contributed only saves the bottom rate.
    BelowLowestThreshold { threshold: Decimal, rate: Decimal },

    /// Income started above `threshold` and the contribution brought it below,
    /// removing all income taxed at `rate_avoided`.
    CrossedThreshold {
        threshold: Decimal,
        rate_avoided: Decimal,
    },

    None,
}

impl Advisory {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn message(&self) -> String {
        match self {
            Self::BelowLowestThreshold { threshold, rate } => format!(
                "Taxable income drops below ${}. The rate there falls to {}%, so \
                 the contribution loses much of its efficiency.",
                threshold.round_dp(0),
                percent(*rate)
            ),
            Self::CrossedThreshold {
                threshold,
                rate_avoided,
            } => format!(
                "Excellent strategy: taxable income moved below ${}, \
                 escaping the {}% bracket entirely.",
                threshold.round_dp(0),
                percent(*rate_avoided)
            ),
            Self::None => String::new(),
        }
    }
}

/// Formats a fractional rate as a whole-number-ish percentage (`0.3253` → `32.53`).
pub fn percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}

/// Everything a front end needs to present one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub income: Decimal,
    pub contribution: Decimal,
    /// Income once the contribution is deducted.
    pub reduced_income: Decimal,
    pub tax_without: Decimal,
    pub tax_with: Decimal,
    pub refund: Decimal,
    pub loan: LoanCost,
    pub interest_cost: Decimal,
    pub net_gain: Decimal,
    /// Rate on the last dollar of the original income.
    pub marginal_rate: Decimal,
    pub outlook: Outlook,
    pub advisory: Advisory,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn outlook_follows_sign_of_net_gain() {
        assert_eq!(Outlook::from_net_gain(dec!(0.01)), Outlook::Favorable);
        assert_eq!(Outlook::from_net_gain(dec!(0.00)), Outlook::Neutral);
        assert_eq!(Outlook::from_net_gain(dec!(-12.50)), Outlook::Unfavorable);
    }

    #[test]
    fn percent_strips_trailing_zeros() {
        assert_eq!(percent(dec!(0.25)).to_string(), "25");
        assert_eq!(percent(dec!(0.3253)).to_string(), "32.53");
        assert_eq!(percent(dec!(0.50)).to_string(), "50");
    }

    #[test]
    fn below_lowest_threshold_message_mentions_rate() {
        let advisory = Advisory::BelowLowestThreshold {
            threshold: dec!(51708),
            rate: dec!(0.25),
        };

        let msg = advisory.message();
        assert!(msg.contains("$51708"), "got: {msg}");
        assert!(msg.contains("25%"), "got: {msg}");
    }

    #[test]
    fn crossed_threshold_message_mentions_bracket() {
        let advisory = Advisory::CrossedThreshold {
            threshold: dec!(103545),
            rate_avoided: dec!(0.4112),
        };

        let msg = advisory.message();
        assert!(msg.contains("$103545"), "got: {msg}");
        assert!(msg.contains("41.12%"), "got: {msg}");
    }

    #[test]
    fn none_advisory_has_empty_message() {
        assert!(Advisory::None.is_none());
        assert!(Advisory::None.message().is_empty());
    }
}
