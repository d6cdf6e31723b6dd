//! Declarative description of the planner's inputs.
//!
//! Front ends build their widgets from [`PlannerInputs`] instead of
//! hard-coding ranges, and hand the raw values back through
//! [`PlannerInputs::scenario`] to get a validated [`Scenario`].

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::models::{Scenario, ScenarioError};

/// Domain of a single input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    /// Non-negative money amount; `step` is the suggested increment.
    Currency { step: Decimal },
    /// Percentage between `min` and `max` inclusive.
    Percentage { min: Decimal, max: Decimal },
    /// One of a fixed set of amounts.
    Choice { options: Vec<Decimal> },
    /// Whole number of months, at least `min`.
    Months { min: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub default: Decimal,
}

impl InputField {
    /// Checks `value` against this field's domain.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::OutOfDomain`] naming this field.
    pub fn check(
        &self,
        value: Decimal,
    ) -> Result<(), ScenarioError> {
        let ok = match &self.kind {
            InputKind::Currency { .. } => value >= Decimal::ZERO,
            InputKind::Percentage { min, max } => value >= *min && value <= *max,
            InputKind::Choice { options } => options.contains(&value),
            InputKind::Months { min } => {
                value.fract().is_zero()
                    && value >= Decimal::from(*min)
                    && value.to_u32().is_some()
            }
        };

        if ok {
            Ok(())
        } else {
            Err(ScenarioError::OutOfDomain {
                field: self.name,
                value,
            })
        }
    }
}

/// The four inputs of the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannerInputs {
    pub income: InputField,
    pub loan_rate: InputField,
    pub contribution: InputField,
    pub horizon_months: InputField,
}

impl PlannerInputs {
    /// Contribution amounts offered by the planner.
    pub const CONTRIBUTION_OPTIONS: [i64; 11] = [
        0, 1000, 5000, 10000, 15000, 20000, 25000, 30000, 40000, 50000, 60000,
    ];

    /// Inputs with their usual domains and defaults: 80,000 income, a 6%
    /// loan, a 10,000 contribution and 12 months to repay.
    pub fn standard() -> Self {
        Self {
            income: InputField {
                name: "income",
                label: "Gross salary ($)",
                kind: InputKind::Currency {
                    step: Decimal::from(1000),
                },
                default: Decimal::from(80000),
            },
            loan_rate: InputField {
                name: "loan_rate",
                label: "Loan interest (%)",
                kind: InputKind::Percentage {
                    min: Decimal::ZERO,
                    max: Decimal::from(15),
                },
                default: Decimal::from(6),
            },
            contribution: InputField {
                name: "contribution",
                label: "REER contribution ($)",
                kind: InputKind::Choice {
                    options: Self::CONTRIBUTION_OPTIONS
                        .iter()
                        .map(|&amount| Decimal::from(amount))
                        .collect(),
                },
                default: Decimal::from(10000),
            },
            horizon_months: InputField {
                name: "horizon_months",
                label: "Months to repay the remaining debt",
                kind: InputKind::Months { min: 1 },
                default: Decimal::from(12),
            },
        }
    }

    pub fn fields(&self) -> [&InputField; 4] {
        [
            &self.income,
            &self.loan_rate,
            &self.contribution,
            &self.horizon_months,
        ]
    }

    /// Contribution amounts offered, or an empty slice if the contribution
    /// field is not a choice.
    pub fn contribution_options(&self) -> &[Decimal] {
        match &self.contribution.kind {
            InputKind::Choice { options } => options,
            _ => &[],
        }
    }

    /// Builds a validated scenario from raw input values.
    ///
    /// `loan_rate_percent` is a percentage as entered (`6` for 6%).
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::OutOfDomain`] for a value outside its field's
    /// domain, or any error from [`Scenario::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use reer_core::{PlannerInputs, ScenarioError};
    ///
    /// let inputs = PlannerInputs::standard();
    /// let scenario = inputs.scenario(dec!(80000), dec!(6), dec!(10000), dec!(12)).unwrap();
    /// assert_eq!(scenario.loan_rate, dec!(0.06));
    ///
    /// let err = inputs.scenario(dec!(80000), dec!(6), dec!(12345), dec!(12)).unwrap_err();
    /// assert_eq!(err, ScenarioError::OutOfDomain { field: "contribution", value: dec!(12345) });
    /// ```
    pub fn scenario(
        &self,
        income: Decimal,
        loan_rate_percent: Decimal,
        contribution: Decimal,
        horizon_months: Decimal,
    ) -> Result<Scenario, ScenarioError> {
        self.income.check(income)?;
        self.loan_rate.check(loan_rate_percent)?;
        self.contribution.check(contribution)?;
        self.horizon_months.check(horizon_months)?;

        let horizon_months = horizon_months
            .to_u32()
            .ok_or(ScenarioError::OutOfDomain {
                field: self.horizon_months.name,
                value: horizon_months,
            })?;

        let scenario = Scenario {
            income,
            contribution,
            loan_rate: loan_rate_percent / Decimal::ONE_HUNDRED,
            horizon_months,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// The scenario built from every field's default.
    ///
    /// # Errors
    ///
    /// Fails only if the defaults themselves were overridden with values
    /// outside their domains.
    pub fn default_scenario(&self) -> Result<Scenario, ScenarioError> {
        self.scenario(
            self.income.default,
            self.loan_rate.default,
            self.contribution.default,
            self.horizon_months.default,
        )
    }
}

impl Default for PlannerInputs {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn standard_defaults_build_a_scenario() {
        let scenario = PlannerInputs::standard().default_scenario().unwrap();

        assert_eq!(
            scenario,
            Scenario {
                income: dec!(80000),
                contribution: dec!(10000),
                loan_rate: dec!(0.06),
                horizon_months: 12,
            }
        );
    }

    #[test]
    fn fields_are_listed_in_form_order() {
        let inputs = PlannerInputs::standard();
        let names: Vec<_> = inputs.fields().iter().map(|f| f.name).collect();

        assert_eq!(
            names,
            vec!["income", "loan_rate", "contribution", "horizon_months"]
        );
    }

    #[test]
    fn contribution_options_include_sixty_thousand() {
        let inputs = PlannerInputs::standard();
        let options = inputs.contribution_options();

        assert_eq!(options.len(), 11);
        assert_eq!(options.first(), Some(&dec!(0)));
        assert_eq!(options.last(), Some(&dec!(60000)));
    }

    #[test]
    fn scenario_rejects_rate_above_fifteen_percent() {
        let result =
            PlannerInputs::standard().scenario(dec!(80000), dec!(15.5), dec!(10000), dec!(12));

        assert_eq!(
            result,
            Err(ScenarioError::OutOfDomain {
                field: "loan_rate",
                value: dec!(15.5),
            })
        );
    }

    #[test]
    fn scenario_accepts_rate_bounds() {
        let inputs = PlannerInputs::standard();

        assert!(inputs.scenario(dec!(80000), dec!(0), dec!(10000), dec!(12)).is_ok());
        assert!(inputs.scenario(dec!(80000), dec!(15), dec!(10000), dec!(12)).is_ok());
    }

    #[test]
    fn scenario_rejects_negative_income() {
        let result = PlannerInputs::standard().scenario(dec!(-1), dec!(6), dec!(0), dec!(12));

        assert_eq!(
            result,
            Err(ScenarioError::OutOfDomain {
                field: "income",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn scenario_rejects_negative_months() {
        let result =
            PlannerInputs::standard().scenario(dec!(80000), dec!(6), dec!(10000), dec!(-3));

        assert!(matches!(
            result,
            Err(ScenarioError::OutOfDomain {
                field: "horizon_months",
                ..
            })
        ));
    }

    #[test]
    fn scenario_rejects_zero_months() {
        let result =
            PlannerInputs::standard().scenario(dec!(80000), dec!(6), dec!(10000), dec!(0));

        assert_eq!(
            result,
            Err(ScenarioError::OutOfDomain {
                field: "horizon_months",
                value: dec!(0),
            })
        );
    }

    #[test]
    fn scenario_rejects_fractional_months() {
        let result =
            PlannerInputs::standard().scenario(dec!(80000), dec!(6), dec!(10000), dec!(1.5));

        assert!(result.is_err());
    }

    #[test]
    fn scenario_rejects_contribution_above_income() {
        let result =
            PlannerInputs::standard().scenario(dec!(20000), dec!(6), dec!(25000), dec!(12));

        assert_eq!(
            result,
            Err(ScenarioError::ContributionExceedsIncome {
                contribution: dec!(25000),
                income: dec!(20000),
            })
        );
    }

    #[test]
    fn default_scenario_fails_when_default_leaves_domain() {
        let mut inputs = PlannerInputs::standard();
        inputs.contribution.default = dec!(7777);

        assert!(inputs.default_scenario().is_err());
    }
}
