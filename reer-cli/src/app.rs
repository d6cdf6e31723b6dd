use std::path::Path;

use anyhow::{Context, Result};
use reer_core::calculations::ScenarioEvaluator;
use reer_core::{BracketTable, LoanTerms, PlannerInputs, Scenario, ScenarioResult};
use reer_data::{BracketLoader, PlannerSettings, scenarios};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Everything loaded at startup: the bracket table, the input definitions,
/// the loan terms and the bracket the crossing advisory watches.
/// Configuration errors surface here, before any scenario is evaluated.
#[derive(Debug, Clone)]
pub struct Planner {
    pub table: BracketTable,
    pub inputs: PlannerInputs,
    pub terms: LoanTerms,
    pub advised_bracket: usize,
}

/// Raw values for one scenario; anything left `None` takes the input's
/// default.
#[derive(Debug, Clone, Default)]
pub struct ScenarioArgs {
    pub income: Option<Decimal>,
    pub contribution: Option<Decimal>,
    pub rate_percent: Option<Decimal>,
    pub months: Option<Decimal>,
}

impl Planner {
    /// Loads settings (if any) and the bracket table.
    ///
    /// An explicit `brackets` path wins over the one named in the settings,
    /// which wins over the built-in table.
    pub fn load(
        settings_path: Option<&Path>,
        brackets_path: Option<&Path>,
    ) -> Result<Self> {
        let settings = match settings_path {
            Some(path) => PlannerSettings::from_path(path)
                .with_context(|| format!("Failed to load settings: {}", path.display()))?,
            None => PlannerSettings::default(),
        };

        let table = match brackets_path {
            Some(path) => BracketLoader::from_path(path)
                .with_context(|| format!("Failed to load bracket table: {}", path.display()))?,
            None => settings
                .bracket_table()
                .context("Failed to load bracket table")?,
        };
        info!(
            table = table.label().unwrap_or("unnamed"),
            brackets = table.len(),
            "bracket table ready"
        );

        let inputs = settings
            .planner_inputs()
            .context("Invalid input defaults in settings")?;

        Ok(Self {
            table,
            inputs,
            terms: settings.loan,
            advised_bracket: settings.advisory.bracket,
        })
    }

    pub fn evaluator(&self) -> ScenarioEvaluator<'_> {
        ScenarioEvaluator::new(&self.table)
            .with_terms(self.terms)
            .with_advised_bracket(self.advised_bracket)
    }

    /// Builds a scenario from raw values, filling gaps with the defaults.
    pub fn scenario(
        &self,
        args: &ScenarioArgs,
    ) -> Result<Scenario> {
        let inputs = &self.inputs;
        let scenario = inputs.scenario(
            args.income.unwrap_or(inputs.income.default),
            args.rate_percent.unwrap_or(inputs.loan_rate.default),
            args.contribution.unwrap_or(inputs.contribution.default),
            args.months.unwrap_or(inputs.horizon_months.default),
        )?;
        debug!(?scenario, "scenario from arguments");
        Ok(scenario)
    }

    pub fn estimate(
        &self,
        args: &ScenarioArgs,
    ) -> Result<ScenarioResult> {
        let scenario = self.scenario(args)?;
        Ok(self.evaluator().evaluate(&scenario)?)
    }

    /// Evaluates every offered contribution that fits under the income.
    pub fn sweep(
        &self,
        args: &ScenarioArgs,
    ) -> Result<Vec<ScenarioResult>> {
        // Contribution is fixed per row, so validate the rest with a zero one.
        let base = self.scenario(&ScenarioArgs {
            contribution: Some(Decimal::ZERO),
            ..args.clone()
        })?;
        Ok(self.evaluator().sweep(
            base.income,
            base.loan_rate,
            base.horizon_months,
            self.inputs.contribution_options(),
        )?)
    }

    pub fn batch(
        &self,
        path: &Path,
    ) -> Result<Vec<ScenarioResult>> {
        let batch = scenarios::load_from_file(path)
            .with_context(|| format!("Failed to load scenarios: {}", path.display()))?;
        info!(count = batch.len(), "loaded scenario batch");

        let evaluator = self.evaluator();
        batch
            .iter()
            .enumerate()
            .map(|(idx, scenario)| {
                evaluator
                    .evaluate(scenario)
                    .with_context(|| format!("scenario on row {}", idx + 1))
            })
            .collect()
    }
}
