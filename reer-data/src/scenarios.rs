//! CSV loader for batches of contribution scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column           | Type    | Notes |
//! |------------------|---------|-------|
//! | `income`         | decimal | gross annual income |
//! | `contribution`   | decimal | any amount up to `income` |
//! | `loan_rate`      | decimal | annual percentage, e.g. `6` for 6% |
//! | `horizon_months` | integer | months to repay the residual |
//!
//! ```csv
//! income,contribution,loan_rate,horizon_months
//! 80000,10000,6,12
//! 110000,12500,7.25,24
//! ```
use std::path::Path;

use reer_core::{Scenario, ScenarioError};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CsvRow {
    income: Decimal,
    contribution: Decimal,
    loan_rate: Decimal,
    horizon_months: u32,
}

/// Errors that can occur while loading a scenario batch.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioLoadError {
    #[error("cannot read scenario file: {0}")]
    Io(#[from] std::io::Error),

    /// Bad structure, missing column or type mismatch.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A row parsed but describes an invalid scenario. `row` is 1-based,
    /// not counting the header.
    #[error("invalid scenario on row {row}: {source}")]
    InvalidScenario {
        row: usize,
        #[source]
        source: ScenarioError,
    },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Scenario, ScenarioLoadError> {
    let scenario = Scenario {
        income: row.income,
        contribution: row.contribution,
        loan_rate: row.loan_rate / Decimal::ONE_HUNDRED,
        horizon_months: row.horizon_months,
    };

    scenario
        .validate()
        .map_err(|source| ScenarioLoadError::InvalidScenario {
            row: row_number,
            source,
        })?;

    Ok(scenario)
}

/// Parse CSV text and return the scenarios in file order.
///
/// # Errors
///
/// * [`ScenarioLoadError::Parse`] if the CSV is structurally invalid.
/// * [`ScenarioLoadError::InvalidScenario`] for the first row that fails
///   validation.
pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}
