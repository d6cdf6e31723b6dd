use std::fs::File;
use std::io::Read;
use std::path::Path;

use reer_core::{Bracket, BracketTable, BracketTableError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Combined Québec + Federal brackets shipped with the crate.
const BUILTIN_CSV: &str = include_str!("../data/brackets_qc_2026.csv");
const BUILTIN_LABEL: &str = "Québec + Federal 2026";

/// Errors that can occur when loading a bracket table.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("cannot read bracket file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("invalid bracket table: {0}")]
    InvalidTable(#[from] BracketTableError),
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a bracket CSV file.
///
/// - `threshold`: income at which the bracket starts
/// - `rate`: the marginal rate as a fraction (e.g. 0.3253 for 32.53%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// Loader for bracket tables stored as CSV.
///
/// Tables are validated as they are loaded, so a malformed file is reported
/// once, at startup, and never surfaces in the middle of a calculation.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build a validated table from parsed records.
    pub fn build(records: &[BracketRecord]) -> Result<BracketTable, BracketLoaderError> {
        let brackets = records
            .iter()
            .map(|r| Bracket::new(r.threshold, r.rate))
            .collect();

        Ok(BracketTable::new(brackets)?)
    }

    /// Parse and validate a table in one step.
    pub fn load<R: Read>(reader: R) -> Result<BracketTable, BracketLoaderError> {
        let records = Self::parse(reader)?;
        Self::build(&records)
    }

    /// Load a table from a CSV file, labelled with the file name.
    pub fn from_path(path: &Path) -> Result<BracketTable, BracketLoaderError> {
        let file = File::open(path).map_err(|source| BracketLoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::load(file)?;
        debug!(path = %path.display(), brackets = table.len(), "loaded bracket table");

        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(table.with_label(label))
    }

    /// The table shipped with the crate.
    pub fn builtin() -> Result<BracketTable, BracketLoaderError> {
        Ok(Self::load(BUILTIN_CSV.as_bytes())?.with_label(BUILTIN_LABEL))
    }
}
