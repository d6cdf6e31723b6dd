//! Planner settings stored as TOML.
//!
//! Every section is optional:
//!
//! ```toml
//! [brackets]
//! path = "brackets_2027.csv"   # relative to the settings file
//!
//! [loan]
//! bridge_months = 4
//!
//! [advisory]
//! bracket = 2                  # index of the bracket whose threshold is watched
//!
//! [defaults]
//! income = 95000
//! loan_rate = 5.5              # percent
//! contribution = 15000
//! horizon_months = 18
//! ```

use std::path::{Path, PathBuf};

use reer_core::calculations::DEFAULT_ADVISED_BRACKET;
use reer_core::{BracketTable, LoanTerms, PlannerInputs, ScenarioError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::loader::{BracketLoader, BracketLoaderError};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid default: {0}")]
    InvalidDefault(#[from] ScenarioError),

    #[error(transparent)]
    Brackets(#[from] BracketLoaderError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BracketSettings {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdvisorySettings {
    pub bracket: usize,
}

impl Default for AdvisorySettings {
    fn default() -> Self {
        Self {
            bracket: DEFAULT_ADVISED_BRACKET,
        }
    }
}

/// Overrides for the planner's input defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultOverrides {
    pub income: Option<Decimal>,
    /// Percentage, as a user would enter it.
    pub loan_rate: Option<Decimal>,
    pub contribution: Option<Decimal>,
    pub horizon_months: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlannerSettings {
    pub brackets: Option<BracketSettings>,
    #[serde(default)]
    pub loan: LoanTerms,
    #[serde(default)]
    pub advisory: AdvisorySettings,
    #[serde(default)]
    pub defaults: DefaultOverrides,

    /// Directory relative bracket paths are resolved against.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl PlannerSettings {
    pub fn from_toml(input: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut settings = Self::from_toml(&contents)?;
        settings.base_dir = path.parent().map(Path::to_path_buf);
        debug!(path = %path.display(), "loaded planner settings");
        Ok(settings)
    }

    /// Location of the configured bracket table, if any.
    pub fn bracket_path(&self) -> Option<PathBuf> {
        let configured = &self.brackets.as_ref()?.path;
        Some(match &self.base_dir {
            Some(dir) if configured.is_relative() => dir.join(configured),
            _ => configured.clone(),
        })
    }

    /// Loads the configured bracket table, or the built-in one when the
    /// settings do not name a file.
    pub fn bracket_table(&self) -> Result<BracketTable, SettingsError> {
        let table = match self.bracket_path() {
            Some(path) => BracketLoader::from_path(&path)?,
            None => BracketLoader::builtin()?,
        };
        Ok(table)
    }

    /// Standard inputs with any configured defaults applied.
    ///
    /// Each override is checked against its field's domain, and the
    /// resulting default scenario must be valid as a whole.
    pub fn planner_inputs(&self) -> Result<PlannerInputs, SettingsError> {
        let mut inputs = PlannerInputs::standard();
        let overrides = [
            (&mut inputs.income, self.defaults.income),
            (&mut inputs.loan_rate, self.defaults.loan_rate),
            (&mut inputs.contribution, self.defaults.contribution),
            (&mut inputs.horizon_months, self.defaults.horizon_months),
        ];

        for (field, value) in overrides {
            if let Some(value) = value {
                field.check(value)?;
                field.default = value;
            }
        }

        inputs.default_scenario()?;
        Ok(inputs)
    }
}
