//! Loading of bracket tables, scenario batches and planner settings.

pub mod loader;
pub mod scenarios;
pub mod settings;

pub use loader::{BracketLoader, BracketLoaderError, BracketRecord};
pub use scenarios::ScenarioLoadError;
pub use settings::{AdvisorySettings, PlannerSettings, SettingsError};
