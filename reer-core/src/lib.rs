pub mod calculations;
pub mod inputs;
pub mod models;

pub use inputs::{InputField, InputKind, PlannerInputs};
pub use models::*;
