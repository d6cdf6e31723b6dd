mod bracket;
mod outcome;
mod scenario;

pub use bracket::{Bracket, BracketSlice, BracketTable, BracketTableError};
pub use outcome::{Advisory, LoanCost, Outlook, ScenarioResult, percent};
pub use scenario::{LoanTerms, Scenario, ScenarioError};
