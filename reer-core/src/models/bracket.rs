use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a bracket table violates its structural invariants.
///
/// These are configuration errors: they are reported once, when the table is
/// built, and never during a calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    /// The table has no brackets at all.
    #[error("bracket table is empty")]
    Empty,

    /// The first bracket must start at an income of zero.
    #[error("first bracket threshold must be 0, got {0}")]
    FirstThresholdNotZero(Decimal),

    /// Thresholds must be strictly increasing.
    #[error("bracket {index} threshold {threshold} is not above the previous threshold {previous}")]
    NonIncreasingThreshold {
        index: usize,
        threshold: Decimal,
        previous: Decimal,
    },

    /// Rates must lie in [0, 1].
    #[error("bracket {index} rate must be between 0 and 1, got {rate}")]
    RateOutOfRange { index: usize, rate: Decimal },
}

/// One segment of the progressive tax function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// Income at which this bracket starts applying.
    pub threshold: Decimal,
    /// Marginal rate applied to income above `threshold`, as a fraction.
    pub rate: Decimal,
}

impl Bracket {
    pub fn new(
        threshold: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { threshold, rate }
    }
}

/// An ordered, validated set of tax brackets.
///
/// The first bracket starts at zero and the last one extends to infinity, so
/// the table partitions the whole non-negative income axis. A table can only
/// be obtained through [`BracketTable::new`], which checks every invariant.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use reer_core::{Bracket, BracketTable, BracketTableError};
///
/// let table = BracketTable::new(vec![
///     Bracket::new(dec!(0), dec!(0.25)),
///     Bracket::new(dec!(51708), dec!(0.3253)),
/// ])
/// .unwrap();
/// assert_eq!(table.len(), 2);
///
/// let err = BracketTable::new(vec![Bracket::new(dec!(0), dec!(1.5))]).unwrap_err();
/// assert_eq!(err, BracketTableError::RateOutOfRange { index: 0, rate: dec!(1.5) });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    label: Option<String>,
    brackets: Vec<Bracket>,
}

impl BracketTable {
    /// Builds a table from brackets sorted by ascending threshold.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] if the table is empty, does not start at
    /// zero, has non-increasing thresholds, or has a rate outside [0, 1].
    pub fn new(brackets: Vec<Bracket>) -> Result<Self, BracketTableError> {
        let first = brackets.first().ok_or(BracketTableError::Empty)?;
        if first.threshold != Decimal::ZERO {
            return Err(BracketTableError::FirstThresholdNotZero(first.threshold));
        }

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(BracketTableError::RateOutOfRange {
                    index,
                    rate: bracket.rate,
                });
            }
            if index > 0 {
                let previous = brackets[index - 1].threshold;
                if bracket.threshold <= previous {
                    return Err(BracketTableError::NonIncreasingThreshold {
                        index,
                        threshold: bracket.threshold,
                        previous,
                    });
                }
            }
        }

        Ok(Self {
            label: None,
            brackets,
        })
    }

    /// Attaches a human-readable label, e.g. the tax year the table covers.
    pub fn with_label(
        mut self,
        label: impl Into<String>,
    ) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Always `false`; kept for parity with `len`.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Upper bound of the bracket at `index`, or `None` for the last bracket.
    pub fn upper_bound(
        &self,
        index: usize,
    ) -> Option<Decimal> {
        self.brackets.get(index + 1).map(|b| b.threshold)
    }

    /// The lowest threshold above zero, i.e. where the second bracket starts.
    ///
    /// `None` for a single-bracket (flat rate) table.
    pub fn lowest_positive_threshold(&self) -> Option<&Bracket> {
        self.brackets.get(1)
    }
}

/// The part of an income that falls inside one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlice {
    pub threshold: Decimal,
    /// `None` for the open-ended top bracket.
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    pub taxable: Decimal,
    pub tax: Decimal,
}
