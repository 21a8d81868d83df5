//! Ordinal-code calibration.

use serde::Serialize;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LookupError {
    #[display("probability lookup is empty")]
    Empty,
    #[display("lookup entry {index} is {value}, must lie strictly between 0 and 1")]
    OutOfRange { index: usize, value: f64 },
}

/// Calibration table mapping ordinal attendance codes to probabilities.
///
/// Entry `c` is the probability assigned to code `c`. Entries must lie
/// strictly inside `(0, 1)`: the degenerate endpoints would make a person
/// deterministically absent or present, which the scoring recurrence has no
/// use for and the survey codes are not meant to promise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityLookup(Vec<f64>);

impl ProbabilityLookup {
    /// Creates a lookup from one probability per ordinal code.
    pub fn new(values: Vec<f64>) -> Result<Self, LookupError> {
        if values.is_empty() {
            return Err(LookupError::Empty);
        }
        for (index, &value) in values.iter().enumerate() {
            if !(value > 0.0 && value < 1.0) {
                return Err(LookupError::OutOfRange { index, value });
            }
        }
        Ok(Self(values))
    }

    /// Probability for `code`, or `None` if the code is out of range.
    #[must_use]
    pub fn probability(&self, code: u8) -> Option<f64> {
        self.0.get(usize::from(code)).copied()
    }

    /// Number of ordinal codes this lookup calibrates.
    #[must_use]
    pub fn code_count(&self) -> usize {
        self.0.len()
    }
}

impl Default for ProbabilityLookup {
    /// Calibration for the common 0-5 survey scale.
    fn default() -> Self {
        Self(vec![0.02, 0.2, 0.5, 0.8, 0.94, 0.95])
    }
}
