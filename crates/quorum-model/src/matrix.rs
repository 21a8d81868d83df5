//! Raw attendance input.

use serde::Serialize;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum MatrixError {
    #[display("attendance matrix has no rows or no columns")]
    Empty,
    #[display("row {row} has {len} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        len: usize,
    },
    #[display("{names} names given for {rows} rows")]
    NameCountMismatch { names: usize, rows: usize },
}

/// Immutable matrix of ordinal attendance codes.
///
/// Rows are people, columns are candidate time slots. Each cell is a small
/// ordinal code (a discretized attendance-likelihood bucket); the mapping to
/// actual probabilities is the [`ProbabilityLookup`](crate::ProbabilityLookup)
/// applied by [`ProbabilityModel::build`](crate::ProbabilityModel::build).
///
/// The matrix is validated on construction (non-empty, rectangular, one name
/// per row) and never mutated afterwards.
// Serialize only: deserialization would sidestep the construction checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceMatrix {
    names: Vec<String>,
    codes: Vec<Vec<u8>>,
}

impl AttendanceMatrix {
    /// Creates a matrix from per-person code rows and display names.
    pub fn new(names: Vec<String>, codes: Vec<Vec<u8>>) -> Result<Self, MatrixError> {
        let Some(first) = codes.first() else {
            return Err(MatrixError::Empty);
        };
        if first.is_empty() {
            return Err(MatrixError::Empty);
        }
        let expected = first.len();
        for (row, cells) in codes.iter().enumerate() {
            if cells.len() != expected {
                return Err(MatrixError::RaggedRow {
                    row,
                    expected,
                    len: cells.len(),
                });
            }
        }
        if names.len() != codes.len() {
            return Err(MatrixError::NameCountMismatch {
                names: names.len(),
                rows: codes.len(),
            });
        }
        Ok(Self { names, codes })
    }

    /// Creates a matrix with auto-numbered names (`#1`, `#2`, …).
    pub fn with_numbered_names(codes: Vec<Vec<u8>>) -> Result<Self, MatrixError> {
        let names = (1..=codes.len()).map(|i| format!("#{i}")).collect();
        Self::new(names, codes)
    }

    #[must_use]
    pub fn person_count(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.codes[0].len()
    }

    #[must_use]
    pub fn code(&self, person: usize, slot: usize) -> u8 {
        self.codes[person][slot]
    }

    #[must_use]
    pub fn name(&self, person: usize) -> &str {
        &self.names[person]
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
