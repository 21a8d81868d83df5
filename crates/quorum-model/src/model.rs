//! The derived probability model.

use quorum_stats::survival::quorum_reached;

use crate::{AttendanceMatrix, ProbabilityLookup};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ModelError {
    #[display("code {code} at person {person}, slot {slot} exceeds lookup range 0..{limit}")]
    CodeOutOfRange {
        person: usize,
        slot: usize,
        code: u8,
        limit: usize,
    },
    #[display("quorum fraction {fraction} must lie in [0, 1]")]
    QuorumFraction { fraction: f64 },
}

/// Calibrated probabilities plus per-slot quorum probabilities, derived once
/// from an [`AttendanceMatrix`] and a [`ProbabilityLookup`].
///
/// `build` performs the whole derivation eagerly; afterwards every accessor
/// is an O(1) lookup into immutable storage, so the model can be shared
/// freely by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityModel {
    person_count: usize,
    slot_count: usize,
    quorum_fraction: f64,
    // Row-major person × slot calibrated probabilities.
    probabilities: Vec<f64>,
    // Per slot, P(attendance reaches the quorum fraction).
    quorum_probabilities: Vec<f64>,
}

impl ProbabilityModel {
    /// Builds the derived model.
    ///
    /// Calibrates every attendance code through `lookup`, then computes each
    /// slot's quorum probability by running the survival recurrence over the
    /// slot's column of calibrated probabilities and reading the tail entry
    /// at `ceil(quorum_fraction × person_count)`.
    pub fn build(
        matrix: &AttendanceMatrix,
        lookup: &ProbabilityLookup,
        quorum_fraction: f64,
    ) -> Result<Self, ModelError> {
        if !(0.0..=1.0).contains(&quorum_fraction) {
            return Err(ModelError::QuorumFraction {
                fraction: quorum_fraction,
            });
        }

        let person_count = matrix.person_count();
        let slot_count = matrix.slot_count();

        let mut probabilities = Vec::with_capacity(person_count * slot_count);
        for person in 0..person_count {
            for slot in 0..slot_count {
                let code = matrix.code(person, slot);
                let p = lookup
                    .probability(code)
                    .ok_or(ModelError::CodeOutOfRange {
                        person,
                        slot,
                        code,
                        limit: lookup.code_count(),
                    })?;
                probabilities.push(p);
            }
        }

        let quorum_probabilities = (0..slot_count)
            .map(|slot| {
                let column = (0..person_count)
                    .map(|person| probabilities[person * slot_count + slot])
                    .collect::<Vec<_>>();
                quorum_reached(&column, quorum_fraction)
            })
            .collect();

        Ok(Self {
            person_count,
            slot_count,
            quorum_fraction,
            probabilities,
            quorum_probabilities,
        })
    }

    /// Calibrated probability that `person` attends `slot`.
    #[must_use]
    pub fn probability(&self, person: usize, slot: usize) -> f64 {
        self.probabilities[person * self.slot_count + slot]
    }

    /// Probability that a meeting at `slot` reaches quorum.
    #[must_use]
    pub fn quorum_probability(&self, slot: usize) -> f64 {
        self.quorum_probabilities[slot]
    }

    /// The highest quorum probability across all slots.
    #[must_use]
    pub fn max_quorum_probability(&self) -> f64 {
        self.quorum_probabilities
            .iter()
            .copied()
            .fold(0.0, f64::max)
    }

    #[must_use]
    pub fn person_count(&self) -> usize {
        self.person_count
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    #[must_use]
    pub fn quorum_fraction(&self) -> f64 {
        self.quorum_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_person_model(quorum: f64) -> ProbabilityModel {
        let matrix = AttendanceMatrix::with_numbered_names(vec![vec![5, 0], vec![0, 5]]).unwrap();
        ProbabilityModel::build(&matrix, &ProbabilityLookup::default(), quorum).unwrap()
    }

    #[test]
    fn test_calibration() {
        let model = two_person_model(0.5);
        assert!((model.probability(0, 0) - 0.95).abs() < 1e-12);
        assert!((model.probability(0, 1) - 0.02).abs() < 1e-12);
        assert!((model.probability(1, 0) - 0.02).abs() < 1e-12);
        assert!((model.probability(1, 1) - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_quorum_probability_full_attendance() {
        // Fraction 1.0 needs both people at once
        let model = two_person_model(1.0);
        assert!((model.quorum_probability(0) - 0.95 * 0.02).abs() < 1e-12);
        assert!((model.quorum_probability(1) - 0.02 * 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_quorum_probability_majority() {
        // ceil(0.5 × 2) = 1 attendee: P(at least one shows up)
        let model = two_person_model(0.5);
        let expected = 1.0 - (1.0 - 0.95) * (1.0 - 0.02);
        assert!((model.quorum_probability(0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_code_out_of_range() {
        let matrix = AttendanceMatrix::with_numbered_names(vec![vec![9]]).unwrap();
        let err = ProbabilityModel::build(&matrix, &ProbabilityLookup::default(), 0.5);
        assert!(matches!(
            err,
            Err(ModelError::CodeOutOfRange {
                person: 0,
                slot: 0,
                code: 9,
                limit: 6
            })
        ));
    }

    #[test]
    fn test_bad_quorum_fraction() {
        let matrix = AttendanceMatrix::with_numbered_names(vec![vec![3]]).unwrap();
        let err = ProbabilityModel::build(&matrix, &ProbabilityLookup::default(), 1.5);
        assert!(matches!(err, Err(ModelError::QuorumFraction { .. })));
    }

    #[test]
    fn test_max_quorum_probability() {
        let model = two_person_model(1.0);
        assert!((model.max_quorum_probability() - 0.95 * 0.02).abs() < 1e-12);
    }
}
