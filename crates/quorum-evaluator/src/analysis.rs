//! Survival-table construction for candidate schedules.

use quorum_model::{ProbabilityModel, Schedule};
use quorum_stats::survival::SurvivalDistribution;
use serde::Serialize;

/// One survival vector per entity (person or unordered pair).
///
/// Row `r`, entry `j` is the probability that entity `r` makes at least
/// `j + 1` of the simulated meetings. Every row has one entry per meeting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SurvivalTable {
    rows: Vec<Vec<f64>>,
}

impl SurvivalTable {
    fn from_distributions(dists: Vec<SurvivalDistribution>) -> Self {
        Self {
            rows: dists.into_iter().map(SurvivalDistribution::into_tail).collect(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of each row (the simulated meeting count).
    #[must_use]
    pub fn row_len(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// Unordered person pairs `(i, j)` with `i < j`, in interaction-table row
/// order.
pub fn pairs(person_count: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..person_count).flat_map(move |i| (i + 1..person_count).map(move |j| (i, j)))
}

/// The two survival tables for one candidate schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleAnalysis {
    pub schedule: Schedule,
    /// One row per person.
    pub participation: SurvivalTable,
    /// One row per unordered pair, in [`pairs`] order.
    pub interaction: SurvivalTable,
}

impl ScheduleAnalysis {
    /// Builds both tables for `schedule` over `meetings` simulated meetings.
    ///
    /// Meeting `k` is held at `schedule.slot_for_meeting(k)`. The event
    /// probabilities folded into the survival distributions are:
    ///
    /// - person `i` attends: `quorum_probability(slot) × p(i, slot)`
    /// - pair `(i, j)` meets: `quorum_probability(slot) × p(i, slot) × p(j, slot)`
    ///
    /// (the meeting has to happen at all, and then the people have to show
    /// up; attendance is assumed independent between people).
    ///
    /// # Panics
    ///
    /// Panics if `meetings` is zero or a schedule slot is outside the
    /// model's slot range.
    #[must_use]
    pub fn analyze(model: &ProbabilityModel, schedule: Schedule, meetings: usize) -> Self {
        // Zero-length rows would turn the downstream score ratios into 0/0.
        assert!(meetings > 0, "meeting count must be positive");
        assert!(
            schedule.slots().iter().all(|&s| s < model.slot_count()),
            "schedule {schedule} references a slot outside 0..{}",
            model.slot_count()
        );

        let n = model.person_count();
        let mut participation = vec![SurvivalDistribution::new(); n];
        let mut interaction = vec![SurvivalDistribution::new(); n * (n - 1) / 2];

        for meeting in 0..meetings {
            let slot = schedule.slot_for_meeting(meeting);
            let happens = model.quorum_probability(slot);

            for (person, dist) in participation.iter_mut().enumerate() {
                dist.record(happens * model.probability(person, slot));
            }
            for ((i, j), dist) in pairs(n).zip(interaction.iter_mut()) {
                dist.record(happens * model.probability(i, slot) * model.probability(j, slot));
            }
        }

        Self {
            schedule,
            participation: SurvivalTable::from_distributions(participation),
            interaction: SurvivalTable::from_distributions(interaction),
        }
    }
}

#[cfg(test)]
mod tests {
    use quorum_model::{AttendanceMatrix, ProbabilityLookup};

    use super::*;

    fn model(codes: Vec<Vec<u8>>, quorum: f64) -> ProbabilityModel {
        let matrix = AttendanceMatrix::with_numbered_names(codes).unwrap();
        ProbabilityModel::build(&matrix, &ProbabilityLookup::default(), quorum).unwrap()
    }

    fn schedule(slots: &[usize]) -> Schedule {
        Schedule::new(slots.iter().copied()).unwrap()
    }

    #[test]
    fn test_pairs_are_triangular() {
        let got: Vec<_> = pairs(4).collect();
        assert_eq!(got, [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_table_shapes() {
        let model = model(vec![vec![3, 3], vec![3, 3], vec![3, 3]], 0.5);
        let analysis = ScheduleAnalysis::analyze(&model, schedule(&[0, 1]), 6);
        assert_eq!(analysis.participation.row_count(), 3);
        assert_eq!(analysis.interaction.row_count(), 3);
        assert_eq!(analysis.participation.row_len(), 6);
        assert_eq!(analysis.interaction.row_len(), 6);
    }

    #[test]
    #[should_panic(expected = "meeting count must be positive")]
    fn test_zero_meetings_rejected() {
        // Without the guard a zero meeting count yields empty table rows and
        // NaN averages further down the score pipeline.
        let model = model(vec![vec![3, 3], vec![3, 3]], 0.5);
        let _ = ScheduleAnalysis::analyze(&model, schedule(&[0]), 0);
    }

    #[test]
    fn test_single_person_has_empty_interaction() {
        let model = model(vec![vec![4, 2]], 1.0);
        let analysis = ScheduleAnalysis::analyze(&model, schedule(&[1]), 3);
        assert_eq!(analysis.participation.row_count(), 1);
        assert_eq!(analysis.interaction.row_count(), 0);
    }

    #[test]
    fn test_participation_event_probability() {
        // One person, quorum 1.0: the meeting happens iff they attend, so the
        // per-meeting event probability is p², and P(≥1 of 1) = p².
        let model = model(vec![vec![3]], 1.0);
        let p = model.probability(0, 0);
        let analysis = ScheduleAnalysis::analyze(&model, schedule(&[0]), 1);
        let got = analysis.participation.rows()[0][0];
        assert!((got - p * p).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_pair_rarely_interacts() {
        // Person 1 near-certain at slot 0, person 2 near-never there, full
        // quorum: the pair's chance of ever meeting at slot 0 stays tiny.
        let model = model(vec![vec![5, 0], vec![0, 5]], 1.0);
        let analysis = ScheduleAnalysis::analyze(&model, schedule(&[0]), 4);
        let at_least_once = analysis.interaction.rows()[0][0];
        assert!(at_least_once < 0.1, "got {at_least_once}");
    }

    #[test]
    fn test_rows_are_monotone() {
        let model = model(vec![vec![3, 4], vec![2, 5]], 0.5);
        let analysis = ScheduleAnalysis::analyze(&model, schedule(&[0, 1]), 5);
        for row in analysis
            .participation
            .rows()
            .iter()
            .chain(analysis.interaction.rows())
        {
            for pair in row.windows(2) {
                assert!(pair[0] >= pair[1]);
            }
        }
    }
}
