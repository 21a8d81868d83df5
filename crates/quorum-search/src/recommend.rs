//! The top-level recommendation driver.

use std::collections::{BTreeSet, VecDeque};

use quorum_evaluator::{MetricKind, ScheduleAnalysis, ScheduleScores, SurvivalTable};
use quorum_model::{ProbabilityModel, Schedule};
use serde::Serialize;

use crate::{SearchConfig, sweeps};

/// One accepted schedule with its audit tables and scalar scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub schedule: Schedule,
    pub participation: SurvivalTable,
    pub interaction: SurvivalTable,
    pub scores: ScheduleScores,
}

impl Recommendation {
    /// Packages an analysis with freshly computed scores.
    #[must_use]
    pub fn from_analysis(analysis: ScheduleAnalysis) -> Self {
        let scores = ScheduleScores::from_analysis(&analysis);
        Self::new(analysis, scores)
    }

    fn new(analysis: ScheduleAnalysis, scores: ScheduleScores) -> Self {
        Self {
            schedule: analysis.schedule,
            participation: analysis.participation,
            interaction: analysis.interaction,
            scores,
        }
    }
}

/// Per-metric-kind size-1 baselines: the best single-slot average.
#[derive(Debug, Clone, Copy, Default)]
struct Baseline {
    participation: f64,
    interaction: f64,
}

impl Baseline {
    fn get(self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Participation => self.participation,
            MetricKind::Interaction => self.interaction,
        }
    }
}

/// Lazy stream of recommended schedules, smallest sizes first.
///
/// Walks schedule sizes from 1 to the configured maximum. Each size's sweep
/// block is computed only when the consumer pulls into it, so stopping early
/// skips the remaining (combinatorially larger) sizes entirely.
///
/// Size 1 establishes the baseline: the best single-slot average per metric
/// kind. Every later schedule must retain the configured fraction of that
/// baseline on **both** kinds, and must not repeat a canonical schedule
/// yielded at any earlier size; everything else is dropped silently.
///
/// # Examples
///
/// ```no_run
/// use quorum_model::{AttendanceMatrix, ProbabilityLookup, ProbabilityModel};
/// use quorum_search::{Recommender, SearchConfig};
///
/// let matrix = AttendanceMatrix::with_numbered_names(vec![
///     vec![5, 1, 3],
///     vec![1, 5, 3],
/// ])
/// .unwrap();
/// let model =
///     ProbabilityModel::build(&matrix, &ProbabilityLookup::default(), 0.5).unwrap();
///
/// for rec in Recommender::new(&model, SearchConfig::default()) {
///     println!("{}: {:?}", rec.schedule, rec.scores);
/// }
/// ```
#[derive(Debug)]
pub struct Recommender<'a> {
    model: &'a ProbabilityModel,
    config: SearchConfig,
    size: usize,
    baseline: Baseline,
    had: BTreeSet<Schedule>,
    pending: VecDeque<Recommendation>,
}

impl<'a> Recommender<'a> {
    #[must_use]
    pub fn new(model: &'a ProbabilityModel, config: SearchConfig) -> Self {
        Self {
            model,
            config,
            size: 1,
            baseline: Baseline::default(),
            had: BTreeSet::new(),
            pending: VecDeque::new(),
        }
    }

    fn retained(&self, scores: &ScheduleScores) -> bool {
        MetricKind::ALL.into_iter().all(|kind| {
            let limit = match kind {
                MetricKind::Participation => self.config.participation_limit,
                MetricKind::Interaction => self.config.interaction_limit,
            };
            scores.get(kind).avg >= self.baseline.get(kind) * limit
        })
    }

    fn compute_block(&mut self) {
        let block = sweeps::evaluate_size(self.model, &self.config, self.size);

        if self.size == 1 {
            for (_, scores) in &block {
                self.baseline.participation =
                    self.baseline.participation.max(scores.participation.avg);
                self.baseline.interaction =
                    self.baseline.interaction.max(scores.interaction.avg);
            }
        }

        for (analysis, scores) in block {
            if self.had.contains(&analysis.schedule) {
                continue;
            }
            if self.size > 1 && !self.retained(&scores) {
                continue;
            }
            self.had.insert(analysis.schedule.clone());
            self.pending.push_back(Recommendation::new(analysis, scores));
        }
    }
}

impl Iterator for Recommender<'_> {
    type Item = Recommendation;

    fn next(&mut self) -> Option<Recommendation> {
        loop {
            if let Some(recommendation) = self.pending.pop_front() {
                return Some(recommendation);
            }
            if self.size > self.config.max_schedule_size {
                return None;
            }
            self.compute_block();
            self.size += 1;
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

    fn recommend(model: &ProbabilityModel, config: SearchConfig) -> Vec<Recommendation> {
        Recommender::new(model, config).collect()
    }

    #[test]
    fn test_no_canonical_schedule_repeats_across_sizes() {
        let model = model(vec![vec![5, 1, 3], vec![1, 5, 3], vec![3, 3, 5]], 0.5 + 1e-6);
        let results = recommend(&model, SearchConfig::default());
        assert!(!results.is_empty());
        let mut seen = BTreeSet::new();
        for rec in &results {
            assert!(
                seen.insert(rec.schedule.clone()),
                "schedule {} yielded twice",
                rec.schedule
            );
            assert_eq!(rec.schedule.canonicalize(), rec.schedule);
        }
    }

    #[test]
    fn test_disjoint_pair_scenario() {
        // Person A lives at slot 0, person B at slot 1, full quorum: the
        // single-slot schedule [0] almost never gets the pair together, and
        // no two-slot mix beats a dominated single slot on participation.
        let model = model(vec![vec![5, 0], vec![0, 5]], 1.0);
        let config = SearchConfig {
            meetings: 4,
            max_schedule_size: 2,
            // Accept everything so the scenario sees all sweep winners
            participation_limit: 0.0,
            interaction_limit: 0.0,
            ..SearchConfig::default()
        };
        let results = recommend(&model, config);

        let single = results
            .iter()
            .find(|r| r.schedule.slots() == [0])
            .expect("single-slot schedule [0] should be a sweep winner");
        assert!(single.scores.interaction.avg < 0.05);

        let best_single_avg = results
            .iter()
            .filter(|r| r.schedule.len() == 1)
            .map(|r| r.scores.participation.avg)
            .fold(0.0, f64::max);
        for rec in results.iter().filter(|r| r.schedule.len() == 2) {
            assert!(rec.scores.participation.avg <= best_single_avg + 1e-9);
        }
    }

    #[test]
    fn test_symmetric_people_score_identically() {
        // Three people with identical codes: every same-size schedule is
        // interchangeable, so the scores of all yielded schedules of one
        // size must coincide.
        let model = model(vec![vec![3, 3, 3]; 3], 0.5 + 1e-6);
        let config = SearchConfig {
            participation_limit: 0.0,
            interaction_limit: 0.0,
            ..SearchConfig::default()
        };
        let results = recommend(&model, config);
        assert!(!results.is_empty());
        for len in 1..=3 {
            let of_len: Vec<_> = results.iter().filter(|r| r.schedule.len() == len).collect();
            for pair in of_len.windows(2) {
                let (a, b) = (&pair[0].scores, &pair[1].scores);
                for kind in MetricKind::ALL {
                    assert!((a.get(kind).avg - b.get(kind).avg).abs() < 1e-9);
                    assert!((a.get(kind).fair - b.get(kind).fair).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_default_limits_drop_non_improving_sizes() {
        // With retention limits at 1.0, a larger schedule is yielded only if
        // it at least matches the single-best-slot averages on both kinds.
        let model = model(vec![vec![5, 1], vec![5, 1]], 0.5 + 1e-6);
        let results = recommend(&model, SearchConfig::default());
        let baseline = results
            .iter()
            .filter(|r| r.schedule.len() == 1)
            .map(|r| r.scores.participation.avg)
            .fold(0.0, f64::max);
        for rec in results.iter().filter(|r| r.schedule.len() > 1) {
            assert!(rec.scores.participation.avg >= baseline);
        }
    }

    #[test]
    fn test_stream_is_lazy_and_stoppable() {
        let model = model(vec![vec![5, 1, 3], vec![1, 5, 3]], 0.5 + 1e-6);
        let config = SearchConfig {
            max_schedule_size: Schedule::MAX_LEN,
            participation_limit: 0.0,
            interaction_limit: 0.0,
            ..SearchConfig::default()
        };
        // Pulling one item must not require walking all eight sizes
        let first = Recommender::new(&model, config).next();
        assert!(first.is_some());
        assert_eq!(first.unwrap().schedule.len(), 1);
    }
}
