//! Per-size objective sweeps.
//!
//! For one schedule size, every surviving candidate is scored once, then
//! each objective family independently picks its winners. The union of
//! winners, canonicalized and deduplicated, is the size's result block.
//! The families are kept as separate parameter structs so each sweep's
//! knobs stay typed instead of hiding in string keys.

use std::collections::{BTreeSet, VecDeque};

use quorum_evaluator::{
    MetricKind, ScheduleAnalysis, ScheduleScores, ScoreSummary, SurvivalTable, flatten, utility,
};
use quorum_model::{ProbabilityModel, Schedule};

use crate::{SearchConfig, Variants};

#[derive(Debug)]
struct Candidate {
    analysis: ScheduleAnalysis,
    scores: ScheduleScores,
}

impl Candidate {
    fn table(&self, kind: MetricKind) -> &SurvivalTable {
        match kind {
            MetricKind::Participation => &self.analysis.participation,
            MetricKind::Interaction => &self.analysis.interaction,
        }
    }
}

/// Index of the best candidate under `score`; the first candidate wins ties.
fn best_index<F>(candidates: &[Candidate], score: F) -> usize
where
    F: Fn(&Candidate) -> f64,
{
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (index, candidate) in candidates.iter().enumerate() {
        let s = score(candidate);
        if s > best_score {
            best = index;
            best_score = s;
        }
    }
    best
}

/// Exponent-weighted sweep: raw weighted table sums over a ramp of bases.
#[derive(Debug)]
struct ExponentSweep {
    bases: Vec<f64>,
}

impl ExponentSweep {
    /// Two fixed near-zero bases plus a geometric ramp up to 1.
    fn standard() -> Self {
        let mut bases = vec![1e-3, 1e-2];
        let mut base = 0.05;
        while base < 1.0 {
            bases.push(base);
            base *= 1.25;
        }
        bases.push(1.0);
        Self { bases }
    }

    fn winners(&self, candidates: &[Candidate], kind: MetricKind) -> Vec<usize> {
        self.bases
            .iter()
            .map(|&base| {
                best_index(candidates, |c| {
                    c.table(kind)
                        .rows()
                        .iter()
                        .map(|row| flatten(row, base))
                        .sum()
                })
            })
            .collect()
    }
}

/// Utility-base sweep with adaptive bisection refinement.
///
/// Seeds the base domain `[0, 1]`, then bisects every interval whose
/// endpoint winners disagree until the interval is narrower than `epsilon`.
/// This finds every base range where the winning schedule changes without
/// sampling the whole continuum.
#[derive(Debug)]
struct UtilityBaseSweep {
    seeds: Vec<f64>,
    epsilon: f64,
}

impl UtilityBaseSweep {
    fn standard() -> Self {
        Self {
            seeds: vec![0.0, 1e-3, 0.999, 1.0],
            epsilon: 1e-4,
        }
    }

    fn winners(&self, candidates: &[Candidate], kind: MetricKind) -> Vec<usize> {
        let winner_at =
            |base: f64| best_index(candidates, |c| utility(c.table(kind), base));

        let mut winners = Vec::new();
        let mut queue = VecDeque::new();

        let seed_winners: Vec<usize> = self.seeds.iter().map(|&b| winner_at(b)).collect();
        winners.extend_from_slice(&seed_winners);
        for (pair, pair_winners) in self.seeds.windows(2).zip(seed_winners.windows(2)) {
            queue.push_back((pair[0], pair[1], pair_winners[0], pair_winners[1]));
        }

        while let Some((lo, hi, winner_lo, winner_hi)) = queue.pop_front() {
            if winner_lo == winner_hi || hi - lo <= self.epsilon {
                continue;
            }
            let mid = (lo + hi) / 2.0;
            let winner_mid = winner_at(mid);
            winners.push(winner_mid);
            if winner_mid != winner_lo {
                queue.push_back((lo, mid, winner_lo, winner_mid));
            }
            if winner_mid != winner_hi {
                queue.push_back((mid, hi, winner_mid, winner_hi));
            }
        }

        winners
    }
}

/// Linear-combination sweep over the simplex `a + b + c = 1`.
///
/// Scores `a·avg + b·min + (1 − 2c·stdev)`; the spread term is doubled
/// because its natural range is half that of the other two.
#[derive(Debug)]
struct LinearComboSweep {
    steps: usize,
}

impl LinearComboSweep {
    fn standard() -> Self {
        Self { steps: 10 }
    }

    fn winners(&self, candidates: &[Candidate], kind: MetricKind) -> Vec<usize> {
        let mut winners = Vec::new();
        #[expect(clippy::cast_precision_loss)]
        let steps = self.steps as f64;
        for ai in 0..=self.steps {
            for bi in 0..=(self.steps - ai) {
                #[expect(clippy::cast_precision_loss)]
                let (a, b) = (ai as f64 / steps, bi as f64 / steps);
                let c = 1.0 - a - b;
                winners.push(best_index(candidates, |candidate| {
                    let ScoreSummary {
                        avg, min, stdev, ..
                    } = *candidate.scores.get(kind);
                    a * avg + b * min + (1.0 - c * stdev * 2.0)
                }));
            }
        }
        winners
    }
}

/// Scores every candidate of one schedule size and returns the deduplicated
/// sweep winners, re-scored in canonical form and ordered by canonical
/// schedule.
pub(crate) fn evaluate_size(
    model: &ProbabilityModel,
    config: &SearchConfig,
    size: usize,
) -> Vec<(ScheduleAnalysis, ScheduleScores)> {
    let floor = if config.prune {
        quorum_floor(model)
    } else {
        0.0
    };

    let candidates: Vec<Candidate> = Variants::new(size, model.slot_count())
        .filter(|schedule| {
            schedule
                .slots()
                .iter()
                .all(|&slot| model.quorum_probability(slot) >= floor)
        })
        .map(|schedule| {
            let analysis = ScheduleAnalysis::analyze(model, schedule, config.meetings);
            let scores = ScheduleScores::from_analysis(&analysis);
            Candidate { analysis, scores }
        })
        .collect();

    if candidates.is_empty() {
        return Vec::new();
    }

    let exponent = ExponentSweep::standard();
    let utility_base = UtilityBaseSweep::standard();
    let linear = LinearComboSweep::standard();

    let mut unique: BTreeSet<Schedule> = BTreeSet::new();
    for kind in MetricKind::ALL {
        let mut winner_indices = exponent.winners(&candidates, kind);
        winner_indices.push(best_index(&candidates, |c| c.scores.get(kind).fair));
        winner_indices.extend(utility_base.winners(&candidates, kind));
        winner_indices.extend(linear.winners(&candidates, kind));

        for index in winner_indices {
            unique.insert(candidates[index].analysis.schedule.canonicalize());
        }
    }

    unique
        .into_iter()
        .map(|schedule| {
            let analysis = ScheduleAnalysis::analyze(model, schedule, config.meetings);
            let scores = ScheduleScores::from_analysis(&analysis);
            (analysis, scores)
        })
        .collect()
}

/// Quorum floor for candidate pruning: slots far below the best slot's
/// quorum probability are assumed never to appear in a winning schedule.
fn quorum_floor(model: &ProbabilityModel) -> f64 {
    let max = model.max_quorum_probability();
    if max > 0.5 { max / 5.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use quorum_model::{AttendanceMatrix, ProbabilityLookup};

    use super::*;

    fn model(codes: Vec<Vec<u8>>) -> ProbabilityModel {
        let matrix = AttendanceMatrix::with_numbered_names(codes).unwrap();
        ProbabilityModel::build(&matrix, &ProbabilityLookup::default(), 0.5 + 1e-6).unwrap()
    }

    #[test]
    fn test_block_contains_only_canonical_schedules() {
        let model = model(vec![vec![5, 1, 3], vec![1, 5, 3]]);
        let block = evaluate_size(&model, &SearchConfig::default(), 2);
        for (analysis, _) in &block {
            assert_eq!(analysis.schedule.canonicalize(), analysis.schedule);
        }
    }

    #[test]
    fn test_block_has_no_duplicates() {
        let model = model(vec![vec![5, 1, 3], vec![1, 5, 3], vec![3, 3, 3]]);
        let block = evaluate_size(&model, &SearchConfig::default(), 2);
        let mut schedules: Vec<_> = block.iter().map(|(a, _)| a.schedule.clone()).collect();
        let before = schedules.len();
        schedules.sort();
        schedules.dedup();
        assert_eq!(schedules.len(), before);
    }

    #[test]
    fn test_dominant_slot_wins_size_one() {
        // Slot 0 dominates every objective, so the size-1 block is exactly [0]
        let model = model(vec![vec![5, 0], vec![5, 0]]);
        let block = evaluate_size(&model, &SearchConfig::default(), 1);
        assert_eq!(block.len(), 1);
        assert_eq!(block[0].0.schedule.slots(), [0]);
    }

    #[test]
    fn test_pruning_keeps_best_schedule_when_floor_is_zero() {
        // All slots weak: max quorum ≤ 0.5 keeps the floor at 0, so pruning
        // must change nothing
        let model = model(vec![vec![1, 1], vec![1, 1], vec![1, 1]]);
        assert!(model.max_quorum_probability() <= 0.5);
        let pruned = evaluate_size(
            &model,
            &SearchConfig {
                prune: true,
                ..SearchConfig::default()
            },
            1,
        );
        let unpruned = evaluate_size(&model, &SearchConfig::default(), 1);
        let key = |block: &[(ScheduleAnalysis, ScheduleScores)]| {
            block
                .iter()
                .map(|(a, _)| a.schedule.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(key(&pruned), key(&unpruned));
    }

    #[test]
    fn test_pruning_drops_weak_slot_candidates() {
        // One strong slot, one hopeless slot: with pruning on, no block
        // schedule may contain the hopeless slot
        let model = model(vec![vec![5, 0], vec![5, 0], vec![5, 0]]);
        assert!(model.max_quorum_probability() > 0.5);
        let block = evaluate_size(
            &model,
            &SearchConfig {
                prune: true,
                ..SearchConfig::default()
            },
            2,
        );
        assert!(!block.is_empty());
        for (analysis, _) in &block {
            assert!(analysis.schedule.slots().iter().all(|&s| s == 0));
        }
    }
}
