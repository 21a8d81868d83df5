//! Scalar reductions over survival tables.
//!
//! All reductions take a [`SurvivalTable`] and produce a scalar in `[0, 1]`
//! (except `spread`, whose population-std-dev range is `[0, 0.5]`). The
//! utility family is parameterized by a *base*: entry `k` of a row is
//! weighted by `base^k`, so a base near zero only values the first
//! occurrence (breadth) while base 1 values every occurrence equally
//! (depth).

use quorum_stats::descriptive::DescriptiveStats;
use serde::Serialize;

use crate::analysis::SurvivalTable;

/// Which survival table a score refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MetricKind {
    #[display("participation")]
    Participation,
    #[display("interaction")]
    Interaction,
}

impl MetricKind {
    pub const ALL: [Self; 2] = [Self::Participation, Self::Interaction];
}

/// Weighted sum of one survival row: `Σ row[k] × base^k`.
#[must_use]
pub fn flatten(row: &[f64], base: f64) -> f64 {
    row.iter()
        .enumerate()
        .map(|(k, v)| v * base.powi(i32::try_from(k).unwrap_or(i32::MAX)))
        .sum()
}

/// Normalized weighted value of a whole table, in `[0, 1]`.
///
/// The weighted row sums are normalized against the theoretical maximum in
/// which every entity attends every meeting with certainty. An empty table
/// (a single-person group has no pairs) scores 0.
#[must_use]
pub fn utility(table: &SurvivalTable, base: f64) -> f64 {
    if table.row_count() == 0 {
        return 0.0;
    }
    let total: f64 = table.rows().iter().map(|row| flatten(row, base)).sum();
    let ones = vec![1.0; table.row_len()];
    #[expect(clippy::cast_precision_loss)]
    let limit = flatten(&ones, base) * table.row_count() as f64;
    total / limit
}

/// Expected-count average: `utility` at base 1.
#[must_use]
pub fn average(table: &SurvivalTable) -> f64 {
    utility(table, 1.0)
}

/// Fairness: utility at a near-zero base (only "at least once" matters),
/// rescaled for presentation.
///
/// The `1 − (1 − u)^0.2` rescaling spreads the interesting high end of the
/// range; it is monotone, so it never reorders schedules relative to the
/// underlying utility.
#[must_use]
pub fn fairness(table: &SurvivalTable) -> f64 {
    1.0 - (1.0 - utility(table, 1e-3)).powf(0.2)
}

/// Per-row expected share: row sum divided by row length.
#[expect(clippy::cast_precision_loss)]
fn shares(table: &SurvivalTable) -> impl Iterator<Item = f64> {
    let len = table.row_len() as f64;
    table
        .rows()
        .iter()
        .map(move |row| row.iter().sum::<f64>() / len)
}

/// Scalar score summary for one table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    /// Average expected share across entities (`utility` at base 1).
    pub avg: f64,
    /// The worst-served entity's expected share.
    pub min: f64,
    /// Population standard deviation of per-entity shares, in `[0, 0.5]`.
    pub stdev: f64,
    /// Fairness score.
    pub fair: f64,
}

impl ScoreSummary {
    /// Reduces one table to its scalar summary.
    #[must_use]
    pub fn from_table(table: &SurvivalTable) -> Self {
        let stats = DescriptiveStats::new(shares(table));
        Self {
            avg: average(table),
            min: stats.as_ref().map_or(0.0, |s| s.min),
            stdev: stats.as_ref().map_or(0.0, |s| s.std_dev),
            fair: fairness(table),
        }
    }
}

/// Score summaries for both tables of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduleScores {
    pub participation: ScoreSummary,
    pub interaction: ScoreSummary,
}

impl ScheduleScores {
    /// Reduces both tables of an analysis to their scalar summaries.
    #[must_use]
    pub fn from_analysis(analysis: &crate::ScheduleAnalysis) -> Self {
        Self {
            participation: ScoreSummary::from_table(&analysis.participation),
            interaction: ScoreSummary::from_table(&analysis.interaction),
        }
    }

    #[must_use]
    pub fn get(&self, kind: MetricKind) -> &ScoreSummary {
        match kind {
            MetricKind::Participation => &self.participation,
            MetricKind::Interaction => &self.interaction,
        }
    }
}
