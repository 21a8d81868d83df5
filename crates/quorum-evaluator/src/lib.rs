//! Schedule scoring for the Quorum recommender.
//!
//! This crate turns a candidate [`Schedule`](quorum_model::Schedule) into
//! comparable numbers, in two steps:
//!
//! 1. **Table construction** ([`analysis`]) - For every person and every
//!    unordered pair of people, build the exact survival distribution of how
//!    many of the simulated meetings they actually make, given the derived
//!    probability model.
//!
//! 2. **Scalar reduction** ([`metrics`]) - Reduce each table to the scalar
//!    objectives the search optimizes: the utility family (weighted by an
//!    exponent-decay base), the plain average, the worst-served entity's
//!    share, the spread across entities, and the fairness score.
//!
//! The two tables answer different questions:
//!
//! - **Participation**: how often does each person get to a meeting that
//!   actually happens?
//! - **Interaction**: how often does each pair of people end up in the same
//!   meeting?
//!
//! Each unordered pair appears in the interaction table exactly once
//! (triangular indexing); scoring a pair from both directions would silently
//! double its weight.

pub use self::{
    analysis::{ScheduleAnalysis, SurvivalTable, pairs},
    metrics::{MetricKind, ScheduleScores, ScoreSummary, average, fairness, flatten, utility},
};

pub mod analysis;
pub mod metrics;
