//! Schedule search for the Quorum recommender.
//!
//! This crate enumerates candidate schedules, scores them with
//! `quorum-evaluator`, and picks out the schedules that win under at least
//! one of several competing objectives:
//!
//! - **Exponent-weighted sweep** - raw weighted table sums over a ramp of
//!   utility bases
//! - **Best-fairness sweep** - the schedule with the highest fairness score
//! - **Utility-base sweep** - utility winners over the base domain `[0, 1]`,
//!   refined by interval bisection so every base range where the winner
//!   changes is discovered without sampling the whole continuum
//! - **Linear-combination sweep** - `a·avg + b·min + (1 − 2c·stdev)` over a
//!   simplex grid of `(a, b, c)`
//!
//! There is deliberately no single unified objective: the per-size result
//! block is the deduplicated union of every sweep's winners, and the final
//! choice between them is left to the consumer.
//!
//! The public entry point is [`Recommender`], a lazy iterator that walks
//! schedule sizes from 1 up to the configured maximum, keeps the size-1
//! single-best-slot averages as a baseline, and yields only schedules that
//! retain a configured fraction of that baseline on both metric kinds.
//! Consumers may stop pulling at any point; unconsumed sizes are never
//! computed.

pub use self::{
    config::{ConfigError, SearchConfig},
    recommend::{Recommendation, Recommender},
    variants::Variants,
};

pub mod config;
pub mod recommend;
mod sweeps;
pub mod variants;
