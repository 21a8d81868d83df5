//! Statistical primitives for the Quorum project.
//!
//! This crate provides the numeric building blocks used by the schedule
//! scoring pipeline:
//!
//! - **Survival distributions**: Exact Poisson-binomial tail probabilities
//!   for sums of independent, non-identical Bernoulli trials
//! - **Descriptive statistics**: Min, max, mean, variance, and population
//!   standard deviation reductions
//!
//! # Modules
//!
//! - [`survival`]: Incremental Poisson-binomial tail construction and the
//!   quorum-probability primitive
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//!
//! # Examples
//!
//! ## Building a survival distribution
//!
//! ```
//! use quorum_stats::survival::SurvivalDistribution;
//!
//! let mut dist = SurvivalDistribution::new();
//! dist.record(0.5);
//! dist.record(0.5);
//! // P(at least one success out of two fair coins) = 0.75
//! assert!((dist.at_least(1) - 0.75).abs() < 1e-12);
//! ```
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use quorum_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub mod descriptive;
pub mod survival;
