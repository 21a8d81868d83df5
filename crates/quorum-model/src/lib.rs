//! Data model for the Quorum schedule recommender.
//!
//! This crate holds the immutable inputs and derived values that the scoring
//! and search layers consume:
//!
//! - [`AttendanceMatrix`] - the raw per-person, per-slot attendance codes
//! - [`ProbabilityLookup`] - the calibration table mapping ordinal codes to
//!   probabilities
//! - [`ProbabilityModel`] - the derived model: calibrated probabilities and
//!   per-slot quorum probabilities, built once and read-only afterwards
//! - [`Schedule`] - a repeating pattern of slot indices with a canonical form
//!
//! # Build-once derived model
//!
//! The derived values (calibrated matrix, quorum vector) are not lazily
//! memoized; [`ProbabilityModel::build`] computes everything up front and the
//! resulting value is immutable. Downstream components share it by reference,
//! so there is no initialization race to guard against.

pub use self::{
    matrix::{AttendanceMatrix, MatrixError},
    model::{ModelError, ProbabilityModel},
    probability::{LookupError, ProbabilityLookup},
    schedule::{Schedule, ScheduleError},
};

pub mod matrix;
pub mod model;
pub mod probability;
pub mod schedule;
