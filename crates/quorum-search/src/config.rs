//! Search configuration.

use quorum_model::Schedule;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("meeting count must be at least 1")]
    NoMeetings,
    #[display("max schedule size {size} not in 1..={max}", max = Schedule::MAX_LEN)]
    BadMaxSize { size: usize },
    #[display("retention limit {limit} must be non-negative")]
    BadLimit { limit: f64 },
}

/// Knobs controlling the schedule search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Number of meetings simulated per candidate schedule.
    pub meetings: usize,
    /// Largest schedule length explored.
    pub max_schedule_size: usize,
    /// Fraction of the size-1 baseline participation average a larger
    /// schedule must retain to be yielded.
    pub participation_limit: f64,
    /// Same, for the interaction average.
    pub interaction_limit: f64,
    /// Enables the quorum-floor candidate filter. The floor
    /// (`max_quorum / 5` once the best slot clears 0.5) is a performance
    /// heuristic, not a proven-safe bound, so it is off by default.
    pub prune: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            meetings: 12,
            max_schedule_size: 3,
            participation_limit: 1.0,
            interaction_limit: 1.0,
            prune: false,
        }
    }
}

impl SearchConfig {
    /// Checks the configuration for values the search cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.meetings == 0 {
            return Err(ConfigError::NoMeetings);
        }
        if !(1..=Schedule::MAX_LEN).contains(&self.max_schedule_size) {
            return Err(ConfigError::BadMaxSize {
                size: self.max_schedule_size,
            });
        }
        for limit in [self.participation_limit, self.interaction_limit] {
            if limit.is_nan() || limit < 0.0 {
                return Err(ConfigError::BadLimit { limit });
            }
        }
        Ok(())
    }
}
