//! Poisson-binomial survival distributions.
//!
//! For a sum of independent Bernoulli trials with individual success
//! probabilities `p₀, p₁, …`, the *survival distribution* is the vector of
//! tail probabilities `P(successes ≥ k)` for each `k`. It is computed here
//! exactly, with no sampling or approximation, by an incremental recurrence
//! that folds one trial at a time into the tail vector.
//!
//! # Recurrence
//!
//! The builder maintains a vector `tail` where `tail[j] = P(successes ≥ j + 1)`
//! over the trials recorded so far. Folding in a trial with success
//! probability `p` appends a zero entry and then updates indices from high to
//! low:
//!
//! ```text
//! tail[j] += p × (tail[j - 1] − tail[j])      (tail[-1] taken as 1)
//! ```
//!
//! The high-to-low order is load-bearing: updating low indices first would
//! feed an already-updated value into the `tail[j - 1]` term. Each trial
//! costs O(current length), so a full distribution over `n` trials is O(n²).
//! The resulting distribution does not depend on the order in which trials
//! are recorded.
//!
//! # Examples
//!
//! ```
//! use quorum_stats::survival::SurvivalDistribution;
//!
//! let dist = SurvivalDistribution::from_probabilities([0.9, 0.5, 0.1]);
//! assert_eq!(dist.len(), 3);
//! // P(≥ 1) = 1 − 0.1 × 0.5 × 0.9 = 0.955
//! assert!((dist.at_least(1) - 0.955).abs() < 1e-12);
//! // P(≥ 0) is always certain
//! assert_eq!(dist.at_least(0), 1.0);
//! ```

/// Exact tail distribution of a sum of independent Bernoulli trials.
///
/// Entry `j` of the underlying vector is the probability that at least
/// `j + 1` of the recorded trials succeed. The vector is monotonically
/// non-increasing and every entry lies in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurvivalDistribution {
    tail: Vec<f64>,
}

impl SurvivalDistribution {
    /// Creates an empty distribution with no recorded trials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a distribution from a sequence of success probabilities.
    #[must_use]
    pub fn from_probabilities<I>(probs: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut dist = Self::new();
        for p in probs {
            dist.record(p);
        }
        dist
    }

    /// Folds one Bernoulli trial with success probability `p` into the
    /// distribution.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `p` is outside `[0, 1]`.
    pub fn record(&mut self, p: f64) {
        debug_assert!((0.0..=1.0).contains(&p), "probability out of range: {p}");
        self.tail.push(0.0);
        for j in (0..self.tail.len()).rev() {
            let previous = if j > 0 { self.tail[j - 1] } else { 1.0 };
            self.tail[j] += p * (previous - self.tail[j]);
        }
    }

    /// Returns the probability that at least `k` trials succeed.
    ///
    /// `at_least(0)` is always 1. For `k` greater than the number of
    /// recorded trials the probability is 0.
    #[must_use]
    pub fn at_least(&self, k: usize) -> f64 {
        if k == 0 {
            return 1.0;
        }
        self.tail.get(k - 1).copied().unwrap_or(0.0)
    }

    /// Returns the tail vector: entry `j` is `P(successes ≥ j + 1)`.
    #[must_use]
    pub fn tail(&self) -> &[f64] {
        &self.tail
    }

    /// Returns the number of recorded trials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tail.len()
    }

    /// Returns `true` if no trials have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tail.is_empty()
    }

    /// Consumes the distribution, returning the tail vector.
    #[must_use]
    pub fn into_tail(self) -> Vec<f64> {
        self.tail
    }
}

/// Probability that at least `ceil(fraction × probs.len())` of the trials in
/// `probs` succeed.
///
/// This is the "does the meeting happen" primitive: given each member's
/// attendance probability for a slot and the quorum fraction, it returns the
/// probability that attendance reaches quorum.
///
/// # Examples
///
/// ```
/// use quorum_stats::survival::quorum_reached;
///
/// // Two members, both must attend (fraction 1.0)
/// let p = quorum_reached(&[0.8, 0.5], 1.0);
/// assert!((p - 0.4).abs() < 1e-12);
///
/// // A zero fraction needs nobody, so the meeting always happens
/// assert_eq!(quorum_reached(&[0.1, 0.1], 0.0), 1.0);
/// ```
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn quorum_reached(probs: &[f64], fraction: f64) -> f64 {
    let needed = (fraction * probs.len() as f64).ceil() as usize;
    SurvivalDistribution::from_probabilities(probs.iter().copied()).at_least(needed)
}
