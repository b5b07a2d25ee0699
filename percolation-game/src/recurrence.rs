//! Finite-horizon construction of the game's step recurrence `P(k)`.
//!
//! `P(k)` is the probability that the recursive quantity has resolved in the
//! player's favor by step `k`. The true sequence is infinite; it is truncated
//! at a bound `K` chosen so the neglected tail weight `(1-q)^K` is negligible.
use crate::constants::{MAX_HORIZON, TRUNCATION_SCALE};
use crate::error::PercolationError;
use crate::numbers::{trunc_f64_to_usize, usize_to_f64};

/// Reject any `q` outside the open interval (0, 1), NaN included.
///
/// # Errors
///
/// Returns `PercolationError::InvalidParameter` when `q` is not strictly
/// between 0 and 1.
pub fn validate_probability(q: f64) -> Result<(), PercolationError> {
    if q > 0.0 && q < 1.0 {
        Ok(())
    } else {
        Err(PercolationError::InvalidParameter {
            field: "q",
            value: q,
            expected: "strictly between 0 and 1",
        })
    }
}

/// Truncation bound `K = floor(50 * (1/q))`.
///
/// Smaller `q` decays more slowly and needs proportionally more terms.
///
/// # Errors
///
/// Returns `PercolationError::InvalidParameter` when `q` is out of range.
pub fn truncation_bound(q: f64) -> Result<usize, PercolationError> {
    validate_probability(q)?;
    let bound = trunc_f64_to_usize(TRUNCATION_SCALE * (1.0 / q));
    log::trace!("truncation bound for q={q}: K={bound}");
    Ok(bound)
}

/// Immutable `P(0..=K)` for a single `q`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceSequence {
    q: f64,
    values: Vec<f64>,
}

impl RecurrenceSequence {
    #[must_use]
    pub const fn q(&self) -> f64 {
        self.q
    }

    /// The truncation bound `K`; the sequence holds `K + 1` values.
    #[must_use]
    pub fn horizon(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, k: usize) -> Option<f64> {
        self.values.get(k).copied()
    }

    /// Final value `P(K)`.
    #[must_use]
    pub fn last(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }
}

/// Build `P(0..=K)` with `P(0) = 0` and
/// `P(k+1) = P(k) + q * (1 - P(k)) * (1-q)^k`.
///
/// # Errors
///
/// Returns `PercolationError::InvalidParameter` when `q` is not strictly
/// between 0 and 1, or when `horizon` is zero or above [`MAX_HORIZON`].
pub fn build_recurrence(q: f64, horizon: usize) -> Result<RecurrenceSequence, PercolationError> {
    validate_probability(q)?;
    let horizon_error = || PercolationError::InvalidParameter {
        field: "K",
        value: usize_to_f64(horizon),
        expected: "a positive integer no larger than 10000000",
    };
    if horizon == 0 || horizon > MAX_HORIZON {
        return Err(horizon_error());
    }

    let survival = 1.0 - q;
    let mut values = Vec::new();
    values.try_reserve_exact(horizon + 1).map_err(|_| horizon_error())?;
    values.push(0.0);

    // (1-q)^k, advanced one factor per step; underflows to zero for large k.
    let mut weight = 1.0;
    let mut current = 0.0;
    for _ in 0..horizon {
        current += q * (1.0 - current) * weight;
        values.push(current);
        weight *= survival;
    }

    Ok(RecurrenceSequence { q, values })
}

/// Build the sequence at its default truncation bound.
///
/// # Errors
///
/// Returns `PercolationError::InvalidParameter` when `q` is out of range.
pub fn build_default_recurrence(q: f64) -> Result<RecurrenceSequence, PercolationError> {
    build_recurrence(q, truncation_bound(q)?)
}
