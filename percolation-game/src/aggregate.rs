//! Folds a recurrence sequence into the player's win probability.
use crate::error::PercolationError;
use crate::recurrence::{RecurrenceSequence, build_default_recurrence, validate_probability};
use crate::topology::Topology;

/// Win probability for one `q` under `topology`.
///
/// Sums, for `i = 1..=K`, the probability `q * (1-q)^(i-1)` that the deciding
/// event lands exactly on step `i`, times the topology's contribution of
/// `P(i)`.
///
/// # Errors
///
/// Returns `PercolationError::InvalidParameter` when `q` is not strictly
/// between 0 and 1, or when the sequence does not cover a single step.
pub fn win_probability(
    sequence: &RecurrenceSequence,
    q: f64,
    topology: Topology,
) -> Result<f64, PercolationError> {
    validate_probability(q)?;
    let values = sequence.values();
    if values.len() < 2 {
        return Err(PercolationError::InvalidParameter {
            field: "K",
            value: 0.0,
            expected: "a positive integer",
        });
    }

    let survival = 1.0 - q;
    let mut weight = 1.0;
    let mut total = 0.0;
    for &p in &values[1..] {
        total += topology.contribution(p) * q * weight;
        weight *= survival;
    }
    Ok(total)
}

/// Derive `K`, build `P` and aggregate it in one call.
///
/// # Errors
///
/// Returns `PercolationError::InvalidParameter` when `q` is out of range.
pub fn win_probability_at(q: f64, topology: Topology) -> Result<f64, PercolationError> {
    let sequence = build_default_recurrence(q)?;
    win_probability(&sequence, q, topology)
}

/// Same as [`win_probability_at`] with the topology given as text.
///
/// # Errors
///
/// Returns `PercolationError::InvalidTopology` when the selector is not
/// recognized, and `PercolationError::InvalidParameter` for a bad `q`.
pub fn win_probability_for(q: f64, topology: &str) -> Result<f64, PercolationError> {
    let topology = topology.parse::<Topology>()?;
    win_probability_at(q, topology)
}
