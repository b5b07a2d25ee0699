//! Centralized numeric constants for the percolation game.
//!
//! These values define the deterministic math for the sweep. Reference
//! curves depend on them bit-for-bit, so they only change through code.

// Truncation -------------------------------------------------------------------
/// Scale applied to `1/q` when deriving the truncation bound `K`.
pub const TRUNCATION_SCALE: f64 = 50.0;
/// Longest sequence a single `q` may build (reached near `q = 5e-6`).
pub const MAX_HORIZON: usize = 10_000_000;

// Sweep grid -------------------------------------------------------------------
/// Largest precision (grid step) a sweep accepts.
pub const MAX_PRECISION: f64 = 0.05;
/// Smallest precision a sweep accepts; keeps every `K` under `MAX_HORIZON`.
pub const MIN_PRECISION: f64 = 1e-5;
/// Precision used when nothing else is configured.
pub const DEFAULT_PRECISION: f64 = 0.01;

// Plot labels ------------------------------------------------------------------
pub const AXIS_LABEL_Q: &str = "q";
pub const AXIS_LABEL_WIN: &str = "Probability of win for player 1";
