//! Percolation Game Numerics
//!
//! Win probability of player 1 in the directed-percolation game on Z², swept
//! over the occupation probability `q`. The crate has no I/O: it builds the
//! truncated step recurrence, folds it into a win probability for the chosen
//! lattice, assembles the curve and fits polynomials to it.

pub mod aggregate;
pub mod constants;
pub mod curve;
pub mod error;
pub mod fit;
pub mod numbers;
pub mod recurrence;
pub mod sweep;
pub mod topology;

// Re-export commonly used types
pub use aggregate::{win_probability, win_probability_at, win_probability_for};
pub use curve::{CurvePoint, WinCurve};
pub use error::PercolationError;
pub use fit::{Polynomial, fit_curve, fit_polynomial};
pub use recurrence::{
    RecurrenceSequence, build_default_recurrence, build_recurrence, truncation_bound,
    validate_probability,
};
pub use sweep::{SweepConfig, run_sweep, sweep_grid, validate_precision};
pub use topology::Topology;
