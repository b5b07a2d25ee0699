//! Drives the recurrence and aggregation across a grid of `q` values.
use serde::{Deserialize, Serialize};

use crate::aggregate::win_probability;
use crate::constants::{DEFAULT_PRECISION, MAX_PRECISION, MIN_PRECISION};
use crate::curve::WinCurve;
use crate::error::PercolationError;
use crate::numbers::usize_to_f64;
use crate::recurrence::{build_recurrence, truncation_bound};
use crate::topology::Topology;

/// Inputs for one sweep. Both fields are fixed for every `q` evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "SweepConfig::default_precision")]
    pub precision: f64,
    #[serde(default)]
    pub topology: Topology,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            precision: Self::default_precision(),
            topology: Topology::default(),
        }
    }
}

impl SweepConfig {
    const fn default_precision() -> f64 {
        DEFAULT_PRECISION
    }

    #[must_use]
    pub const fn new(precision: f64, topology: Topology) -> Self {
        Self {
            precision,
            topology,
        }
    }

    /// Parse a JSON document; missing fields fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error for malformed documents.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// # Errors
    ///
    /// Returns `PercolationError::InvalidParameter` when the precision is
    /// outside [1e-5, 0.05].
    pub fn validate(&self) -> Result<(), PercolationError> {
        validate_precision(self.precision)
    }
}

/// Accept a grid step in [1e-5, 0.05]; NaN is rejected.
///
/// The lower end keeps the first grid point's truncation bound within
/// [`MAX_HORIZON`](crate::constants::MAX_HORIZON).
///
/// # Errors
///
/// Returns `PercolationError::InvalidParameter` when `precision` is out of range.
pub fn validate_precision(precision: f64) -> Result<(), PercolationError> {
    if (MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
        Ok(())
    } else {
        Err(PercolationError::InvalidParameter {
            field: "precision",
            value: precision,
            expected: "between 0.00001 and 0.05",
        })
    }
}

/// Grid `precision, 2*precision, ...` strictly below 1.
///
/// Each point is `i * precision` rather than a running sum so rounding does
/// not accumulate across the grid.
///
/// # Errors
///
/// Returns `PercolationError::InvalidParameter` when `precision` is out of range.
pub fn sweep_grid(precision: f64) -> Result<Vec<f64>, PercolationError> {
    validate_precision(precision)?;
    let mut grid = Vec::new();
    let mut step = 1usize;
    loop {
        let q = usize_to_f64(step) * precision;
        if q >= 1.0 {
            break;
        }
        grid.push(q);
        step += 1;
    }
    Ok(grid)
}

/// Evaluate the win probability at every grid point, in increasing `q`.
///
/// Each `P` sequence lives only for the aggregation of its own `q`.
///
/// # Errors
///
/// Returns `PercolationError::InvalidParameter` when the precision is out of
/// range. Validation happens before any point is computed.
pub fn run_sweep(config: &SweepConfig) -> Result<WinCurve, PercolationError> {
    config.validate()?;
    let grid = sweep_grid(config.precision)?;
    log::info!(
        "sweeping {} points on the {} lattice (precision {})",
        grid.len(),
        config.topology,
        config.precision
    );

    let mut curve = WinCurve::with_capacity(config.topology, config.precision, grid.len());
    for q in grid {
        let horizon = truncation_bound(q)?;
        let sequence = build_recurrence(q, horizon)?;
        let value = win_probability(&sequence, q, config.topology)?;
        log::debug!("q={q:.6} K={horizon} win={value:.12}");
        curve.push(q, value);
    }

    log::info!("sweep finished with {} points", curve.len());
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coarsest_grid_has_nineteen_points() {
        let grid = sweep_grid(0.05).unwrap();
        assert_eq!(grid.len(), 19);
        assert!((grid[0] - 0.05).abs() < 1e-12);
        assert!((grid[18] - 0.95).abs() < 1e-12);
        assert!(grid.iter().all(|&q| q < 1.0));
    }

    #[test]
    fn grid_never_reaches_one() {
        assert_eq!(sweep_grid(0.01).unwrap().len(), 99);
        assert_eq!(sweep_grid(0.03).unwrap().len(), 33);
        let grid = sweep_grid(0.04).unwrap();
        assert_eq!(grid.len(), 24);
        assert!(grid.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn precision_bounds_are_enforced() {
        assert!(validate_precision(0.05).is_ok());
        assert!(validate_precision(1e-4).is_ok());
        assert!(validate_precision(MIN_PRECISION).is_ok());
        for bad in [0.0, -0.01, 1e-6, 1e-300, 0.051, 0.5, f64::NAN] {
            assert!(matches!(
                validate_precision(bad),
                Err(PercolationError::InvalidParameter {
                    field: "precision",
                    ..
                })
            ));
        }
    }

    #[test]
    fn invalid_precision_fails_before_computing() {
        let config = SweepConfig::new(0.2, Topology::Wedge);
        assert!(run_sweep(&config).is_err());
    }

    #[test]
    fn sweep_is_deterministic() {
        let config = SweepConfig::new(0.05, Topology::FullGrid);
        let first = run_sweep(&config).unwrap();
        let second = run_sweep(&config).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let config = SweepConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SweepConfig::default());
        assert!((config.precision - 0.01).abs() < f64::EPSILON);

        let config = SweepConfig::from_json_str(r#"{"topology":"full-grid"}"#).unwrap();
        assert_eq!(config.topology, Topology::FullGrid);
        assert!(SweepConfig::from_json_str(r#"{"topology":"hex"}"#).is_err());
    }
}
