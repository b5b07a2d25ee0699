//! Least-squares polynomial fits over a win-probability curve.
//!
//! The design matrix is the Vandermonde matrix of the `q` values. It is
//! reduced with Householder reflections rather than normal equations, which
//! would square its condition number.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::curve::WinCurve;
use crate::error::PercolationError;

/// Column norms below this fraction of their original size count as rank loss.
const RANK_TOLERANCE: f64 = 1e-10;

/// A fitted polynomial, coefficients stored lowest power first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    #[must_use]
    pub fn from_ascending(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Coefficients from the constant term upward.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Coefficients from the highest power downward.
    #[must_use]
    pub fn coefficients_descending(&self) -> Vec<f64> {
        self.coefficients.iter().rev().copied().collect()
    }

    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc.mul_add(x, c))
    }

    /// Sample at each of `xs`, e.g. the curve's own `q` values.
    #[must_use]
    pub fn sample(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (power, &coefficient) in self.coefficients.iter().enumerate().rev() {
            if coefficient == 0.0 && !(first && power == 0) {
                continue;
            }
            let magnitude = coefficient.abs();
            if first {
                if coefficient < 0.0 {
                    f.write_str("-")?;
                }
            } else if coefficient < 0.0 {
                f.write_str(" - ")?;
            } else {
                f.write_str(" + ")?;
            }
            match power {
                0 => write!(f, "{magnitude:.6}")?,
                1 => write!(f, "{magnitude:.6} x")?,
                _ => write!(f, "{magnitude:.6} x^{power}")?,
            }
            first = false;
        }
        if first {
            // no coefficients at all
            f.write_str("0")?;
        }
        Ok(())
    }
}

/// Fit a degree-`degree` polynomial to `(xs[i], ys[i])` by least squares.
///
/// # Errors
///
/// Returns `PercolationError::InvalidParameter` when `xs` and `ys` differ in
/// length or contain non-finite values, `PercolationError::InsufficientData`
/// with fewer than `degree + 1` points, and `PercolationError::SingularFit`
/// when the `xs` cannot pin down that many coefficients.
pub fn fit_polynomial(
    xs: &[f64],
    ys: &[f64],
    degree: usize,
) -> Result<Polynomial, PercolationError> {
    if xs.len() != ys.len() {
        return Err(PercolationError::InvalidParameter {
            field: "ys.len()",
            value: crate::numbers::usize_to_f64(ys.len()),
            expected: "equal to xs.len()",
        });
    }
    if let Some(&bad) = xs.iter().chain(ys).find(|v| !v.is_finite()) {
        return Err(PercolationError::InvalidParameter {
            field: "sample",
            value: bad,
            expected: "finite",
        });
    }
    let rows = xs.len();
    let cols = match degree.checked_add(1) {
        Some(cols) if cols <= rows => cols,
        _ => {
            return Err(PercolationError::InsufficientData {
                degree,
                points: rows,
            });
        }
    };

    // Row-major Vandermonde matrix: a[i * cols + j] = xs[i]^j.
    let mut a = vec![0.0; rows * cols];
    for (i, &x) in xs.iter().enumerate() {
        let mut power = 1.0;
        for j in 0..cols {
            a[i * cols + j] = power;
            power *= x;
        }
    }
    let mut b = ys.to_vec();

    for j in 0..cols {
        let column_norm = (j..rows)
            .map(|i| a[i * cols + j] * a[i * cols + j])
            .sum::<f64>()
            .sqrt();
        let original_norm = (0..rows)
            .map(|i| a[i * cols + j] * a[i * cols + j])
            .sum::<f64>()
            .sqrt();
        if column_norm <= RANK_TOLERANCE * original_norm.max(f64::MIN_POSITIVE) {
            return Err(PercolationError::SingularFit { degree });
        }

        let pivot = a[j * cols + j];
        let alpha = if pivot > 0.0 { -column_norm } else { column_norm };
        let mut v: Vec<f64> = (j..rows).map(|i| a[i * cols + j]).collect();
        v[0] -= alpha;
        let v_norm_sq: f64 = v.iter().map(|x| x * x).sum();

        for k in j..cols {
            let dot: f64 = v
                .iter()
                .enumerate()
                .map(|(offset, vi)| vi * a[(j + offset) * cols + k])
                .sum();
            let scale = 2.0 * dot / v_norm_sq;
            for (offset, vi) in v.iter().enumerate() {
                a[(j + offset) * cols + k] -= scale * vi;
            }
        }
        let dot: f64 = v
            .iter()
            .enumerate()
            .map(|(offset, vi)| vi * b[j + offset])
            .sum();
        let scale = 2.0 * dot / v_norm_sq;
        for (offset, vi) in v.iter().enumerate() {
            b[j + offset] -= scale * vi;
        }
    }

    // Back substitution on the upper-triangular R.
    let mut coefficients = vec![0.0; cols];
    for j in (0..cols).rev() {
        let tail: f64 = ((j + 1)..cols)
            .map(|k| a[j * cols + k] * coefficients[k])
            .sum();
        coefficients[j] = (b[j] - tail) / a[j * cols + j];
    }

    log::debug!("fitted degree {degree} polynomial over {rows} points");
    Ok(Polynomial { coefficients })
}

/// Fit against a sweep's curve.
///
/// # Errors
///
/// See [`fit_polynomial`].
pub fn fit_curve(curve: &WinCurve, degree: usize) -> Result<Polynomial, PercolationError> {
    fit_polynomial(&curve.qs(), &curve.probabilities(), degree)
}
