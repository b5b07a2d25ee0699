//! The sweep's output artifact: win probability as a function of `q`.
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;

use crate::topology::Topology;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub q: f64,
    pub win_probability: f64,
}

/// Ordered `(q, winProb)` pairs, increasing in `q`.
///
/// Points are only appended by the sweep; once handed out the curve is
/// read-only. It serializes for reports but is never read back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinCurve {
    topology: Topology,
    precision: f64,
    points: Vec<CurvePoint>,
}

impl WinCurve {
    pub(crate) fn with_capacity(topology: Topology, precision: f64, capacity: usize) -> Self {
        Self {
            topology,
            precision,
            points: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, q: f64, win_probability: f64) {
        debug_assert!(self.points.last().is_none_or(|last| last.q < q));
        self.points.push(CurvePoint {
            q,
            win_probability,
        });
    }

    #[must_use]
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// Grid step the sweep used.
    #[must_use]
    pub const fn precision(&self) -> f64 {
        self.precision
    }

    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The `q` column, for fitters and plotters that take parallel sequences.
    #[must_use]
    pub fn qs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.q).collect()
    }

    /// The win-probability column, aligned with [`WinCurve::qs`].
    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.win_probability).collect()
    }

    #[must_use]
    pub fn is_strictly_increasing(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[1].win_probability > w[0].win_probability)
    }

    /// Hex SHA-256 over the bit patterns of every point.
    ///
    /// Two runs with the same inputs produce the same fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.topology.code().as_bytes());
        hasher.update(self.precision.to_bits().to_le_bytes());
        for point in &self.points {
            hasher.update(point.q.to_bits().to_le_bytes());
            hasher.update(point.win_probability.to_bits().to_le_bytes());
        }
        hasher
            .finalize()
            .iter()
            .fold(String::with_capacity(64), |mut out, byte| {
                let _ = write!(out, "{byte:02x}");
                out
            })
    }
}
