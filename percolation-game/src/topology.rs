//! Lattice topologies the game can be played on.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PercolationError;

/// Which part of Z² the game is played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    /// The x >= y half of the grid. One recursive quantity decides the game.
    #[default]
    Wedge,
    /// The complete grid. Two independent copies of the recursive quantity
    /// race, and either one resolving favorably wins.
    FullGrid,
}

impl Topology {
    /// Per-step contribution of `p`, the probability that the recursive
    /// quantity has resolved in the player's favor by that step.
    #[must_use]
    pub fn contribution(self, p: f64) -> f64 {
        match self {
            Self::Wedge => p,
            Self::FullGrid => {
                let miss = 1.0 - p;
                1.0 - miss * miss
            }
        }
    }

    /// Single-letter code accepted at the prompt.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Wedge => "W",
            Self::FullGrid => "Z",
        }
    }

    #[must_use]
    pub const fn plot_title(self) -> &'static str {
        match self {
            Self::Wedge => "Winning probability for player 1 against q in Z_2 wedge game",
            Self::FullGrid => "Winning probability for player 1 against q in Z_2 grid game",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wedge => f.write_str("wedge"),
            Self::FullGrid => f.write_str("full-grid"),
        }
    }
}

impl FromStr for Topology {
    type Err = PercolationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "wedge" => Ok(Self::Wedge),
            "z" | "grid" | "full" | "full-grid" | "fullgrid" => Ok(Self::FullGrid),
            _ => Err(PercolationError::InvalidTopology(s.to_string())),
        }
    }
}
