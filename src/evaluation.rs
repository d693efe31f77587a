//! Evaluation functions that order the search frontier.
//!
//! Both kinds add an admissible estimate of the remaining moves to the path
//! cost, so the first goal popped from the frontier is an optimal one.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::grid::Grid;

/// Selects which heuristic drives a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Evaluation {
    /// Number of misplaced tiles (Hamming distance).
    Mismatch,
    /// Sum of the tiles' Manhattan distances to their goal positions.
    #[default]
    Displacement,
}

impl Evaluation {
    pub const ALL: [Evaluation; 2] = [Evaluation::Mismatch, Evaluation::Displacement];

    /// Estimated number of moves left; never more than the true number.
    #[inline]
    pub fn heuristic(self, grid: &Grid) -> u32 {
        match self {
            Evaluation::Mismatch => grid.mismatch_count(),
            Evaluation::Displacement => grid.total_displacement(),
        }
    }

    /// Frontier priority of a grid reached after `path_cost` moves. Lower is explored first.
    #[inline]
    pub fn score(self, grid: &Grid, path_cost: u32) -> u32 {
        self.heuristic(grid) + path_cost
    }

    pub fn name(self) -> &'static str {
        match self {
            Evaluation::Mismatch => "mismatch",
            Evaluation::Displacement => "displacement",
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Evaluation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mismatch" | "hamming" => Ok(Evaluation::Mismatch),
            "displacement" | "manhattan" => Ok(Evaluation::Displacement),
            _ => Err(Error::UnsupportedEvaluation(s.to_string())),
        }
    }
}
