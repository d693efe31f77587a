//! Sliding Tile Puzzle Solver Library
//!
//! Finds optimal solutions to N x N sliding tile puzzles (the 8-puzzle, the
//! 15-puzzle, ...) with a best-first search guided by an admissible heuristic.
//!
//! ```no_run
//! use npuzzle::{solve, Evaluation, Grid};
//!
//! let grid = Grid::new(&[[1u16, 2, 3], [4, 8, 5], [0, 7, 6]])?;
//! let solution = solve(&grid, Evaluation::Displacement)?;
//! assert_eq!(solution.move_count(), 4);
//! # Ok::<(), npuzzle::Error>(())
//! ```

pub mod error;
pub mod evaluation;
pub mod grid;
pub mod persistence;
pub mod report;
pub mod solver;

pub use error::{Error, Result};
pub use evaluation::Evaluation;
pub use grid::{Direction, Grid};
pub use solver::{solve, SearchStats, Solution};
