//! Error types for grid construction and solving.
//!
//! Every variant is a precondition violation detected before any search work
//! begins; none of them is recovered internally.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The matrix is empty, not square, or its tiles are not a permutation of `0..N*N`.
    #[error("invalid grid shape: {0}")]
    InvalidShape(String),

    /// The grid cannot reach the goal arrangement by legal slides.
    #[error("grid is not solvable")]
    Unsolvable,

    /// The evaluation selector names neither supported kind.
    #[error("unsupported evaluation function '{0}' (expected 'mismatch' or 'displacement')")]
    UnsupportedEvaluation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
