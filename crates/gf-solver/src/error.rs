//! Error types for root-finding.

use thiserror::Error;

/// Errors that can occur while driving a residual vector to zero.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },

    /// A residual evaluation failed inside the problem formulation.
    #[error("Residual evaluation failed: {what}")]
    Residual { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    /// Wrap a formulation-side error as a residual failure.
    pub fn residual(err: impl std::fmt::Display) -> Self {
        SolverError::Residual {
            what: err.to_string(),
        }
    }
}
