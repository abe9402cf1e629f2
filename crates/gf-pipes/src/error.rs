//! Pipe network errors.

use gf_solver::SolverError;
use thiserror::Error;

/// Result type for pipe-network operations.
pub type PipeResult<T> = Result<T, PipeError>;

/// Errors that can occur during pipe-network analysis.
#[derive(Error, Debug)]
pub enum PipeError {
    #[error("Unknown pipe '{name}'")]
    UnknownPipe { name: String },

    #[error("Unknown node '{name}'")]
    UnknownNode { name: String },

    #[error("Invalid network: {what}")]
    InvalidNetwork { what: String },

    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    #[error(transparent)]
    Solver(#[from] SolverError),
}
