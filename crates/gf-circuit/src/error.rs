//! Circuit analysis errors.

use gf_solver::SolverError;
use thiserror::Error;

/// Result type for circuit operations.
pub type CircuitResult<T> = Result<T, CircuitError>;

/// Errors that can occur during circuit parsing and analysis.
#[derive(Error, Debug)]
pub enum CircuitError {
    /// A loop traversal named an edge with no resistor or source behind it.
    /// Data-integrity failure: surfaced, never treated as a zero-volt drop.
    #[error("Unknown circuit element '{name}'")]
    UnknownElement { name: String },

    #[error("Parse error at line {line}: {what}")]
    Parse { line: usize, what: String },

    #[error("Invalid network: {what}")]
    InvalidNetwork { what: String },

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Solver(#[from] SolverError),
}
