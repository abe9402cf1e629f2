//! Steam property errors.

use thiserror::Error;

/// Result type for steam-table operations.
pub type SteamResult<T> = Result<T, SteamError>;

/// Errors that can occur during table loading and state resolution.
#[derive(Error, Debug)]
pub enum SteamError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Table parse error at line {line}: {what}")]
    Parse { line: usize, what: String },

    /// Lookup outside the tabulated range. Surfaced rather than silently
    /// extrapolated.
    #[error("{what} = {value} outside tabulated range [{min}, {max}]")]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}
