//! Error type shared by the loaders, the configuration layer, and the planner.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the edges of the planner.
///
/// The routing core itself never fails: an unsupplied commodity becomes an
/// `UNREACHABLE` leg instead of an error.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Reading a file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from an in-memory or streamed source failed.
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    /// The catalog or configuration JSON is malformed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The demand CSV is malformed.
    #[error("demand input line {line}: {message}")]
    Demand { line: usize, message: String },

    /// Cargo capacity must be a positive number of units.
    #[error("cargo capacity must be positive, got {0}")]
    InvalidCapacity(u32),

    /// A configuration value could not be parsed.
    #[error("invalid configuration value for {key}: {value:?}")]
    Config { key: String, value: String },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PlannerError>;
