//! Solver error types.

use thiserror::Error;

/// Errors surfaced by checkpoint persistence.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The strategy file could not be opened, read, or written. Note that a
    /// missing file on load is downgraded to a warning, not an error.
    #[error("strategy file I/O: {0}")]
    Io(#[from] std::io::Error),

    /// The strategy file is truncated or carries impossible sizes. The
    /// in-memory table is left untouched.
    #[error("malformed checkpoint at node {node}: {reason}")]
    MalformedCheckpoint {
        /// Index of the node record where decoding failed.
        node: u64,
        /// What was wrong with it.
        reason: String,
    },
}
