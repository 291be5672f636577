//! Error types for life-strategies.

use thiserror::Error;

/// Errors raised while selecting or constructing a simulation.
///
/// Stepping itself never fails; these only surface at construction time or
/// when parsing user-supplied names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// No algorithm is registered under the given name.
    #[error("unknown algorithm: {0} (expected map-diff, map-set, or bounded-grid)")]
    UnknownAlgorithm(String),

    /// No generator is registered under the given name.
    #[error("unknown generator: {0} (expected random or glider-gun)")]
    UnknownGenerator(String),

    /// The dense grid cannot be allocated with these dimensions.
    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width in cells.
        width: usize,
        /// Requested height in cells.
        height: usize,
    },
}

/// Result type for life-strategies operations.
pub type LifeResult<T> = Result<T, LifeError>;
