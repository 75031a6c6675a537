use thiserror::Error;

/// Result type for path-construction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating caller-supplied paths and partitions.
///
/// Only precondition violations surface as errors. A partition that fails the
/// divisor condition, a construction attempt that exhausts all three stages,
/// or an append step that runs out of distinct hop lengths are all ordinary
/// outcomes recorded on the [`GrowthRecord`](crate::growth::GrowthRecord).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A path or partition failed structural validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The initial path and partition disagree on the number of edges.
    #[error("path has {path_edges} edges but the partition requires {partition_edges}")]
    EdgeCountMismatch {
        /// Edges implied by the path (vertex count minus one).
        path_edges: usize,
        /// Edges required by the partition (sum of its counts).
        partition_edges: usize,
    },
}

impl Error {
    /// Creates an `InvalidInput` error from any string-like message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}
