use thiserror::Error;

/// Errors returned by the clustering engine and its collaborators.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset is empty, malformed, or holds non-finite coordinates.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// A centroid needs an existing point to seed its position.
    #[error("no points available to seed a centroid")]
    NoPointsAvailable,

    /// Point or centroid index past the end of its sequence.
    #[error("{kind} index {index} out of range (have {len})")]
    IndexOutOfRange {
        /// "point" or "centroid".
        kind: &'static str,
        /// Requested index.
        index: usize,
        /// Length of the sequence.
        len: usize,
    },

    /// Pin target is not an existing centroid.
    #[error("invalid cluster {cluster}: only {n_centroids} centroids exist")]
    InvalidCluster {
        /// Requested cluster index.
        cluster: usize,
        /// Number of centroids.
        n_centroids: usize,
    },

    /// Coordinates must be finite.
    #[error("non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },

    /// No dataset has been loaded yet.
    #[error("no dataset loaded")]
    NotLoaded,

    /// `reset` without a configured dataset source.
    #[error("no dataset source configured")]
    NoDatasetSource,

    /// Unparseable input line.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
