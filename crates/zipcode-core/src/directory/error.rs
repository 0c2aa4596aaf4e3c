//! Dataset loading error types

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while loading the dataset.
///
/// Malformed records are not errors; the loader skips them with a warning.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The dataset source could not be opened
    #[error("failed to open dataset {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from an opened source failed part way through
    #[error("failed to read dataset: {0}")]
    Read(#[source] std::io::Error),
}

/// Result type for dataset loading
pub type LoadResult<T> = Result<T, LoadError>;
