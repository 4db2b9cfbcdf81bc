//! Loader error type.

use thiserror::Error;

use nr_core::MapError;

/// Errors produced while bulk-loading roads.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A well-formed record that the graph rejected.  `record` is 1-based and
    /// does not count the header row.
    #[error("record {record}: {source}")]
    Road { record: usize, source: MapError },
}

pub type LoadResult<T> = Result<T, LoadError>;
