use std::path::PathBuf;
use thiserror::Error;

/// Ingestion-time failures. These are fatal: the program cannot run
/// meaningfully on a partial dataset. Query-time misses (no records in a
/// year range, an unknown name) are ordinary empty results, never errors.
#[derive(Error, Debug)]
pub enum DataError {
    /// A source file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source yielded zero usable records
    #[error("dataset is empty: {0}")]
    EmptyDataset(&'static str),
}

pub type Result<T> = std::result::Result<T, DataError>;
