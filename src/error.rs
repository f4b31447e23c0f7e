use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid start-up configuration. Fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must have a positive size, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },

    #[error("initial snake length {length} does not fit (allowed 1-3 on a grid {width} wide)")]
    InitialLength { length: usize, width: u16 },
}

/// Record store failures. Always recovered by the caller.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read record store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write record store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("record store {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),
}
