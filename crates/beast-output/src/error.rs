//! Output error types.

use std::path::PathBuf;

use beast_ingest::IngestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// File I/O error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temp file was written but could not replace the target.
    #[error("failed to move {temp_path} into place at {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to render interim CSV {name}: {source}")]
    Csv {
        name: String,
        #[source]
        source: csv::Error,
    },

    /// A slug that cannot be used as a file name.
    #[error("slug '{slug}' cannot be used as a file name")]
    InvalidSlug { slug: String },

    /// A source file could not be hashed for the manifest.
    #[error(transparent)]
    SourceHash(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, OutputError>;
