//! Error types for source table loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort loading of a source table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Header line could not be parsed.
    #[error("failed to parse CSV header in {path}: {message}")]
    CsvHeader { path: PathBuf, message: String },

    /// File parsed to zero data rows.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Table Errors ===
    /// Required column not found in a loaded table.
    #[error("required column '{column}' not found in table '{table}'")]
    MissingColumn { column: String, table: String },

    /// A table was requested that was never loaded.
    #[error("table '{name}' was not loaded")]
    TableNotLoaded { name: String },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
