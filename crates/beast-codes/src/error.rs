use std::path::PathBuf;

use beast_ingest::IngestError;
use thiserror::Error;

use crate::field::CodeField;

#[derive(Debug, Error)]
pub enum CodeError {
    #[error("code table for '{field}' not found: {path}")]
    TableNotFound { field: CodeField, path: PathBuf },

    #[error("failed to load code table for '{field}': {source}")]
    Load {
        field: CodeField,
        #[source]
        source: IngestError,
    },

    #[error("code table for '{field}' has no '{column}' column")]
    MissingColumn {
        field: CodeField,
        column: &'static str,
    },

    #[error("no code table registered for '{field}'")]
    NotRegistered { field: CodeField },
}

pub type Result<T> = std::result::Result<T, CodeError>;
