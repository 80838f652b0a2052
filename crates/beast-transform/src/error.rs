use beast_ingest::IngestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// A source table was missing, or lacks a key column.
    #[error(transparent)]
    Source(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
