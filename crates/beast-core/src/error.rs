use beast_codes::CodeError;
use beast_ingest::IngestError;
use beast_transform::TransformError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    // === Source Errors ===
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Codes(#[from] CodeError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    // === Aggregation Errors ===
    /// Rows of one group disagree on a first-wins field in strict mode.
    #[error("{collection} '{id}': {conflicts} row(s) disagree on '{field}'")]
    AmbiguousGroup {
        collection: &'static str,
        id: String,
        field: &'static str,
        conflicts: usize,
    },

    // === Configuration Errors ===
    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // === Document Errors ===
    #[error("failed to serialize document '{slug}': {source}")]
    Serialize {
        slug: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
