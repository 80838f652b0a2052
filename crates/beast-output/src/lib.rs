//! Persistence of the film and biography collections.
//!
//! Writes the final JSON collections, one JSON file per document, interim
//! CSV flattenings and a manifest hashing every input and output.

pub mod atomic;
pub mod config;
pub mod error;
pub mod interim;
pub mod manifest;
pub mod writer;

// === Writing ===
pub use atomic::write_atomic;
pub use writer::{
    BIOGRAPHIES, CORPUS, FILMS, MANIFEST_FILE, WrittenOutputs, validate_slug, write_outputs,
};

// === Formats ===
pub use interim::render_csv;
pub use manifest::{CollectionCounts, Manifest, SourceEntry, SourceFile, WrittenFile};

// === Configuration and errors ===
pub use config::OutputConfig;
pub use error::{OutputError, Result};
