//! Source table ingestion.
//!
//! Reads the normalized relational exports (films, people, roles, characters,
//! code tables) into in-memory [`Table`]s.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use beast_ingest::{LoadOptions, load_table};
//!
//! let options = LoadOptions::default().with_delimiter(b';').with_header_skip(1);
//! let loaded = load_table("main", Path::new("data/0_raw/main.csv"), &options)?;
//! println!("{} rows, {} malformed", loaded.table.len(), loaded.report.malformed_rows);
//! ```

mod error;
mod hash;
mod loader;
mod sources;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Hashing ===
pub use hash::{file_sha256, sha256_hex};

// === Loading ===
pub use loader::{LoadOptions, LoadReport, LoadedTable, load_table};
pub use sources::{SourceSet, SourceSpec, load_sources};

// === Tables ===
pub use table::{Table, cell};
