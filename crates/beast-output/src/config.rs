use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What to write, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root of the `interim/` and `final/` directories.
    pub output_dir: PathBuf,
    /// One CSV per collection under `interim/`.
    pub interim_csv: bool,
    /// One JSON file per document, named by slug.
    pub individual: bool,
    /// `final/manifest.json` with source and output hashes.
    pub manifest: bool,
    /// Indented JSON.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data"),
            interim_csv: true,
            individual: true,
            manifest: true,
            pretty: true,
        }
    }
}

impl OutputConfig {
    pub fn interim_dir(&self) -> PathBuf {
        self.output_dir.join("interim")
    }

    pub fn final_dir(&self) -> PathBuf {
        self.output_dir.join("final")
    }
}
