//! The `beast.toml` file: pipeline sections plus `[output]`.
//!
//! ```toml
//! [sources]
//! data_dir = "data/0_raw"
//!
//! [aggregation]
//! strict = false
//!
//! [output]
//! output_dir = "data"
//! individual = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use beast_core::config::{AggregationConfig, CleaningConfig};
use beast_core::{PipelineConfig, SourcesConfig};
use beast_output::OutputConfig;
use serde::{Deserialize, Serialize};

/// Read when `--config` is not given and the file exists.
pub const DEFAULT_CONFIG_FILE: &str = "beast.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeastConfig {
    pub sources: SourcesConfig,
    pub aggregation: AggregationConfig,
    pub cleaning: CleaningConfig,
    pub output: OutputConfig,
}

impl BeastConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Load `path`, or `beast.toml` in the working directory when no path
    /// is given. A missing default file means all defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !required && !path.is_file() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("failed to load configuration {}", path.display()))?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            sources: self.sources.clone(),
            aggregation: self.aggregation,
            cleaning: self.cleaning,
        }
    }

    /// Apply command line overrides on top of the file values.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(dir) = &overrides.data_dir {
            self.sources.data_dir.clone_from(dir);
        }
        if let Some(dir) = &overrides.codes_dir {
            self.sources.codes_dir = Some(dir.clone());
        }
        if let Some(dir) = &overrides.output_dir {
            self.output.output_dir.clone_from(dir);
        }
        if overrides.strict {
            self.aggregation.strict = true;
        }
        if overrides.no_individual {
            self.output.individual = false;
        }
        if overrides.no_interim_csv {
            self.output.interim_csv = false;
        }
    }
}

/// Values given on the command line. `None`/`false` leaves the file value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub codes_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub strict: bool,
    pub no_individual: bool,
    pub no_interim_csv: bool,
}
