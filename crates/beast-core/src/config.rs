//! Pipeline configuration.
//!
//! ```toml
//! [sources]
//! data_dir = "data/0_raw"
//! file_prefix = "TheBeast2018-2023_20250305"
//!
//! [sources.tables.main]
//! file = "main-v5.csv"
//!
//! [aggregation]
//! strict = true
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use beast_ingest::{LoadOptions, SourceSpec};
use beast_transform::names;
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregationMode;
use crate::clean::ZeroPolicy;
use crate::error::{PipelineError, Result};

pub const DEFAULT_FILE_PREFIX: &str = "TheBeast2018-2023_20250305";
pub const DEFAULT_MAIN_FILE: &str = "The-Beast-2018-2023-main-v4.csv";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub sources: SourcesConfig,
    pub aggregation: AggregationConfig,
    pub cleaning: CleaningConfig,
}

impl PipelineConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub data_dir: PathBuf,
    /// Code table directory, `<data_dir>/codes` when unset.
    pub codes_dir: Option<PathBuf>,
    pub file_prefix: String,
    /// Per-table overrides, keyed by table name.
    pub tables: BTreeMap<String, TableOverride>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/0_raw"),
            codes_dir: None,
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            tables: BTreeMap::new(),
        }
    }
}

/// Any subset of a table's load settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOverride {
    pub file: Option<String>,
    pub delimiter: Option<char>,
    pub header_skip: Option<usize>,
    pub drop_empty_columns: Option<bool>,
}

/// Fully resolved load settings of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSource {
    pub file: String,
    pub delimiter: char,
    pub header_skip: usize,
    pub drop_empty_columns: bool,
}

impl TableSource {
    fn prefixed(prefix: &str, suffix: &str) -> Self {
        Self {
            file: format!("{prefix}-{suffix}.csv"),
            delimiter: ',',
            header_skip: 0,
            drop_empty_columns: true,
        }
    }

    fn apply(mut self, custom: &TableOverride) -> Self {
        if let Some(file) = &custom.file {
            self.file.clone_from(file);
        }
        if let Some(delimiter) = custom.delimiter {
            self.delimiter = delimiter;
        }
        if let Some(lines) = custom.header_skip {
            self.header_skip = lines;
        }
        if let Some(drop) = custom.drop_empty_columns {
            self.drop_empty_columns = drop;
        }
        self
    }
}

impl SourcesConfig {
    pub fn codes_dir(&self) -> PathBuf {
        self.codes_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("codes"))
    }

    /// Built-in settings of a known table.
    pub fn default_table(&self, name: &str) -> Option<TableSource> {
        let prefix = self.file_prefix.as_str();
        let source = match name {
            names::MAIN => TableSource {
                file: DEFAULT_MAIN_FILE.to_string(),
                delimiter: ';',
                header_skip: 1,
                drop_empty_columns: true,
            },
            names::GENRE => TableSource::prefixed(prefix, "genre"),
            names::MARKETING => TableSource::prefixed(prefix, "mrktg"),
            names::NATIONALITY => TableSource::prefixed(prefix, "nat"),
            names::TAGS => TableSource::prefixed(prefix, "themes_plots_tags"),
            names::CHARACTERS => TableSource::prefixed(prefix, "character_tags"),
            names::ROLES => TableSource::prefixed(prefix, "role"),
            names::BIOGRAPHIES => TableSource {
                drop_empty_columns: false,
                ..TableSource::prefixed(prefix, "biog")
            },
            names::BIOGRAPHY_NATIONALITY => TableSource {
                drop_empty_columns: false,
                ..TableSource::prefixed(prefix, "biognat")
            },
            _ => return None,
        };
        Some(source)
    }

    /// Resolved settings of a known table, overrides applied.
    pub fn table(&self, name: &str) -> Option<TableSource> {
        let source = self.default_table(name)?;
        Some(match self.tables.get(name) {
            Some(custom) => source.apply(custom),
            None => source,
        })
    }

    /// One load spec per source table.
    pub fn specs(&self) -> Result<Vec<SourceSpec>> {
        if let Some(unknown) = self
            .tables
            .keys()
            .find(|name| !names::ALL.contains(&name.as_str()))
        {
            return Err(PipelineError::Config {
                message: format!(
                    "unknown source table '{unknown}', expected one of: {}",
                    names::ALL.join(", ")
                ),
            });
        }

        names::ALL
            .iter()
            .map(|name| {
                let source = self.table(name).ok_or_else(|| PipelineError::Config {
                    message: format!("no settings for source table '{name}'"),
                })?;
                let delimiter = u8::try_from(source.delimiter)
                    .ok()
                    .filter(u8::is_ascii)
                    .ok_or_else(|| PipelineError::Config {
                        message: format!(
                            "delimiter of '{name}' must be a single ASCII character, got {:?}",
                            source.delimiter
                        ),
                    })?;
                let options = LoadOptions::default()
                    .with_delimiter(delimiter)
                    .with_header_skip(source.header_skip)
                    .with_drop_empty_columns(source.drop_empty_columns);
                Ok(SourceSpec::new(*name, self.data_dir.join(&source.file), options))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Fail on rows that disagree on a first-wins field.
    pub strict: bool,
}

impl AggregationConfig {
    pub fn mode(self) -> AggregationMode {
        if self.strict {
            AggregationMode::Strict
        } else {
            AggregationMode::Lenient
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    pub zeros: ZeroPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_export_layout() {
        let config = PipelineConfig::default();
        let specs = config.sources.specs().unwrap();

        assert_eq!(specs.len(), names::ALL.len());
        let main = &specs[0];
        assert_eq!(main.name, "main");
        assert!(main.path.ends_with(DEFAULT_MAIN_FILE));
        assert_eq!(main.options.delimiter, b';');
        assert_eq!(main.options.header_skip, 1);

        let biog = specs.iter().find(|s| s.name == "biographies").unwrap();
        assert!(biog.path.ends_with("TheBeast2018-2023_20250305-biog.csv"));
        assert!(!biog.options.drop_empty_columns);
        assert_eq!(config.sources.codes_dir(), PathBuf::from("data/0_raw/codes"));
    }

    #[test]
    fn partial_overrides_keep_table_defaults() {
        let config = PipelineConfig::from_toml(
            r#"
            [sources]
            data_dir = "/srv/beast"
            file_prefix = "Drop2025"

            [sources.tables.main]
            file = "main-v5.csv"

            [aggregation]
            strict = true

            [cleaning]
            zeros = "keep"
            "#,
        )
        .unwrap();

        let main = config.sources.table("main").unwrap();
        assert_eq!(main.file, "main-v5.csv");
        assert_eq!(main.delimiter, ';');
        assert_eq!(config.sources.table("tags").unwrap().file, "Drop2025-themes_plots_tags.csv");
        assert_eq!(config.aggregation.mode(), AggregationMode::Strict);
        assert_eq!(config.cleaning.zeros, ZeroPolicy::Keep);
    }

    #[test]
    fn unknown_tables_and_wide_delimiters_are_rejected() {
        let mut sources = SourcesConfig::default();
        sources.tables.insert("posters".to_string(), TableOverride::default());
        assert!(matches!(sources.specs(), Err(PipelineError::Config { .. })));

        let mut sources = SourcesConfig::default();
        sources.tables.insert(
            "genre".to_string(),
            TableOverride {
                delimiter: Some('§'),
                ..TableOverride::default()
            },
        );
        assert!(matches!(sources.specs(), Err(PipelineError::Config { .. })));
    }
}
