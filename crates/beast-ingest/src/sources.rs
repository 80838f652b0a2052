//! Loading a whole set of source tables.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::error::{IngestError, Result};
use crate::loader::{LoadOptions, LoadReport, LoadedTable, load_table};
use crate::table::Table;

/// One source table to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub name: String,
    pub path: PathBuf,
    pub options: LoadOptions,
}

impl SourceSpec {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            options,
        }
    }
}

/// Every loaded source table, by name.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    tables: BTreeMap<String, LoadedTable>,
    paths: BTreeMap<String, PathBuf>,
}

impl SourceSet {
    pub fn insert(&mut self, spec: &SourceSpec, loaded: LoadedTable) {
        self.paths.insert(spec.name.clone(), spec.path.clone());
        self.tables.insert(spec.name.clone(), loaded);
    }

    pub fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .map(|loaded| &loaded.table)
            .ok_or_else(|| IngestError::TableNotLoaded {
                name: name.to_string(),
            })
    }

    pub fn reports(&self) -> impl Iterator<Item = (&str, &LoadReport)> {
        self.tables
            .iter()
            .map(|(name, loaded)| (name.as_str(), &loaded.report))
    }

    pub fn paths(&self) -> impl Iterator<Item = (&str, &PathBuf)> {
        self.paths.iter().map(|(name, path)| (name.as_str(), path))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Load every spec, one read per table in parallel. The first failure aborts
/// the whole set.
pub fn load_sources(specs: &[SourceSpec]) -> Result<SourceSet> {
    let loaded: Vec<(usize, LoadedTable)> = specs
        .par_iter()
        .enumerate()
        .map(|(idx, spec)| load_table(&spec.name, &spec.path, &spec.options).map(|t| (idx, t)))
        .collect::<Result<_>>()?;

    let mut set = SourceSet::default();
    for (idx, table) in loaded {
        set.insert(&specs[idx], table);
    }
    Ok(set)
}
