//! Code table loading.
//!
//! A code table is a delimited file with a `Code` and a `Description`
//! column. Other columns are ignored.

use std::collections::BTreeMap;
use std::path::Path;

use beast_ingest::{IngestError, LoadOptions, load_table};

use crate::error::{CodeError, Result};
use crate::field::CodeField;

/// Codes of one field and their descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    pub field: CodeField,
    entries: BTreeMap<String, String>,
}

impl CodeTable {
    pub fn empty(field: CodeField) -> Self {
        Self {
            field,
            entries: BTreeMap::new(),
        }
    }

    /// Build a table from `(code, description)` pairs. The first description
    /// of a repeated code wins.
    pub fn from_entries<I, C, D>(field: CodeField, entries: I) -> Self
    where
        I: IntoIterator<Item = (C, D)>,
        C: Into<String>,
        D: Into<String>,
    {
        let mut table = Self::empty(field);
        for (code, description) in entries {
            table.insert(code.into(), description.into());
        }
        table
    }

    fn insert(&mut self, code: String, description: String) {
        let code = code.trim().to_string();
        if code.is_empty() {
            return;
        }
        self.entries
            .entry(code)
            .or_insert_with(|| description.trim().to_string());
    }

    /// Description of `code`, if the table maps it to a non-empty one.
    pub fn describe(&self, code: &str) -> Option<&str> {
        self.entries
            .get(code.trim())
            .map(String::as_str)
            .filter(|description| !description.is_empty())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(code, description)| (code.as_str(), description.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load `<dir>/<field>.csv`.
pub fn load_code_table(field: CodeField, dir: &Path) -> Result<CodeTable> {
    let path = dir.join(field.file_name());
    let loaded = load_table(field.as_str(), &path, &LoadOptions::default()).map_err(|error| {
        match error {
            IngestError::FileNotFound { path } => CodeError::TableNotFound { field, path },
            source => CodeError::Load { field, source },
        }
    })?;
    let table = loaded.table;

    let code_idx = table
        .column_index("Code")
        .ok_or(CodeError::MissingColumn {
            field,
            column: "Code",
        })?;
    let description_idx =
        table
            .column_index("Description")
            .ok_or(CodeError::MissingColumn {
                field,
                column: "Description",
            })?;

    let entries = table.rows().iter().filter_map(|row| {
        let code = row.get(code_idx)?;
        let description = row.get(description_idx)?;
        Some((code.clone(), description.clone()))
    });
    let table = CodeTable::from_entries(field, entries);
    tracing::debug!(field = %field, codes = table.len(), "loaded code table");
    Ok(table)
}
