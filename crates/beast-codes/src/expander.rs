//! Memoized code expansion.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rayon::prelude::*;

use crate::error::{CodeError, Result};
use crate::field::CodeField;
use crate::table::{CodeTable, load_code_table};

/// Description returned for empty and unmapped codes.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug)]
enum Backing {
    Directory(PathBuf),
    Memory,
}

/// Translates short codes (`"COM"`) into descriptions (`"Comedy"`).
///
/// Code tables load lazily, once per field, and every `(field, code)` answer
/// is memoized for the lifetime of the expander. One expander is built per
/// run and shared by reference; it is safe to use from several threads.
#[derive(Debug)]
pub struct CodeExpander {
    backing: Backing,
    tables: RwLock<HashMap<CodeField, Arc<CodeTable>>>,
    memo: RwLock<HashMap<(CodeField, String), String>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl CodeExpander {
    /// Expander backed by `<dir>/<field>.csv` files.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::with_backing(Backing::Directory(dir.into()))
    }

    /// Expander with no files behind it; tables come from [`Self::with_table`].
    pub fn in_memory() -> Self {
        Self::with_backing(Backing::Memory)
    }

    fn with_backing(backing: Backing) -> Self {
        Self {
            backing,
            tables: RwLock::new(HashMap::new()),
            memo: RwLock::new(HashMap::new()),
        }
    }

    /// Register a table directly, replacing anything loaded for that field.
    #[must_use]
    pub fn with_table<I, C, D>(self, field: CodeField, entries: I) -> Self
    where
        I: IntoIterator<Item = (C, D)>,
        C: Into<String>,
        D: Into<String>,
    {
        let table = CodeTable::from_entries(field, entries);
        write(&self.tables).insert(field, Arc::new(table));
        self
    }

    pub fn codes_dir(&self) -> Option<&Path> {
        match &self.backing {
            Backing::Directory(dir) => Some(dir),
            Backing::Memory => None,
        }
    }

    /// The code table of `field`, loading it on first use.
    pub fn table(&self, field: CodeField) -> Result<Arc<CodeTable>> {
        if let Some(table) = read(&self.tables).get(&field) {
            return Ok(Arc::clone(table));
        }
        let loaded = match &self.backing {
            Backing::Directory(dir) => load_code_table(field, dir)?,
            Backing::Memory => return Err(CodeError::NotRegistered { field }),
        };
        let mut tables = write(&self.tables);
        let table = tables.entry(field).or_insert_with(|| Arc::new(loaded));
        Ok(Arc::clone(table))
    }

    /// Load the tables of `fields` concurrently. Fails on the first table
    /// that cannot be loaded.
    pub fn warm(&self, fields: &[CodeField]) -> Result<()> {
        fields
            .par_iter()
            .try_for_each(|field| self.table(*field).map(|_| ()))?;
        tracing::debug!(fields = fields.len(), "code tables warmed");
        Ok(())
    }

    /// Expand `code` for `field`.
    ///
    /// Empty codes, unmapped codes and codes of a field whose table cannot be
    /// loaded all expand to [`UNKNOWN`]. This never fails.
    pub fn expand(&self, field: CodeField, code: &str) -> String {
        let code = code.trim();
        if code.is_empty() {
            return UNKNOWN.to_string();
        }
        let key = (field, code.to_string());
        if let Some(hit) = read(&self.memo).get(&key) {
            return hit.clone();
        }

        let description = match self.table(field) {
            Ok(table) => table.describe(code).unwrap_or(UNKNOWN).to_string(),
            Err(error) => {
                tracing::warn!(field = %field, %error, "code table unavailable, expanding to Unknown");
                write(&self.tables)
                    .entry(field)
                    .or_insert_with(|| Arc::new(CodeTable::empty(field)));
                UNKNOWN.to_string()
            }
        };
        write(&self.memo).insert(key, description.clone());
        description
    }

    /// Number of memoized `(field, code)` answers.
    pub fn memoized(&self) -> usize {
        read(&self.memo).len()
    }
}
