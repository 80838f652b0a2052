//! In-memory source tables.

use std::collections::HashSet;

use crate::error::{IngestError, Result};

/// A loaded relation: normalized headers and string cells, one row per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Build a table from literal headers and rows.
    pub fn from_rows<H, R, C>(name: &str, headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let headers = headers
            .into_iter()
            .map(|header| header.as_ref().to_string())
            .collect();
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|cell| cell.as_ref().to_string()).collect())
            .collect();
        Self::new(name, headers, rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| IngestError::MissingColumn {
                column: name.to_string(),
                table: self.name.clone(),
            })
    }

    /// Resolve several required columns at once, in the given order.
    pub fn require_columns<const N: usize>(&self, names: [&str; N]) -> Result<[usize; N]> {
        let mut indices = [0usize; N];
        for (slot, name) in indices.iter_mut().zip(names) {
            *slot = self.require_column(name)?;
        }
        Ok(indices)
    }

    /// Remove exact duplicate rows, keeping the first occurrence. Returns the
    /// number of rows removed.
    pub fn dedup_rows(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(before);
        self.rows.retain(|row| seen.insert(row.clone()));
        before - self.rows.len()
    }

    /// Drop every column that is empty in all rows. Returns the dropped
    /// column names.
    pub fn drop_empty_columns(&mut self) -> Vec<String> {
        let keep: Vec<bool> = (0..self.headers.len())
            .map(|idx| {
                self.rows
                    .iter()
                    .any(|row| row.get(idx).is_some_and(|value| !value.is_empty()))
            })
            .collect();
        if keep.iter().all(|kept| *kept) {
            return Vec::new();
        }

        let mut dropped = Vec::new();
        let headers = std::mem::take(&mut self.headers);
        for (header, kept) in headers.into_iter().zip(&keep) {
            if *kept {
                self.headers.push(header);
            } else {
                dropped.push(header);
            }
        }
        for row in &mut self.rows {
            let mut idx = 0;
            row.retain(|_| {
                let kept = keep.get(idx).copied().unwrap_or(true);
                idx += 1;
                kept
            });
        }
        dropped
    }
}

/// Value of an optional column in a row, empty when the column is absent.
pub fn cell(row: &[String], column: Option<usize>) -> &str {
    column
        .and_then(|idx| row.get(idx))
        .map_or("", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            "genre",
            ["film_id", "film_genre", "notes"],
            [
                ["F1", "COM", ""],
                ["F1", "DRA", ""],
                ["F1", "COM", ""],
                ["F2", "COM", ""],
            ],
        )
    }

    #[test]
    fn test_dedup_rows_keeps_first_occurrence() {
        let mut table = sample();
        assert_eq!(table.dedup_rows(), 1);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[1], vec!["F1", "DRA", ""]);
    }

    #[test]
    fn test_drop_empty_columns() {
        let mut table = sample();
        let dropped = table.drop_empty_columns();
        assert_eq!(dropped, vec!["notes".to_string()]);
        assert_eq!(table.headers(), ["film_id", "film_genre"]);
        assert!(table.rows().iter().all(|row| row.len() == 2));
    }

    #[test]
    fn test_require_columns() {
        let table = sample();
        assert_eq!(table.require_columns(["film_genre", "film_id"]).unwrap(), [1, 0]);

        let err = table.require_columns(["film_id", "tag_name"]).unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingColumn { ref column, ref table } if column == "tag_name" && table == "genre"
        ));
    }

    #[test]
    fn test_cell_for_missing_column_is_empty() {
        let table = sample();
        let row = &table.rows()[0];
        assert_eq!(cell(row, table.column_index("film_genre")), "COM");
        assert_eq!(cell(row, table.column_index("absent")), "");
    }
}
