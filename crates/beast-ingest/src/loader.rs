//! Delimited file loading.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::ReaderBuilder;
use serde::Serialize;

use crate::error::{IngestError, Result};
use crate::table::Table;

/// How a source file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Lines to discard before the header line.
    pub header_skip: usize,
    /// Drop columns that are empty in every row.
    pub drop_empty_columns: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            header_skip: 0,
            drop_empty_columns: true,
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_header_skip(mut self, lines: usize) -> Self {
        self.header_skip = lines;
        self
    }

    #[must_use]
    pub fn with_drop_empty_columns(mut self, enable: bool) -> Self {
        self.drop_empty_columns = enable;
        self
    }
}

/// What happened while loading one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Well-formed data rows parsed, before deduplication.
    pub rows_read: usize,
    /// Rows skipped because their field count did not match the header.
    pub malformed_rows: usize,
    /// Exact duplicate rows removed.
    pub duplicate_rows: usize,
    /// Columns dropped because every row was empty.
    pub dropped_columns: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: Table,
    pub report: LoadReport,
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Discard `lines` raw lines from the reader.
fn skip_lines(reader: &mut impl BufRead, lines: usize, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    for _ in 0..lines {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(|e| IngestError::io(path, e))?;
        if read == 0 {
            break;
        }
    }
    Ok(())
}

/// Load a delimited source file into a [`Table`].
///
/// Missing files and files without data rows are errors. Rows with the wrong
/// number of fields are skipped and counted, exact duplicate rows are removed,
/// and all-empty columns are dropped when the options ask for it.
pub fn load_table(name: &str, path: &Path, options: &LoadOptions) -> Result<LoadedTable> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let mut reader = BufReader::new(file);
    skip_lines(&mut reader, options.header_skip, path)?;

    let mut csv_reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| IngestError::CsvHeader {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut report = LoadReport::default();
    let mut rows = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                tracing::debug!(table = name, line, %error, "skipping unreadable row");
                report.malformed_rows += 1;
                continue;
            }
        };
        if record.len() != headers.len() {
            tracing::debug!(
                table = name,
                line,
                fields = record.len(),
                expected = headers.len(),
                "skipping row with wrong field count"
            );
            report.malformed_rows += 1;
            continue;
        }
        rows.push(record.iter().map(normalize_cell).collect::<Vec<_>>());
    }
    report.rows_read = rows.len();

    if rows.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut table = Table::new(name, headers, rows);
    report.duplicate_rows = table.dedup_rows();
    if options.drop_empty_columns {
        report.dropped_columns = table.drop_empty_columns();
    }

    let file_name = path
        .file_name()
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_default();
    if report.malformed_rows > 0 {
        tracing::warn!(
            table = name,
            malformed = report.malformed_rows,
            "{file_name}: skipped malformed rows"
        );
    }
    tracing::info!(
        table = name,
        rows = table.len(),
        duplicates = report.duplicate_rows,
        dropped_columns = report.dropped_columns.len(),
        "{file_name} loaded with {} rows",
        table.len()
    );

    Ok(LoadedTable { table, report })
}
