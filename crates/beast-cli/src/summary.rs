//! Terminal tables printed after a command.

use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use beast_codes::CodeTable;
use beast_model::{Collections, QualityReport};
use beast_output::WrittenOutputs;

/// What a `run` produced, for printing.
#[derive(Debug)]
pub struct RunSummary<'a> {
    pub collections: &'a Collections,
    pub quality: &'a QualityReport,
    pub written: Option<&'a WrittenOutputs>,
    pub output_dir: &'a Path,
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: u64, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).add_attribute(Attribute::Dim)
    }
}

/// Document counts per collection, with the file each was written to.
pub fn collections_table(summary: &RunSummary<'_>) -> Table {
    let written = |name: &str| {
        let path = format!("final/{name}.json");
        let written = summary
            .written
            .is_some_and(|written| written.files.iter().any(|file| file.path == path));
        if written { path } else { "-".to_string() }
    };

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Collection"),
        header_cell("Documents"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("films"),
        Cell::new(summary.collections.films.len()),
        Cell::new(written("films")),
    ]);
    table.add_row(vec![
        Cell::new("biographies"),
        Cell::new(summary.collections.biographies.len()),
        Cell::new(written("biographies")),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(summary.collections.len()).add_attribute(Attribute::Bold),
        Cell::new(written("corpus")),
    ]);
    table
}

/// Data-quality findings grouped by kind. `None` when the run was
/// clean.
pub fn quality_table(quality: &QualityReport) -> Option<Table> {
    if quality.is_empty() {
        return None;
    }
    let mut issues: Vec<_> = quality.issues.iter().collect();
    issues.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.subject.cmp(&b.subject)));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Subject"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for issue in issues {
        table.add_row(vec![
            Cell::new(issue.kind.as_str()).fg(Color::Yellow),
            Cell::new(&issue.subject),
            count_cell(issue.count, Color::Yellow),
            Cell::new(&issue.message),
        ]);
    }
    Some(table)
}

pub fn code_table(table: &CodeTable) -> Table {
    let mut rendered = Table::new();
    rendered.set_header(vec![header_cell("Code"), header_cell("Description")]);
    apply_table_style(&mut rendered);
    for (code, description) in table.entries() {
        rendered.add_row(vec![code, description]);
    }
    rendered
}

pub fn print_run_summary(summary: &RunSummary<'_>) {
    match summary.written {
        Some(written) => println!(
            "Output: {} ({} files, {} bytes)",
            summary.output_dir.display(),
            written.files.len(),
            written.total_bytes()
        ),
        None => println!("Dry run: nothing written"),
    }
    println!("{}", collections_table(summary));
    if let Some(table) = quality_table(summary.quality) {
        println!();
        println!("Data quality ({} findings):", summary.quality.len());
        println!("{table}");
    }
}
