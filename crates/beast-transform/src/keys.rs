use beast_ingest::Table;
use beast_model::{IssueKind, QualityIssue, QualityReport};

/// Record rows skipped because a key column was blank.
pub(crate) fn report_blank_keys(quality: &mut QualityReport, table: &Table, skipped: u64) {
    if skipped == 0 {
        return;
    }
    tracing::warn!(table = table.name(), skipped, "skipped rows with a blank key");
    quality.push(
        QualityIssue::new(
            IssueKind::MalformedRow,
            table.name(),
            "row skipped: blank key column",
        )
        .with_count(skipped),
    );
}

/// Cell of a required column; rows shorter than the header read as empty.
pub(crate) fn at(row: &[String], idx: usize) -> &str {
    row.get(idx).map_or("", String::as_str)
}
