//! Data-quality findings.
//!
//! None of these abort a run. They are logged as they are found and collected
//! here so the caller can report them once the run completes.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A source row had the wrong number of fields, or an empty key.
    MalformedRow,
    /// A character references a person with no biography row.
    MissingBiography,
    /// A relation id did not resolve to a document.
    DanglingReference,
    /// Rows of one group disagreed on a first-wins field.
    AmbiguousGroup,
    /// Two documents derived the same slug.
    SlugCollision,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedRow => "malformed_row",
            Self::MissingBiography => "missing_biography",
            Self::DanglingReference => "dangling_reference",
            Self::AmbiguousGroup => "ambiguous_group",
            Self::SlugCollision => "slug_collision",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityIssue {
    pub kind: IssueKind,
    /// What the issue is about: a table name, a document id, a slug.
    pub subject: String,
    pub message: String,
    /// Number of occurrences folded into this issue.
    pub count: u64,
}

impl QualityIssue {
    pub fn new(kind: IssueKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: message.into(),
            count: 1,
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    pub issues: Vec<QualityIssue>,
}

impl QualityReport {
    pub fn push(&mut self, issue: QualityIssue) {
        self.issues.push(issue);
    }

    pub fn merge(&mut self, other: Self) {
        self.issues.extend(other.issues);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Total occurrences of one kind.
    pub fn count(&self, kind: IssueKind) -> u64 {
        self.issues
            .iter()
            .filter(|issue| issue.kind == kind)
            .map(|issue| issue.count)
            .sum()
    }

    pub fn of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &QualityIssue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_fold_occurrences() {
        let mut report = QualityReport::default();
        report.push(
            QualityIssue::new(IssueKind::MalformedRow, "genre", "wrong field count").with_count(3),
        );
        report.push(QualityIssue::new(
            IssueKind::DanglingReference,
            "F1",
            "director D9",
        ));
        assert_eq!(report.count(IssueKind::MalformedRow), 3);
        assert_eq!(report.count(IssueKind::DanglingReference), 1);
        assert_eq!(report.count(IssueKind::SlugCollision), 0);
        assert_eq!(report.len(), 2);
    }
}
