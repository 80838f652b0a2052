//! Grouping flat records into documents.
//!
//! Records are grouped by natural id in a single pass, after every join has
//! produced its records. Each document type describes how its fields fold
//! through [`Fold`], built from three field folds:
//!
//! - [`First`] keeps the first value and counts disagreeing ones.
//! - [`ValueSet`] keeps distinct values, compared by canonical JSON.
//! - [`Nested`] keeps one embedded object per natural id, first wins.

use std::collections::BTreeMap;
use std::fmt;

use beast_model::{Identified, IssueKind, QualityIssue, QualityReport};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// What happens when rows of one group disagree on a first-wins field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    /// Keep the first value and record an [`IssueKind::AmbiguousGroup`].
    #[default]
    Lenient,
    /// Fail the run.
    Strict,
}

/// First-wins field.
#[derive(Debug, Clone)]
pub struct First<T> {
    value: Option<T>,
    conflicts: usize,
}

impl<T> Default for First<T> {
    fn default() -> Self {
        Self {
            value: None,
            conflicts: 0,
        }
    }
}

impl<T: PartialEq> First<T> {
    pub fn offer(&mut self, value: T) {
        match &self.value {
            None => self.value = Some(value),
            Some(kept) if *kept != value => self.conflicts += 1,
            Some(_) => {}
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Offered values that differed from the kept one.
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    pub fn into_inner(self) -> Option<T> {
        self.value
    }
}

/// Set of flat values, deduplicated and ordered by their JSON form.
#[derive(Debug, Clone)]
pub struct ValueSet<T> {
    values: BTreeMap<String, T>,
}

impl<T> Default for ValueSet<T> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<T: Serialize> ValueSet<T> {
    pub fn insert(&mut self, value: T) {
        match serde_json::to_string(&value) {
            Ok(canonical) => {
                self.values.entry(canonical).or_insert(value);
            }
            Err(error) => tracing::warn!(%error, "dropping value with no JSON form"),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values.into_values().collect()
    }
}

/// Embedded objects, one per natural id.
#[derive(Debug, Clone)]
pub struct Nested<T: Identified> {
    items: BTreeMap<T::Id, T>,
    conflicts: usize,
}

impl<T: Identified> Default for Nested<T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            conflicts: 0,
        }
    }
}

impl<T: Identified + PartialEq> Nested<T> {
    /// Identical repeats collapse silently; a different object under a known
    /// id is dropped and counted.
    pub fn insert(&mut self, item: T) {
        match self.items.get(&item.id()) {
            None => {
                self.items.insert(item.id(), item);
            }
            Some(kept) if *kept != item => self.conflicts += 1,
            Some(_) => {}
        }
    }

    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in ascending id order.
    pub fn into_vec(self) -> Vec<T> {
        self.items.into_values().collect()
    }
}

/// How the records of one document fold into it.
pub trait Fold: Default {
    type Record;
    type Key: Clone + Ord + fmt::Display;
    type Output;

    /// Collection name used in diagnostics.
    const COLLECTION: &'static str;

    fn key(record: &Self::Record) -> &Self::Key;

    fn absorb(&mut self, record: Self::Record);

    /// Disagreement count per first-wins field. Zero counts are ignored.
    fn conflicts(&self) -> Vec<(&'static str, usize)>;

    /// The finished document, `None` when the group never saw its head row.
    fn finish(self, key: Self::Key) -> Option<Self::Output>;
}

/// Documents of one collection, in ascending id order.
#[derive(Debug, Clone)]
pub struct Aggregated<T> {
    pub documents: Vec<T>,
    pub quality: QualityReport,
}

/// Group `records` by id and fold each group into a document.
pub fn aggregate<F: Fold>(
    records: impl IntoIterator<Item = F::Record>,
    mode: AggregationMode,
) -> Result<Aggregated<F::Output>> {
    let mut groups: BTreeMap<F::Key, F> = BTreeMap::new();
    let mut record_count = 0usize;
    for record in records {
        record_count += 1;
        groups
            .entry(F::key(&record).clone())
            .or_default()
            .absorb(record);
    }

    let mut quality = QualityReport::default();
    let mut documents = Vec::with_capacity(groups.len());
    for (key, fold) in groups {
        for (field, conflicts) in fold.conflicts() {
            if conflicts == 0 {
                continue;
            }
            if mode == AggregationMode::Strict {
                return Err(PipelineError::AmbiguousGroup {
                    collection: F::COLLECTION,
                    id: key.to_string(),
                    field,
                    conflicts,
                });
            }
            tracing::warn!(
                collection = F::COLLECTION,
                id = %key,
                field,
                conflicts,
                "rows disagree on a first-wins field, keeping the first"
            );
            quality.push(
                QualityIssue::new(
                    IssueKind::AmbiguousGroup,
                    key.to_string(),
                    format!("{field}: disagreeing rows ignored"),
                )
                .with_count(conflicts as u64),
            );
        }
        let id = key.to_string();
        match fold.finish(key) {
            Some(document) => documents.push(document),
            None => tracing::warn!(collection = F::COLLECTION, %id, "group has no head row, skipped"),
        }
    }

    tracing::info!(
        collection = F::COLLECTION,
        records = record_count,
        documents = documents.len(),
        "aggregated"
    );
    Ok(Aggregated { documents, quality })
}
