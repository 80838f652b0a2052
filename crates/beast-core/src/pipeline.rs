//! End-to-end orchestration of one run.

use std::time::Instant;

use beast_codes::{CodeExpander, CodeField};
use beast_ingest::{SourceSet, load_sources};
use beast_model::{
    CleanDocument, Collections, Document, IssueKind, QualityIssue, QualityReport,
};
use beast_transform::{SourceTables, build_records};
use rayon::prelude::*;
use tracing::{debug, info, info_span};

use crate::aggregate::{AggregationMode, aggregate};
use crate::clean::{ZeroPolicy, clean_with};
use crate::config::PipelineConfig;
use crate::crossref::cross_reference;
use crate::documents::{FilmFold, PersonFold};
use crate::error::{PipelineError, Result};
use crate::slugs::assign_slugs;

/// Settings of the in-memory part of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusOptions {
    pub mode: AggregationMode,
    pub zeros: ZeroPolicy,
}

impl From<&PipelineConfig> for CorpusOptions {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            mode: config.aggregation.mode(),
            zeros: config.cleaning.zeros,
        }
    }
}

/// Cleaned collections and every data-quality finding of the build.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub collections: Collections,
    pub quality: QualityReport,
}

/// Everything a completed run produced.
#[derive(Debug)]
pub struct PipelineRun {
    pub collections: Collections,
    pub quality: QualityReport,
    pub sources: SourceSet,
}

/// Load, build, aggregate, cross-reference and clean.
///
/// Nothing is written here. Missing or empty source files, missing key
/// columns and missing code tables abort the run.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineRun> {
    let specs = config.sources.specs()?;

    let sources = info_span!("load").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let sources = load_sources(&specs)?;
        let codes_dir = config.sources.codes_dir();
        debug!(
            tables = sources.len(),
            codes_dir = %codes_dir.display(),
            duration_ms = start.elapsed().as_millis(),
            "source tables loaded"
        );
        Ok(sources)
    })?;

    let codes = CodeExpander::from_dir(config.sources.codes_dir());
    codes.warm(&CodeField::ALL)?;

    let tables = SourceTables::from_set(&sources)?;
    let mut quality = load_quality(&sources);
    let corpus = build_corpus(&tables, &codes, CorpusOptions::from(config))?;
    quality.merge(corpus.quality);

    info!(
        films = corpus.collections.films.len(),
        biographies = corpus.collections.biographies.len(),
        issues = quality.len(),
        "pipeline complete"
    );
    Ok(PipelineRun {
        collections: corpus.collections,
        quality,
        sources,
    })
}

/// Malformed rows counted while loading, one issue per table.
fn load_quality(sources: &SourceSet) -> QualityReport {
    let mut quality = QualityReport::default();
    for (name, report) in sources.reports() {
        if report.malformed_rows > 0 {
            quality.push(
                QualityIssue::new(IssueKind::MalformedRow, name, "row skipped: wrong field count")
                    .with_count(report.malformed_rows as u64),
            );
        }
    }
    quality
}

/// The in-memory transform from loaded tables to cleaned collections.
pub fn build_corpus(
    tables: &SourceTables<'_>,
    codes: &CodeExpander,
    options: CorpusOptions,
) -> Result<Corpus> {
    let built = info_span!("build").in_scope(|| build_records(tables, codes))?;
    let mut quality = built.quality;

    let (mut films, mut persons) = info_span!("aggregate").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let films = aggregate::<FilmFold>(built.films, options.mode)?;
        let persons = aggregate::<PersonFold>(built.persons, options.mode)?;
        quality.merge(films.quality);
        quality.merge(persons.quality);
        debug!(duration_ms = start.elapsed().as_millis(), "aggregation complete");
        Ok((films.documents, persons.documents))
    })?;
    quality.merge(assign_slugs(&mut films, &mut persons));

    let linked = info_span!("cross_reference").in_scope(|| cross_reference(films, persons));
    quality.merge(linked.quality);

    let collections = info_span!("clean").in_scope(|| -> Result<_> {
        let films: Vec<Document> = linked.films.into_iter().map(Document::Film).collect();
        let biographies: Vec<Document> =
            linked.persons.into_iter().map(Document::Biography).collect();
        Ok(Collections {
            films: clean_all(&films, options.zeros)?,
            biographies: clean_all(&biographies, options.zeros)?,
        })
    })?;

    Ok(Corpus {
        collections,
        quality,
    })
}

fn clean_all(documents: &[Document], zeros: ZeroPolicy) -> Result<Vec<CleanDocument>> {
    documents
        .par_iter()
        .map(|document| {
            let body = serde_json::to_value(document).map_err(|source| {
                PipelineError::Serialize {
                    slug: document.slug().to_string(),
                    source,
                }
            })?;
            Ok(CleanDocument {
                slug: document.slug().to_string(),
                body: clean_with(body, zeros),
            })
        })
        .collect()
}
