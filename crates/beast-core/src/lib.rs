//! The aggregation engine.
//!
//! Flat records from the entity builders are grouped into film and person
//! documents ([`aggregate`]), given unique slugs ([`slugs`]), linked to each
//! other through embedded summaries ([`crossref`]) and stripped of empty
//! values ([`clean`]). [`pipeline::run_pipeline`] runs the whole sequence
//! from source files; [`pipeline::build_corpus`] runs it from tables already
//! in memory.

pub mod aggregate;
pub mod clean;
pub mod config;
pub mod crossref;
pub mod documents;
pub mod error;
pub mod pipeline;
pub mod slugs;

pub use aggregate::{AggregationMode, Aggregated, Fold, aggregate};
pub use clean::{ZeroPolicy, clean, clean_with};
pub use config::{PipelineConfig, SourcesConfig};
pub use crossref::{CrossReferenced, cross_reference};
pub use error::{PipelineError, Result};
pub use pipeline::{Corpus, CorpusOptions, PipelineRun, build_corpus, run_pipeline};
