//! Writing both collections to disk.

use std::path::{Path, PathBuf};
use std::time::Instant;

use beast_ingest::sha256_hex;
use beast_model::{CleanDocument, Collections};
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info, info_span};

use crate::atomic::write_atomic;
use crate::config::OutputConfig;
use crate::error::{OutputError, Result};
use crate::interim::render_csv;
use crate::manifest::{CollectionCounts, Manifest, SourceFile, WrittenFile, display_path};

pub const FILMS: &str = "films";
pub const BIOGRAPHIES: &str = "biographies";
pub const CORPUS: &str = "corpus";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Everything one call to [`write_outputs`] put on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub files: Vec<WrittenFile>,
    pub manifest: Option<PathBuf>,
}

impl WrittenOutputs {
    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(|file| file.bytes).sum()
    }
}

/// A slug is used verbatim as a file stem, so it must name exactly one file
/// inside its directory.
pub fn validate_slug(slug: &str) -> Result<()> {
    let invalid = slug.is_empty()
        || slug == "."
        || slug == ".."
        || slug.contains(['/', '\\'])
        || slug.chars().any(char::is_control);
    if invalid {
        return Err(OutputError::InvalidSlug {
            slug: slug.to_string(),
        });
    }
    Ok(())
}

struct Writer<'a> {
    config: &'a OutputConfig,
}

impl Writer<'_> {
    fn json(&self, name: &str, value: &impl serde::Serialize) -> Result<Vec<u8>> {
        let to_json_error = |source| OutputError::Json {
            name: name.to_string(),
            source,
        };
        if self.config.pretty {
            let mut bytes = serde_json::to_vec_pretty(value).map_err(to_json_error)?;
            bytes.push(b'\n');
            Ok(bytes)
        } else {
            serde_json::to_vec(value).map_err(to_json_error)
        }
    }

    fn put(&self, path: &Path, bytes: &[u8]) -> Result<WrittenFile> {
        write_atomic(path, bytes)?;
        let relative = path.strip_prefix(&self.config.output_dir).unwrap_or(path);
        Ok(WrittenFile {
            path: display_path(relative),
            sha256: sha256_hex(bytes),
            bytes: bytes.len(),
        })
    }

    fn collection(&self, name: &str, documents: &[&CleanDocument]) -> Result<WrittenFile> {
        let bodies: Vec<&Value> = documents.iter().map(|document| &document.body).collect();
        let bytes = self.json(name, &bodies)?;
        self.put(&self.config.final_dir().join(format!("{name}.json")), &bytes)
    }

    fn individual(&self, name: &str, documents: &[CleanDocument]) -> Result<Vec<WrittenFile>> {
        let dir = self.config.final_dir().join(name);
        documents
            .par_iter()
            .map(|document| {
                let bytes = self.json(&document.slug, &document.body)?;
                self.put(&dir.join(format!("{}.json", document.slug)), &bytes)
            })
            .collect()
    }

    fn interim(&self, name: &str, documents: &[CleanDocument]) -> Result<WrittenFile> {
        let bytes = render_csv(name, documents)?;
        self.put(&self.config.interim_dir().join(format!("{name}.csv")), &bytes)
    }
}

/// Persist `collections` under `config.output_dir`:
///
/// - `final/films.json`, `final/biographies.json` and `final/corpus.json`
/// - `final/films/<slug>.json` and `final/biographies/<slug>.json`
/// - `interim/<collection>.csv`
/// - `final/manifest.json`, written last
///
/// Every file is written atomically. Slugs are checked before anything is
/// written.
pub fn write_outputs(
    collections: &Collections,
    sources: &[SourceFile],
    config: &OutputConfig,
) -> Result<WrittenOutputs> {
    info_span!("write", output_dir = %config.output_dir.display()).in_scope(|| -> Result<_> {
        let start = Instant::now();
        for document in collections.corpus() {
            validate_slug(&document.slug)?;
        }

        let writer = Writer { config };
        let films: Vec<&CleanDocument> = collections.films.iter().collect();
        let biographies: Vec<&CleanDocument> = collections.biographies.iter().collect();
        let corpus: Vec<&CleanDocument> = collections.corpus().collect();

        let mut files = vec![
            writer.collection(FILMS, &films)?,
            writer.collection(BIOGRAPHIES, &biographies)?,
            writer.collection(CORPUS, &corpus)?,
        ];

        if config.individual {
            files.extend(writer.individual(FILMS, &collections.films)?);
            files.extend(writer.individual(BIOGRAPHIES, &collections.biographies)?);
        }

        if config.interim_csv {
            files.push(writer.interim(FILMS, &collections.films)?);
            files.push(writer.interim(BIOGRAPHIES, &collections.biographies)?);
            let corpus: Vec<CleanDocument> = collections.corpus().cloned().collect();
            files.push(writer.interim(CORPUS, &corpus)?);
        }

        let manifest = if config.manifest {
            let counts = CollectionCounts {
                films: collections.films.len(),
                biographies: collections.biographies.len(),
            };
            let manifest = Manifest::build(sources, counts, &files)?;
            let path = config.final_dir().join(MANIFEST_FILE);
            write_atomic(&path, &writer.json(MANIFEST_FILE, &manifest)?)?;
            Some(path)
        } else {
            None
        };

        let written = WrittenOutputs { files, manifest };
        debug!(
            duration_ms = start.elapsed().as_millis(),
            "write complete"
        );
        info!(
            files = written.files.len(),
            bytes = written.total_bytes(),
            "outputs written"
        );
        Ok(written)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_slugs_that_escape_their_directory() {
        for slug in ["", ".", "..", "a/b", "a\\b", "a\nb"] {
            assert!(
                matches!(validate_slug(slug), Err(OutputError::InvalidSlug { .. })),
                "{slug:?} should be rejected"
            );
        }
        validate_slug("la-haine-1995").unwrap();
        validate_slug("d1-2").unwrap();
    }
}
