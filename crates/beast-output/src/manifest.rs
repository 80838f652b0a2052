//! Run manifest: which inputs produced which outputs.
//!
//! The manifest holds no timestamps, so two runs over the same inputs write
//! byte-identical manifests.

use std::path::{Path, PathBuf};

use beast_ingest::file_sha256;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A source table the collections were built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub path: PathBuf,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl From<(&str, &PathBuf)> for SourceFile {
    fn from((name, path): (&str, &PathBuf)) -> Self {
        Self::new(name, path.clone())
    }
}

/// A file written by the run, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenFile {
    pub path: String,
    pub sha256: String,
    pub bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub name: String,
    pub path: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionCounts {
    pub films: usize,
    pub biographies: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub sources: Vec<SourceEntry>,
    pub collections: CollectionCounts,
    pub files: Vec<WrittenFile>,
}

impl Manifest {
    /// Hash every source file. Entries are sorted by table name, files by
    /// path.
    pub fn build(
        sources: &[SourceFile],
        collections: CollectionCounts,
        files: &[WrittenFile],
    ) -> Result<Self> {
        let mut entries = sources
            .iter()
            .map(|source| {
                Ok(SourceEntry {
                    name: source.name.clone(),
                    path: display_path(&source.path),
                    sha256: file_sha256(&source.path)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let mut files = files.to_vec();
        files.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(Self {
            sources: entries,
            collections,
            files,
        })
    }
}

/// Forward-slash form of a path, stable across platforms.
pub(crate) fn display_path(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn sources_are_hashed_and_sorted() {
        let dir = tempdir().unwrap();
        let tags = dir.path().join("tags.csv");
        let genre = dir.path().join("genre.csv");
        fs::write(&tags, "").unwrap();
        fs::write(&genre, "film_id,film_genre\n").unwrap();

        let manifest = Manifest::build(
            &[SourceFile::new("tags", &tags), SourceFile::new("genre", &genre)],
            CollectionCounts {
                films: 0,
                biographies: 0,
            },
            &[],
        )
        .unwrap();

        let names: Vec<_> = manifest.sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["genre", "tags"]);
        assert_eq!(
            manifest.sources[1].sha256,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn missing_source_fails() {
        let dir = tempdir().unwrap();
        let result = Manifest::build(
            &[SourceFile::new("main", dir.path().join("absent.csv"))],
            CollectionCounts {
                films: 0,
                biographies: 0,
            },
            &[],
        );
        assert!(result.is_err());
    }

    #[test]
    fn paths_use_forward_slashes() {
        let path = Path::new("final").join("films").join("f1.json");
        assert_eq!(display_path(&path), "final/films/f1.json");
    }
}
