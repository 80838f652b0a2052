use std::fs;
use std::path::Path;

use beast_model::{CleanDocument, Collections};
use beast_output::{Manifest, OutputConfig, OutputError, SourceFile, write_outputs};
use serde_json::{Value, json};
use tempfile::TempDir;

fn document(slug: &str, body: Value) -> CleanDocument {
    CleanDocument {
        slug: slug.to_string(),
        body,
    }
}

fn collections() -> Collections {
    Collections {
        films: vec![document(
            "f1-la-haine",
            json!({"id": "F1", "slug": "f1-la-haine", "type": "Film", "genre": ["Drama"]}),
        )],
        biographies: vec![document(
            "d1",
            json!({"id": "D1", "slug": "d1", "type": "Biography", "name": "Mathieu K"}),
        )],
    }
}

fn config(dir: &Path) -> OutputConfig {
    OutputConfig {
        output_dir: dir.to_path_buf(),
        ..OutputConfig::default()
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

fn tmp_files(dir: &Path) -> Vec<String> {
    let mut found = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in fs::read_dir(current).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().is_some_and(|ext| ext == "tmp") {
                found.push(path.display().to_string());
            }
        }
    }
    found
}

#[test]
fn writes_the_full_layout() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("main.csv");
    fs::write(&source, "film_id;nat_title\nF1;La Haine\n").unwrap();

    let written = write_outputs(
        &collections(),
        &[SourceFile::new("main", &source)],
        &config(dir.path()),
    )
    .unwrap();

    let final_dir = dir.path().join("final");
    assert_eq!(read_json(&final_dir.join("films.json"))[0]["id"], "F1");
    assert_eq!(read_json(&final_dir.join("biographies.json"))[0]["id"], "D1");
    let corpus = read_json(&final_dir.join("corpus.json"));
    assert_eq!(corpus.as_array().unwrap().len(), 2);
    assert_eq!(corpus[0]["type"], "Film");
    assert_eq!(corpus[1]["type"], "Biography");

    assert_eq!(
        read_json(&final_dir.join("films").join("f1-la-haine.json"))["slug"],
        "f1-la-haine"
    );
    assert!(final_dir.join("biographies").join("d1.json").is_file());

    let interim = dir.path().join("interim");
    let films_csv = fs::read_to_string(interim.join("films.csv")).unwrap();
    assert!(films_csv.starts_with("genre,id,slug,type\n"));
    let corpus_csv = fs::read_to_string(interim.join("corpus.csv")).unwrap();
    assert!(corpus_csv.starts_with("genre,id,name,slug,type\n"));

    assert_eq!(written.files.len(), 8);
    assert_eq!(written.manifest, Some(final_dir.join("manifest.json")));
    assert!(tmp_files(dir.path()).is_empty());
}

#[test]
fn manifest_hashes_sources_and_outputs() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("tags.csv");
    fs::write(&source, "").unwrap();

    write_outputs(
        &collections(),
        &[SourceFile::new("tags", &source)],
        &config(dir.path()),
    )
    .unwrap();

    let manifest_path = dir.path().join("final").join("manifest.json");
    let manifest: Manifest = serde_json::from_slice(&fs::read(&manifest_path).unwrap()).unwrap();
    assert_eq!(manifest.collections.films, 1);
    assert_eq!(manifest.collections.biographies, 1);
    assert_eq!(
        manifest.sources[0].sha256,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );

    let films = manifest
        .files
        .iter()
        .find(|file| file.path == "final/films.json")
        .unwrap();
    let bytes = fs::read(dir.path().join("final").join("films.json")).unwrap();
    assert_eq!(films.bytes, bytes.len());
    assert_eq!(films.sha256, beast_ingest::sha256_hex(&bytes));
}

#[test]
fn rerunning_produces_identical_files() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());

    write_outputs(&collections(), &[], &config).unwrap();
    let first = fs::read(dir.path().join("final").join("manifest.json")).unwrap();
    write_outputs(&collections(), &[], &config).unwrap();
    let second = fs::read(dir.path().join("final").join("manifest.json")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn optional_outputs_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let config = OutputConfig {
        individual: false,
        interim_csv: false,
        manifest: false,
        pretty: false,
        ..config(dir.path())
    };

    let written = write_outputs(&collections(), &[], &config).unwrap();

    assert_eq!(written.files.len(), 3);
    assert_eq!(written.manifest, None);
    assert!(!dir.path().join("interim").exists());
    assert!(!dir.path().join("final").join("films").exists());
    let films = fs::read_to_string(dir.path().join("final").join("films.json")).unwrap();
    assert!(!films.contains('\n'));
}

#[test]
fn invalid_slug_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut collections = collections();
    collections.biographies.push(document("../escape", json!({"id": "D9"})));

    let result = write_outputs(&collections, &[], &config(dir.path()));

    assert!(matches!(result, Err(OutputError::InvalidSlug { ref slug }) if slug == "../escape"));
    assert!(!dir.path().join("final").exists());
}
