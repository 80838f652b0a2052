use std::fs;
use std::path::PathBuf;

use beast_cli::config::BeastConfig;
use beast_core::ZeroPolicy;
use tempfile::TempDir;

#[test]
fn explicit_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("beast.toml");
    fs::write(
        &path,
        r#"
[sources]
data_dir = "raw"
codes_dir = "lookup"

[sources.tables.main]
file = "main-v5.csv"
delimiter = ","
header_skip = 0

[cleaning]
zeros = "keep"

[output]
output_dir = "out"
manifest = false
"#,
    )
    .unwrap();

    let config = BeastConfig::load(Some(&path)).unwrap();
    let pipeline = config.pipeline();

    assert_eq!(pipeline.sources.codes_dir(), PathBuf::from("lookup"));
    assert_eq!(pipeline.cleaning.zeros, ZeroPolicy::Keep);
    let main = pipeline.sources.table("main").unwrap();
    assert_eq!(main.file, "main-v5.csv");
    assert_eq!(main.delimiter, ',');
    assert_eq!(main.header_skip, 0);
    assert_eq!(config.output.output_dir, PathBuf::from("out"));
    assert!(!config.output.manifest);
    assert!(config.output.pretty);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let error = BeastConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(format!("{error:#}").contains("absent.toml"));
}

#[test]
fn malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("beast.toml");
    fs::write(&path, "[output\n").unwrap();
    assert!(BeastConfig::load(Some(&path)).is_err());
}
