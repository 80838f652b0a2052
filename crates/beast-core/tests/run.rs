mod common;

use std::fs;
use std::path::Path;

use beast_codes::CodeError;
use beast_core::{PipelineConfig, PipelineError, run_pipeline};
use beast_ingest::IngestError;
use beast_model::IssueKind;
use tempfile::TempDir;

const PREFIX: &str = "Drop";

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn write_sources(dir: &Path) {
    write(
        dir,
        "The-Beast-2018-2023-main-v4.csv",
        "The Beast 2018-2023;;;\n\
         film_id;nat_title;release_date;director\n\
         F1;Film Un;01/03/2020;D1, D2\n\
         F2;Film Deux;2021;D2\n\
         F2;Film Deux;2021;D2\n",
    );
    write(dir, "Drop-genre.csv", "film_id,film_genre\nF1,COM\nF2,DRA\nF2,COM,extra\n");
    write(dir, "Drop-mrktg.csv", "film_id,trailer_url,poster_url\nF1,https://example.org/t,\n");
    write(dir, "Drop-nat.csv", "film_id,film_country,prod_share\nF1,FR,MAJ\nF2,IT,MAJ\n");
    write(dir, "Drop-themes_plots_tags.csv", "film_id,tag_name\nF2,noir\n");
    write(
        dir,
        "Drop-character_tags.csv",
        "film_id,character_id,person_id,ch_age\nF1,C1,D1,3\nF2,C1,D2,7\n",
    );
    write(dir, "Drop-role.csv", "film_id,person_name,role_class\nF1,D1,LEAD\n");
    write(
        dir,
        "Drop-biog.csv",
        "person_name,birth_year,death_year,gender\nD1,1970,,F\nD2,1955.0,2020.0,M\n",
    );
    write(dir, "Drop-biognat.csv", "person_name,person_nat\nD1,FR\nD2,IT\n");
}

fn config(data_dir: &Path) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.sources.data_dir = data_dir.to_path_buf();
    config.sources.file_prefix = PREFIX.to_string();
    config
}

#[test]
fn runs_from_files_on_disk() {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path());
    common::write_code_tables(&dir.path().join("codes"));

    let run = run_pipeline(&config(dir.path())).unwrap();

    assert_eq!(run.collections.films.len(), 2);
    assert_eq!(run.collections.biographies.len(), 2);
    assert_eq!(run.sources.len(), 9);

    let f2 = &run.collections.films[1].body;
    assert_eq!(f2["slug"], "f2-film-deux");
    assert_eq!(f2["release"]["year"], 2021);
    assert_eq!(f2["character"][0]["age"], "5: Elderly");

    let d2 = &run.collections.biographies[1].body;
    assert_eq!(d2["birthYear"], 1955);
    assert_eq!(d2["deathYear"], 2020);
    assert_eq!(d2["director"].as_array().unwrap().len(), 2);
    assert_eq!(d2["characters"][0]["film"]["id"], "F2");

    assert_eq!(run.quality.count(IssueKind::MalformedRow), 1);
}

#[test]
fn missing_source_file_aborts() {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path());
    common::write_code_tables(&dir.path().join("codes"));
    fs::remove_file(dir.path().join("Drop-role.csv")).unwrap();

    let result = run_pipeline(&config(dir.path()));
    assert!(matches!(
        result,
        Err(PipelineError::Ingest(IngestError::FileNotFound { ref path })) if path.ends_with("Drop-role.csv")
    ));
}

#[test]
fn empty_source_file_aborts() {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path());
    common::write_code_tables(&dir.path().join("codes"));
    write(dir.path(), "Drop-themes_plots_tags.csv", "film_id,tag_name\n");

    let result = run_pipeline(&config(dir.path()));
    assert!(matches!(
        result,
        Err(PipelineError::Ingest(IngestError::EmptyCsv { .. }))
    ));
}

#[test]
fn missing_code_table_aborts() {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path());
    common::write_code_tables(&dir.path().join("codes"));
    fs::remove_file(dir.path().join("codes").join("sexuality.csv")).unwrap();

    let result = run_pipeline(&config(dir.path()));
    assert!(matches!(
        result,
        Err(PipelineError::Codes(CodeError::TableNotFound { .. }))
    ));
}
