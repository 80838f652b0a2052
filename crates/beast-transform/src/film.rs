//! Film builder: the main table plus the film-keyed relation tables.

use std::collections::HashSet;

use beast_codes::{CodeExpander, CodeField};
use beast_ingest::{Table, cell};
use beast_model::{
    FilmId, IssueKind, Localized, Media, PersonKey, Production, QualityIssue, QualityReport,
    Release,
};

use crate::datetime::{parse_release_date, release_year};
use crate::error::Result;
use crate::keys::{at, report_blank_keys};
use crate::record::{FilmField, FilmHead, FilmRecord};
use crate::slug::slugify;

const FILM_ID: &str = "film_id";
const NAT_TITLE: &str = "nat_title";

/// One main-table row: the film head and its directors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainRow {
    pub film: FilmId,
    pub head: FilmHead,
    pub directors: Vec<PersonKey>,
}

/// Split the multi-valued director column. Blank names are ignored.
pub fn split_directors(raw: &str) -> Vec<PersonKey> {
    raw.split(',')
        .filter_map(|name| PersonKey::new(name).ok())
        .collect()
}

pub fn parse_main(
    table: &Table,
    codes: &CodeExpander,
    quality: &mut QualityReport,
) -> Result<Vec<MainRow>> {
    let [film_idx, title_idx] = table.require_columns([FILM_ID, NAT_TITLE])?;
    let english_idx = table.column_index("eng_title");
    let date_idx = table.column_index("release_date");
    let release_type_idx = table.column_index("release_type");
    let film_type_idx = table.column_index("film_type");
    let director_idx = table.column_index("director");

    let mut films = Vec::with_capacity(table.len());
    let mut blank = 0u64;
    for row in table.rows() {
        let Ok(film) = FilmId::new(at(row, film_idx)) else {
            blank += 1;
            continue;
        };
        let native = at(row, title_idx).trim();
        let date = parse_release_date(cell(row, date_idx));
        let head = FilmHead {
            slug: slugify(&format!("{film}-{native}")),
            title: Localized {
                native: native.to_string(),
                english: cell(row, english_idx).trim().to_string(),
            },
            film_type: codes.expand(CodeField::FilmType, cell(row, film_type_idx)),
            release: Release {
                kind: codes.expand(CodeField::ReleaseType, cell(row, release_type_idx)),
                date,
                year: release_year(date),
            },
        };
        films.push(MainRow {
            directors: split_directors(cell(row, director_idx)),
            film,
            head,
        });
    }
    report_blank_keys(quality, table, blank);
    Ok(films)
}

/// Rows of a film-keyed relation whose film is an anchor. Rows for unknown
/// films are dropped and reported as dangling; blank film ids as malformed.
fn anchored_rows<'t>(
    table: &'t Table,
    anchors: &HashSet<FilmId>,
    quality: &mut QualityReport,
) -> Result<Vec<(FilmId, &'t [String])>> {
    let film_idx = table.require_column(FILM_ID)?;
    let mut rows = Vec::with_capacity(table.len());
    let mut blank = 0u64;
    let mut orphaned = 0u64;
    for row in table.rows() {
        let Ok(film) = FilmId::new(at(row, film_idx)) else {
            blank += 1;
            continue;
        };
        if anchors.contains(&film) {
            rows.push((film, row.as_slice()));
        } else {
            orphaned += 1;
        }
    }
    report_blank_keys(quality, table, blank);
    if orphaned > 0 {
        tracing::warn!(table = table.name(), orphaned, "dropped rows for unknown films");
        quality.push(
            QualityIssue::new(
                IssueKind::DanglingReference,
                table.name(),
                "rows for films missing from the main table dropped",
            )
            .with_count(orphaned),
        );
    }
    Ok(rows)
}

pub fn genre_records(
    table: &Table,
    codes: &CodeExpander,
    anchors: &HashSet<FilmId>,
    quality: &mut QualityReport,
) -> Result<Vec<FilmRecord>> {
    let genre_idx = table.require_column("film_genre")?;
    Ok(anchored_rows(table, anchors, quality)?
        .into_iter()
        .map(|(film, row)| {
            let genre = codes.expand(CodeField::Genre, at(row, genre_idx));
            FilmRecord::new(film, FilmField::Genre(genre))
        })
        .collect())
}

/// Media and synopsis records from the marketing table. Every column but the
/// film id is optional.
pub fn marketing_records(
    table: &Table,
    anchors: &HashSet<FilmId>,
    quality: &mut QualityReport,
) -> Result<Vec<FilmRecord>> {
    let trailer_idx = table.column_index("trailer_url");
    let poster_idx = table.column_index("poster_url");
    let native_idx = table.column_index("nat_synopsis");
    let english_idx = table.column_index("eng_synopsis");

    let mut records = Vec::new();
    for (film, row) in anchored_rows(table, anchors, quality)? {
        let media = Media {
            trailer_url: cell(row, trailer_idx).to_string(),
            poster_url: cell(row, poster_idx).to_string(),
        };
        let synopsis = Localized {
            native: cell(row, native_idx).to_string(),
            english: cell(row, english_idx).to_string(),
        };
        records.push(FilmRecord::new(film.clone(), FilmField::Media(media)));
        records.push(FilmRecord::new(film, FilmField::Synopsis(synopsis)));
    }
    Ok(records)
}

pub fn production_records(
    table: &Table,
    codes: &CodeExpander,
    anchors: &HashSet<FilmId>,
    quality: &mut QualityReport,
) -> Result<Vec<FilmRecord>> {
    let country_idx = table.require_column("film_country")?;
    let share_idx = table.column_index("prod_share");
    Ok(anchored_rows(table, anchors, quality)?
        .into_iter()
        .map(|(film, row)| {
            let production = Production {
                country: codes.expand(CodeField::Country, at(row, country_idx)),
                share: codes.expand(CodeField::ProductionShare, cell(row, share_idx)),
            };
            FilmRecord::new(film, FilmField::Production(production))
        })
        .collect())
}

pub fn tag_records(
    table: &Table,
    anchors: &HashSet<FilmId>,
    quality: &mut QualityReport,
) -> Result<Vec<FilmRecord>> {
    let tag_idx = table.require_column("tag_name")?;
    Ok(anchored_rows(table, anchors, quality)?
        .into_iter()
        .filter_map(|(film, row)| {
            let tag = at(row, tag_idx).trim();
            (!tag.is_empty()).then(|| FilmRecord::new(film, FilmField::Tag(tag.to_string())))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directors_split_on_commas() {
        let names: Vec<String> = split_directors("D1, D2,,  D3 ")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, ["D1", "D2", "D3"]);
        assert!(split_directors("").is_empty());
    }

    #[test]
    fn main_row_head() {
        let table = Table::from_rows(
            "main",
            ["film_id", "nat_title", "eng_title", "release_date", "release_type", "film_type", "director"],
            [["F1", "La Bête", "The Beast", "17/05/2019", "TH", "FIC", "D1, D2"]],
        );
        let codes = CodeExpander::in_memory()
            .with_table(CodeField::ReleaseType, [("TH", "Theatrical")])
            .with_table(CodeField::FilmType, [("FIC", "Fiction")]);
        let mut quality = QualityReport::default();

        let rows = parse_main(&table, &codes, &mut quality).unwrap();
        let head = &rows[0].head;
        assert_eq!(head.slug, "f1-la-bete");
        assert_eq!(head.title.english, "The Beast");
        assert_eq!(head.film_type, "Fiction");
        assert_eq!(head.release.kind, "Theatrical");
        assert_eq!(head.release.year, Some(2019));
        assert_eq!(rows[0].directors.len(), 2);
    }

    #[test]
    fn relation_rows_for_unknown_films_are_dropped() {
        let table = Table::from_rows(
            "tags",
            ["film_id", "tag_name"],
            [["F1", "heist"], ["F9", "noir"], ["", "orphan"], ["F1", " "]],
        );
        let anchors: HashSet<FilmId> = [FilmId::new("F1").unwrap()].into_iter().collect();
        let mut quality = QualityReport::default();

        let records = tag_records(&table, &anchors, &mut quality).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field, FilmField::Tag("heist".to_string()));
        assert_eq!(quality.count(IssueKind::MalformedRow), 1);

        let dangling: Vec<_> = quality.of_kind(IssueKind::DanglingReference).collect();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].subject, "tags");
        assert_eq!(dangling[0].count, 1);
    }
}
