//! Runs every builder over the source tables and emits the flat records of
//! both collections.

use std::collections::{BTreeMap, HashSet};

use beast_codes::CodeExpander;
use beast_model::{FilmId, IssueKind, PersonKey, QualityIssue, QualityReport};

use crate::biography::parse_biographies;
use crate::character::{CharacterRow, parse_characters};
use crate::error::Result;
use crate::film::{genre_records, marketing_records, parse_main, production_records, tag_records};
use crate::record::{FilmField, FilmRecord, PersonField, PersonRecord};
use crate::role::RoleLookup;
use crate::sources::SourceTables;

/// Flat records of both collections plus what the builders noticed.
#[derive(Debug, Clone, Default)]
pub struct Built {
    pub films: Vec<FilmRecord>,
    pub persons: Vec<PersonRecord>,
    pub quality: QualityReport,
}

/// Build the flat film and person records.
///
/// Films are anchored on the main table and persons on the biography table:
/// relation rows never create a document, and a missing relation row never
/// removes one.
pub fn build_records(tables: &SourceTables<'_>, codes: &CodeExpander) -> Result<Built> {
    let mut quality = QualityReport::default();

    let main = parse_main(tables.main, codes, &mut quality)?;
    let anchors: HashSet<FilmId> = main.iter().map(|row| row.film.clone()).collect();

    let mut films = Vec::new();
    let mut directed: Vec<(PersonKey, FilmId)> = Vec::new();
    for row in main {
        for director in row.directors {
            directed.push((director.clone(), row.film.clone()));
            films.push(FilmRecord::new(row.film.clone(), FilmField::Director(director)));
        }
        films.push(FilmRecord::new(row.film, FilmField::Head(row.head)));
    }
    films.extend(genre_records(tables.genre, codes, &anchors, &mut quality)?);
    films.extend(marketing_records(tables.marketing, &anchors, &mut quality)?);
    films.extend(production_records(tables.nationality, codes, &anchors, &mut quality)?);
    films.extend(tag_records(tables.tags, &anchors, &mut quality)?);

    let roles = RoleLookup::build(tables.roles, codes, &mut quality)?;
    let characters = parse_characters(tables.characters, codes, &roles, &mut quality)?;
    let biographies = parse_biographies(
        tables.biographies,
        tables.biography_nationality,
        codes,
        &mut quality,
    )?;
    let people: HashSet<PersonKey> = biographies
        .heads
        .iter()
        .map(|(person, _)| person.clone())
        .collect();
    report_missing_biographies(&characters, &people, &mut quality);

    let mut persons = Vec::new();
    for (person, head) in biographies.heads {
        persons.push(PersonRecord::new(person, PersonField::Head(head)));
    }
    for (person, nationality) in biographies.nationalities {
        if people.contains(&person) {
            persons.push(PersonRecord::new(person, PersonField::Nationality(nationality)));
        }
    }

    let mut unanchored = 0u64;
    for character in &characters {
        if anchors.contains(&character.film) {
            films.push(FilmRecord::new(
                character.film.clone(),
                FilmField::Character(character.film_character()),
            ));
        } else {
            unanchored += 1;
        }
        // The performer keeps the role; crossref leaves the film as a stub.
        if let Some(person) = character.person.as_ref().filter(|p| people.contains(*p)) {
            persons.push(PersonRecord::new(
                person.clone(),
                PersonField::Character(character.person_character()),
            ));
        }
    }
    if unanchored > 0 {
        tracing::warn!(
            table = tables.characters.name(),
            rows = unanchored,
            "character rows for films missing from the main table"
        );
    }
    for (person, film) in directed {
        if people.contains(&person) {
            persons.push(PersonRecord::new(person, PersonField::Directed(film)));
        }
    }

    tracing::info!(
        films = anchors.len(),
        film_records = films.len(),
        people = people.len(),
        person_records = persons.len(),
        "built flat records"
    );
    Ok(Built {
        films,
        persons,
        quality,
    })
}

/// Warn once about every performer with no biography row, and record one
/// issue per performer.
fn report_missing_biographies(
    characters: &[CharacterRow],
    people: &HashSet<PersonKey>,
    quality: &mut QualityReport,
) {
    let mut missing: BTreeMap<&PersonKey, u64> = BTreeMap::new();
    for person in characters.iter().filter_map(|c| c.person.as_ref()) {
        if !people.contains(person) {
            *missing.entry(person).or_default() += 1;
        }
    }
    if missing.is_empty() {
        return;
    }

    let names: Vec<&str> = missing.keys().map(|person| person.as_str()).collect();
    tracing::warn!(
        count = names.len(),
        people = ?names,
        "missing biography data for character performers"
    );
    for (person, rows) in missing {
        quality.push(
            QualityIssue::new(
                IssueKind::MissingBiography,
                person.as_str(),
                "character performer has no biography row",
            )
            .with_count(rows),
        );
    }
}
