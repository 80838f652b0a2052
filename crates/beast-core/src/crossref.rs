//! Cross-referencing: replace relation stubs with embedded summaries.
//!
//! Summaries are taken from the aggregated collections before any stub is
//! resolved, and summary types have no relation fields, so an embedded
//! document never embeds anything further.

use std::collections::BTreeMap;

use beast_model::{
    Embedded, Film, FilmId, FilmSummary, Identified, IssueKind, Person, PersonKey,
    PersonSummary, QualityIssue, QualityReport,
};

/// Both collections with every resolvable relation embedded.
#[derive(Debug, Clone)]
pub struct CrossReferenced {
    pub films: Vec<Film>,
    pub persons: Vec<Person>,
    pub quality: QualityReport,
}

/// Unresolved ids per relation, with the number of stubs naming each.
#[derive(Debug, Default)]
struct Dangling {
    relations: BTreeMap<(&'static str, String), u64>,
}

impl Dangling {
    fn resolve<T>(
        &mut self,
        relation: &'static str,
        embedded: Embedded<T>,
        index: &BTreeMap<T::Id, T>,
    ) -> Embedded<T>
    where
        T: Identified + Clone,
    {
        let embedded = embedded.resolve_from(index);
        if embedded.is_stub() {
            *self
                .relations
                .entry((relation, embedded.id().to_string()))
                .or_default() += 1;
        }
        embedded
    }

    fn report(self, quality: &mut QualityReport) {
        for ((relation, id), count) in self.relations {
            tracing::warn!(relation, %id, count, "dangling reference left as stub");
            quality.push(
                QualityIssue::new(
                    IssueKind::DanglingReference,
                    id,
                    format!("{relation}: no document with this id"),
                )
                .with_count(count),
            );
        }
    }
}

fn resolve_films(
    films: Vec<Film>,
    people: &BTreeMap<PersonKey, PersonSummary>,
) -> (Vec<Film>, Dangling) {
    let mut dangling = Dangling::default();
    let films = films
        .into_iter()
        .map(|mut film| {
            film.director = std::mem::take(&mut film.director)
                .into_iter()
                .map(|director| dangling.resolve("film.director", director, people))
                .collect();
            for character in &mut film.character {
                if let Some(person) = character.person.take() {
                    character.person =
                        Some(dangling.resolve("film.character.person", person, people));
                }
            }
            film
        })
        .collect();
    (films, dangling)
}

fn resolve_persons(
    persons: Vec<Person>,
    films: &BTreeMap<FilmId, FilmSummary>,
) -> (Vec<Person>, Dangling) {
    let mut dangling = Dangling::default();
    let persons = persons
        .into_iter()
        .map(|mut person| {
            person.directed = std::mem::take(&mut person.directed)
                .into_iter()
                .map(|film| dangling.resolve("biography.director", film, films))
                .collect();
            person.characters = std::mem::take(&mut person.characters)
                .into_iter()
                .map(|mut character| {
                    character.film =
                        dangling.resolve("biography.characters.film", character.film, films);
                    character
                })
                .collect();
            person
        })
        .collect();
    (persons, dangling)
}

/// Embed summaries across the two collections.
///
/// Film-side and person-side resolution read only the summary indexes and
/// run concurrently. Ids that do not resolve keep their stub and are
/// reported as dangling references.
pub fn cross_reference(films: Vec<Film>, persons: Vec<Person>) -> CrossReferenced {
    let film_index: BTreeMap<FilmId, FilmSummary> =
        films.iter().map(|film| (film.id.clone(), film.summary())).collect();
    let person_index: BTreeMap<PersonKey, PersonSummary> = persons
        .iter()
        .map(|person| (person.id.clone(), person.summary()))
        .collect();

    let ((films, film_dangling), (persons, person_dangling)) = rayon::join(
        || resolve_films(films, &person_index),
        || resolve_persons(persons, &film_index),
    );

    let mut quality = QualityReport::default();
    film_dangling.report(&mut quality);
    person_dangling.report(&mut quality);
    tracing::info!(
        films = films.len(),
        persons = persons.len(),
        dangling = quality.count(IssueKind::DanglingReference),
        "cross-referenced"
    );
    CrossReferenced {
        films,
        persons,
        quality,
    }
}
