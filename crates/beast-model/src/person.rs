use serde::Serialize;

use crate::character::PersonCharacter;
use crate::embed::{Embedded, Identified};
use crate::film::FilmSummary;
use crate::ids::PersonKey;

/// Top-level biography document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonKey,
    pub slug: String,
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub gender: String,
    pub nationality: Vec<String>,
    /// Characters this person portrayed, each carrying its film.
    pub characters: Vec<PersonCharacter>,
    /// Films this person directed.
    #[serde(rename = "director")]
    pub directed: Vec<Embedded<FilmSummary>>,
}

impl Person {
    pub fn summary(&self) -> PersonSummary {
        PersonSummary {
            id: self.id.clone(),
            slug: self.slug.clone(),
            name: self.name.clone(),
            birth_year: self.birth_year,
            death_year: self.death_year,
            gender: self.gender.clone(),
            nationality: self.nationality.clone(),
        }
    }
}

/// Embedding-safe view of a person: no character or directed-film lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    pub id: PersonKey,
    pub slug: String,
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub gender: String,
    pub nationality: Vec<String>,
}

impl Identified for PersonSummary {
    type Id = PersonKey;

    fn id(&self) -> PersonKey {
        self.id.clone()
    }
}
