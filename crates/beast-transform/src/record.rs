//! Flat records emitted by the entity builders.
//!
//! Each record carries the natural id of the document it belongs to and one
//! field contribution. The aggregator groups records by id and folds the
//! contributions into a document.

use beast_model::{
    FilmCharacter, FilmId, Localized, Media, PersonCharacter, PersonKey, Production, Release,
};

/// Scalar part of a film, expected to agree across every main-table row of
/// the same film.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmHead {
    pub slug: String,
    pub title: Localized,
    pub film_type: String,
    pub release: Release,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilmField {
    Head(FilmHead),
    Director(PersonKey),
    Genre(String),
    Production(Production),
    Tag(String),
    Media(Media),
    Synopsis(Localized),
    Character(FilmCharacter),
}

impl FilmField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Head(_) => "head",
            Self::Director(_) => "director",
            Self::Genre(_) => "genre",
            Self::Production(_) => "production",
            Self::Tag(_) => "tags",
            Self::Media(_) => "media",
            Self::Synopsis(_) => "synopsis",
            Self::Character(_) => "character",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilmRecord {
    pub film: FilmId,
    pub field: FilmField,
}

impl FilmRecord {
    pub fn new(film: FilmId, field: FilmField) -> Self {
        Self { film, field }
    }
}

/// Scalar part of a person, taken from the biography table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonHead {
    pub name: String,
    pub slug: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PersonField {
    Head(PersonHead),
    Nationality(String),
    Character(PersonCharacter),
    Directed(FilmId),
}

impl PersonField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Head(_) => "head",
            Self::Nationality(_) => "nationality",
            Self::Character(_) => "characters",
            Self::Directed(_) => "director",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonRecord {
    pub person: PersonKey,
    pub field: PersonField,
}

impl PersonRecord {
    pub fn new(person: PersonKey, field: PersonField) -> Self {
        Self { person, field }
    }
}
