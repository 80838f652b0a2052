use chrono::NaiveDate;
use serde::Serialize;

use crate::character::FilmCharacter;
use crate::embed::{Embedded, Identified};
use crate::ids::FilmId;
use crate::person::PersonSummary;

/// Native and English renderings of a text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Localized {
    pub native: String,
    pub english: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    #[serde(rename = "type")]
    pub kind: String,
    pub date: Option<NaiveDate>,
    pub year: Option<i32>,
}

impl Release {
    pub fn summary(&self) -> ReleaseSummary {
        ReleaseSummary {
            kind: self.kind.clone(),
            year: self.year,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseSummary {
    #[serde(rename = "type")]
    pub kind: String,
    pub year: Option<i32>,
}

/// One producing country and its share of the production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Production {
    pub country: String,
    pub share: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub trailer_url: String,
    pub poster_url: String,
}

/// Top-level film document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: FilmId,
    pub slug: String,
    pub title: Localized,
    pub film_type: String,
    pub release: Release,
    pub production: Vec<Production>,
    pub media: Option<Media>,
    pub genre: Vec<String>,
    pub tags: Vec<String>,
    pub director: Vec<Embedded<PersonSummary>>,
    pub character: Vec<FilmCharacter>,
    pub synopsis: Option<Localized>,
}

impl Film {
    pub fn summary(&self) -> FilmSummary {
        FilmSummary {
            id: self.id.clone(),
            slug: self.slug.clone(),
            title: self.title.clone(),
            film_type: self.film_type.clone(),
            genre: self.genre.clone(),
            release: self.release.summary(),
            tags: self.tags.clone(),
            production: self.production.clone(),
        }
    }
}

/// Embedding-safe view of a film: no characters, directors, marketing or
/// synopsis, and only the type and year of the release.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmSummary {
    pub id: FilmId,
    pub slug: String,
    pub title: Localized,
    pub film_type: String,
    pub genre: Vec<String>,
    pub release: ReleaseSummary,
    pub tags: Vec<String>,
    pub production: Vec<Production>,
}

impl Identified for FilmSummary {
    type Id = FilmId;

    fn id(&self) -> FilmId {
        self.id.clone()
    }
}
