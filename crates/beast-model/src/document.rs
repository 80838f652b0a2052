use serde::Serialize;

use crate::film::Film;
use crate::person::Person;

/// A top-level document of either collection, tagged with its `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Document {
    Film(Film),
    Biography(Person),
}

impl Document {
    pub fn slug(&self) -> &str {
        match self {
            Self::Film(film) => &film.slug,
            Self::Biography(person) => &person.slug,
        }
    }
}

/// A document after cleaning, ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanDocument {
    pub slug: String,
    pub body: serde_json::Value,
}

/// The two cleaned collections produced by one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    pub films: Vec<CleanDocument>,
    pub biographies: Vec<CleanDocument>,
}

impl Collections {
    /// Films followed by biographies.
    pub fn corpus(&self) -> impl Iterator<Item = &CleanDocument> {
        self.films.iter().chain(self.biographies.iter())
    }

    pub fn len(&self) -> usize {
        self.films.len() + self.biographies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty() && self.biographies.is_empty()
    }
}
