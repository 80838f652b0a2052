//! Characters are never documents of their own. They are embedded in a film
//! (carrying the person who played them) or in a person (carrying the film
//! they appear in), never both.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::embed::{Embedded, Identified};
use crate::film::FilmSummary;
use crate::ids::{CharacterId, CharacterRef, FilmId};
use crate::person::PersonSummary;

/// Age bracket of a character, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgeBracket(u8);

impl AgeBracket {
    /// Bracket used for every value outside the closed set `1..=5`.
    pub const FALLBACK: Self = Self(5);

    /// Parse a raw source value. Anything but `"1"` to `"5"` collapses into
    /// the highest bracket.
    pub fn from_source(raw: &str) -> Self {
        match raw.trim() {
            "1" => Self(1),
            "2" => Self(2),
            "3" => Self(3),
            "4" => Self(4),
            _ => Self::FALLBACK,
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Code used to look the bracket up in the `age` code table.
    pub fn code(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Age bracket plus its expanded description, rendered as `"3: Adult"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterAge {
    pub bracket: AgeBracket,
    pub description: String,
}

impl fmt::Display for CharacterAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.bracket, self.description)
    }
}

impl Serialize for CharacterAge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Demographic attributes of a character, every code already expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterTraits {
    pub id: CharacterId,
    pub age: CharacterAge,
    pub gender: String,
    pub sexuality: String,
    pub origin: String,
    pub class: String,
    pub profession: String,
    pub ability: String,
    pub assisted_mobility: String,
}

/// A character as embedded in its film.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmCharacter {
    #[serde(flatten)]
    pub traits: CharacterTraits,
    pub role: String,
    pub person: Option<Embedded<PersonSummary>>,
}

impl Identified for FilmCharacter {
    type Id = CharacterId;

    fn id(&self) -> CharacterId {
        self.traits.id.clone()
    }
}

/// A character as embedded in the person who played it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonCharacter {
    #[serde(flatten)]
    pub traits: CharacterTraits,
    pub role: String,
    pub film: Embedded<FilmSummary>,
}

impl PersonCharacter {
    pub fn film_id(&self) -> FilmId {
        self.film.id()
    }
}

impl Identified for PersonCharacter {
    type Id = CharacterRef;

    fn id(&self) -> CharacterRef {
        CharacterRef {
            film: self.film.id(),
            character: self.traits.id.clone(),
        }
    }
}
