//! Character builder.

use beast_codes::{CodeExpander, CodeField};
use beast_ingest::{Table, cell};
use beast_model::{
    AgeBracket, CharacterAge, CharacterId, CharacterTraits, Embedded, FilmCharacter, FilmId,
    PersonCharacter, PersonKey, QualityReport,
};

use crate::error::Result;
use crate::keys::{at, report_blank_keys};
use crate::role::RoleLookup;

const FILM_ID: &str = "film_id";
const CHARACTER_ID: &str = "character_id";
const PERSON_ID: &str = "person_id";

/// One row of the character attribute table, fully expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRow {
    pub film: FilmId,
    /// Performer, absent when the row names nobody.
    pub person: Option<PersonKey>,
    pub traits: CharacterTraits,
    pub role: String,
}

impl CharacterRow {
    /// The character as its film embeds it, the performer still a stub.
    pub fn film_character(&self) -> FilmCharacter {
        FilmCharacter {
            traits: self.traits.clone(),
            role: self.role.clone(),
            person: self.person.clone().map(Embedded::stub),
        }
    }

    /// The character as its performer embeds it, the film still a stub.
    pub fn person_character(&self) -> PersonCharacter {
        PersonCharacter {
            traits: self.traits.clone(),
            role: self.role.clone(),
            film: Embedded::stub(self.film.clone()),
        }
    }
}

struct TraitColumns {
    age: Option<usize>,
    gender: Option<usize>,
    sexuality: Option<usize>,
    origin: Option<usize>,
    class: Option<usize>,
    profession: Option<usize>,
    ability: Option<usize>,
    assisted_mobility: Option<usize>,
}

impl TraitColumns {
    fn resolve(table: &Table) -> Self {
        Self {
            age: table.column_index("ch_age"),
            gender: table.column_index("ch_gender"),
            sexuality: table.column_index("ch_sexuality"),
            origin: table.column_index("ch_porigin"),
            class: table.column_index("ch_class"),
            profession: table.column_index("ch_profession"),
            ability: table.column_index("ch_ability"),
            assisted_mobility: table.column_index("assisted_mobility"),
        }
    }

    fn traits(&self, id: CharacterId, row: &[String], codes: &CodeExpander) -> CharacterTraits {
        let expand = |field, column| codes.expand(field, cell(row, column));
        let bracket = AgeBracket::from_source(cell(row, self.age));
        CharacterTraits {
            id,
            age: CharacterAge {
                bracket,
                description: codes.expand(CodeField::Age, &bracket.code()),
            },
            gender: expand(CodeField::Gender, self.gender),
            sexuality: expand(CodeField::Sexuality, self.sexuality),
            origin: expand(CodeField::Origin, self.origin),
            class: expand(CodeField::Class, self.class),
            profession: expand(CodeField::ProfessionalStatus, self.profession),
            ability: expand(CodeField::Ability, self.ability),
            assisted_mobility: expand(CodeField::AssistedMobility, self.assisted_mobility),
        }
    }
}

/// Parse the character attribute table.
///
/// `film_id`, `character_id` and `person_id` must exist as columns; rows with
/// a blank film or character id are skipped. Attribute columns are optional
/// and expand to `"Unknown"` when absent.
pub fn parse_characters(
    table: &Table,
    codes: &CodeExpander,
    roles: &RoleLookup,
    quality: &mut QualityReport,
) -> Result<Vec<CharacterRow>> {
    let [film_idx, character_idx, person_idx] =
        table.require_columns([FILM_ID, CHARACTER_ID, PERSON_ID])?;
    let columns = TraitColumns::resolve(table);

    let mut characters = Vec::with_capacity(table.len());
    let mut blank = 0u64;
    for row in table.rows() {
        let (Ok(film), Ok(id)) = (
            FilmId::new(at(row, film_idx)),
            CharacterId::new(at(row, character_idx)),
        ) else {
            blank += 1;
            continue;
        };
        let person = PersonKey::new(at(row, person_idx)).ok();
        let role = roles.role_or_unknown(&film, person.as_ref());
        characters.push(CharacterRow {
            traits: columns.traits(id, row, codes),
            film,
            person,
            role,
        });
    }
    report_blank_keys(quality, table, blank);
    tracing::debug!(characters = characters.len(), "parsed character rows");
    Ok(characters)
}
