//! Role lookup: the role class a person played in a film.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use beast_codes::{CodeExpander, CodeField, UNKNOWN};
use beast_ingest::Table;
use beast_model::{FilmId, IssueKind, PersonKey, QualityIssue, QualityReport};

use crate::error::Result;
use crate::keys::{at, report_blank_keys};

const FILM_ID: &str = "film_id";
const PERSON_NAME: &str = "person_name";
const ROLE_CLASS: &str = "role_class";

/// `(film, person) -> role` with the role class already expanded.
#[derive(Debug, Clone, Default)]
pub struct RoleLookup {
    roles: HashMap<(FilmId, PersonKey), String>,
}

impl RoleLookup {
    /// Index the role table. The first role of a `(film, person)` pair wins;
    /// a later row disagreeing with it is reported as an ambiguous group.
    pub fn build(table: &Table, codes: &CodeExpander, quality: &mut QualityReport) -> Result<Self> {
        let [film_idx, person_idx, role_idx] =
            table.require_columns([FILM_ID, PERSON_NAME, ROLE_CLASS])?;

        let mut roles = HashMap::with_capacity(table.len());
        let mut blank = 0u64;
        for row in table.rows() {
            let (Ok(film), Ok(person)) = (
                FilmId::new(at(row, film_idx)),
                PersonKey::new(at(row, person_idx)),
            ) else {
                blank += 1;
                continue;
            };
            let role = codes.expand(CodeField::RoleClass, at(row, role_idx));
            match roles.entry((film, person)) {
                Entry::Vacant(slot) => {
                    slot.insert(role);
                }
                Entry::Occupied(slot) if *slot.get() != role => {
                    let (film, person) = slot.key();
                    tracing::warn!(
                        film = %film,
                        person = %person,
                        kept = %slot.get(),
                        ignored = %role,
                        "conflicting roles, keeping the first"
                    );
                    quality.push(QualityIssue::new(
                        IssueKind::AmbiguousGroup,
                        format!("{film}/{person}"),
                        format!("role: kept '{}', ignored '{role}'", slot.get()),
                    ));
                }
                Entry::Occupied(_) => {}
            }
        }
        report_blank_keys(quality, table, blank);
        tracing::debug!(roles = roles.len(), "role lookup built");
        Ok(Self { roles })
    }

    pub fn get(&self, film: &FilmId, person: &PersonKey) -> Option<&str> {
        self.roles
            .get(&(film.clone(), person.clone()))
            .map(String::as_str)
    }

    /// Role of a character's performer, `"Unknown"` when there is none.
    pub fn role_or_unknown(&self, film: &FilmId, person: Option<&PersonKey>) -> String {
        person
            .and_then(|person| self.get(film, person))
            .unwrap_or(UNKNOWN)
            .to_string()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes() -> CodeExpander {
        CodeExpander::in_memory()
            .with_table(CodeField::RoleClass, [("LEAD", "Lead"), ("SUP", "Supporting")])
    }

    #[test]
    fn first_role_wins_and_conflicts_are_reported() {
        let table = Table::from_rows(
            "roles",
            ["film_id", "person_name", "role_class"],
            [
                ["F1", " D1 ", "LEAD"],
                ["F1", "D1", "SUP"],
                ["F1", "D2", "SUP"],
                ["", "D3", "SUP"],
            ],
        );
        let mut quality = QualityReport::default();
        let roles = RoleLookup::build(&table, &codes(), &mut quality).unwrap();

        let film = FilmId::new("F1").unwrap();
        assert_eq!(roles.get(&film, &PersonKey::new("D1").unwrap()), Some("Lead"));
        assert_eq!(roles.get(&film, &PersonKey::new("D2").unwrap()), Some("Supporting"));
        assert_eq!(roles.len(), 2);
        assert_eq!(quality.count(IssueKind::AmbiguousGroup), 1);
        assert_eq!(quality.count(IssueKind::MalformedRow), 1);
    }

    #[test]
    fn missing_role_is_unknown() {
        let roles = RoleLookup::default();
        let film = FilmId::new("F1").unwrap();
        assert_eq!(roles.role_or_unknown(&film, None), UNKNOWN);
        assert_eq!(
            roles.role_or_unknown(&film, Some(&PersonKey::new("D1").unwrap())),
            UNKNOWN
        );
    }
}
