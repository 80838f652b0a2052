use beast_codes::{CodeExpander, CodeField};
use beast_ingest::Table;
use beast_model::IssueKind;
use beast_transform::{FilmField, PersonField, SourceTables, build_records};

struct Fixture {
    main: Table,
    genre: Table,
    marketing: Table,
    nationality: Table,
    tags: Table,
    characters: Table,
    roles: Table,
    biographies: Table,
    biography_nationality: Table,
}

impl Fixture {
    fn new() -> Self {
        Self {
            main: Table::from_rows(
                "main",
                ["film_id", "nat_title", "eng_title", "release_date", "release_type", "film_type", "director"],
                [["F1", "Film Un", "Film One", "2020-03-01", "TH", "FIC", "D1, D2"]],
            ),
            genre: Table::from_rows(
                "genre",
                ["film_id", "film_genre"],
                [["F1", "COM"], ["F1", "DRA"], ["F2", "COM"]],
            ),
            marketing: Table::from_rows(
                "marketing",
                ["film_id", "trailer_url", "poster_url", "nat_synopsis", "eng_synopsis"],
                [["F1", "https://t", "", "Un film", "A film"]],
            ),
            nationality: Table::from_rows(
                "nationality",
                ["film_id", "film_country", "prod_share"],
                [["F1", "FR", "MAJ"]],
            ),
            tags: Table::from_rows("tags", ["film_id", "tag_name"], [["F1", "heist"]]),
            characters: Table::from_rows(
                "characters",
                ["film_id", "character_id", "person_id", "ch_age", "ch_gender"],
                [["F1", "C1", "D1", "3", "F"], ["F1", "C2", "X9", "9", "M"]],
            ),
            roles: Table::from_rows(
                "roles",
                ["film_id", "person_name", "role_class"],
                [["F1", "D1", "LEAD"]],
            ),
            biographies: Table::from_rows(
                "biographies",
                ["person_name", "birth_year", "death_year", "gender"],
                [["D1", "1970", "", "F"], ["D2", "0", "", "M"]],
            ),
            biography_nationality: Table::from_rows(
                "biography_nationality",
                ["person_name", "person_nat"],
                [["D1", "FR"], ["Z0", "IT"]],
            ),
        }
    }

    fn tables(&self) -> SourceTables<'_> {
        SourceTables {
            main: &self.main,
            genre: &self.genre,
            marketing: &self.marketing,
            nationality: &self.nationality,
            tags: &self.tags,
            characters: &self.characters,
            roles: &self.roles,
            biographies: &self.biographies,
            biography_nationality: &self.biography_nationality,
        }
    }
}

fn codes() -> CodeExpander {
    CodeExpander::in_memory()
        .with_table(CodeField::Genre, [("COM", "Comedy"), ("DRA", "Drama")])
        .with_table(CodeField::RoleClass, [("LEAD", "Lead")])
        .with_table(CodeField::Gender, [("F", "Female"), ("M", "Male")])
        .with_table(CodeField::Country, [("FR", "France")])
}

#[test]
fn film_records_cover_every_relation() {
    let fixture = Fixture::new();
    let built = build_records(&fixture.tables(), &codes()).unwrap();

    let count = |name: &str| built.films.iter().filter(|r| r.field.name() == name).count();
    assert_eq!(count("head"), 1);
    assert_eq!(count("director"), 2);
    assert_eq!(count("genre"), 2);
    assert_eq!(count("media"), 1);
    assert_eq!(count("synopsis"), 1);
    assert_eq!(count("production"), 1);
    assert_eq!(count("tags"), 1);
    assert_eq!(count("character"), 2);
    assert!(built.films.iter().all(|r| r.film.as_str() == "F1"));
}

#[test]
fn characters_carry_roles_and_stub_performers() {
    let fixture = Fixture::new();
    let built = build_records(&fixture.tables(), &codes()).unwrap();

    let characters: Vec<_> = built
        .films
        .iter()
        .filter_map(|r| match &r.field {
            FilmField::Character(character) => Some(character),
            _ => None,
        })
        .collect();
    assert_eq!(characters[0].role, "Lead");
    assert_eq!(characters[0].traits.gender, "Female");
    assert!(characters[0].person.as_ref().is_some_and(|p| p.is_stub()));
    assert_eq!(characters[1].role, "Unknown");
    assert_eq!(characters[1].traits.age.bracket.get(), 5);
}

#[test]
fn person_records_are_anchored_on_biographies() {
    let fixture = Fixture::new();
    let built = build_records(&fixture.tables(), &codes()).unwrap();

    let people: std::collections::BTreeSet<&str> =
        built.persons.iter().map(|r| r.person.as_str()).collect();
    assert_eq!(people.into_iter().collect::<Vec<_>>(), ["D1", "D2"]);

    let d1: Vec<&str> = built
        .persons
        .iter()
        .filter(|r| r.person.as_str() == "D1")
        .map(|r| r.field.name())
        .collect();
    assert!(d1.contains(&"head"));
    assert!(d1.contains(&"nationality"));
    assert!(d1.contains(&"characters"));
    assert!(d1.contains(&"director"));

    let d2_head = built
        .persons
        .iter()
        .find_map(|r| match &r.field {
            PersonField::Head(head) if r.person.as_str() == "D2" => Some(head),
            _ => None,
        })
        .unwrap();
    assert_eq!(d2_head.birth_year, None);
}

#[test]
fn missing_biographies_are_reported_not_fatal() {
    let fixture = Fixture::new();
    let built = build_records(&fixture.tables(), &codes()).unwrap();

    let missing: Vec<_> = built.quality.of_kind(IssueKind::MissingBiography).collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].subject, "X9");
}

#[test]
fn missing_key_column_is_fatal() {
    let mut fixture = Fixture::new();
    fixture.genre = Table::from_rows("genre", ["film", "film_genre"], [["F1", "COM"]]);
    assert!(build_records(&fixture.tables(), &codes()).is_err());
}
