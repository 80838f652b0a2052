#![allow(dead_code)]

use std::fs;
use std::path::Path;

use beast_codes::{CodeExpander, CodeField};
use beast_ingest::Table;
use beast_transform::SourceTables;

/// Every source table of a run, as literal rows.
pub struct Fixture {
    pub main: Table,
    pub genre: Table,
    pub marketing: Table,
    pub nationality: Table,
    pub tags: Table,
    pub characters: Table,
    pub roles: Table,
    pub biographies: Table,
    pub biography_nationality: Table,
}

impl Fixture {
    /// One film `F1` directed by `D1` and `D2`, with character `C1` played by
    /// `D1` in a lead role.
    pub fn single_film() -> Self {
        Self {
            main: Table::from_rows(
                "main",
                ["film_id", "nat_title", "eng_title", "release_date", "release_type", "film_type", "director"],
                [["F1", "Film Un", "Film One", "2020-03-01", "TH", "FIC", "D1, D2"]],
            ),
            genre: Table::from_rows("genre", ["film_id", "film_genre"], [["F1", "COM"]]),
            marketing: Table::from_rows(
                "marketing",
                ["film_id", "trailer_url", "poster_url", "nat_synopsis", "eng_synopsis"],
                [["F1", "", "", "", ""]],
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
                [["F1", "C1", "D1", "3", "F"]],
            ),
            roles: Table::from_rows(
                "roles",
                ["film_id", "person_name", "role_class"],
                [["F1", "D1", "LEAD"]],
            ),
            biographies: Table::from_rows(
                "biographies",
                ["person_name", "birth_year", "death_year", "gender"],
                [["D1", "1970", "0", "F"], ["D2", "", "", "M"]],
            ),
            biography_nationality: Table::from_rows(
                "biography_nationality",
                ["person_name", "person_nat"],
                [["D1", "FR"]],
            ),
        }
    }

    pub fn tables(&self) -> SourceTables<'_> {
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

pub const CODE_TABLES: &[(CodeField, &[(&str, &str)])] = &[
    (CodeField::ReleaseType, &[("TH", "Theatrical")]),
    (CodeField::FilmType, &[("FIC", "Fiction")]),
    (CodeField::Genre, &[("COM", "Comedy"), ("DRA", "Drama")]),
    (CodeField::Country, &[("FR", "France"), ("IT", "Italy")]),
    (CodeField::ProductionShare, &[("MAJ", "Majority")]),
    (CodeField::Gender, &[("F", "Female"), ("M", "Male")]),
    (CodeField::Age, &[("3", "Adult"), ("5", "Elderly")]),
    (CodeField::Sexuality, &[("HET", "Heterosexual")]),
    (CodeField::Origin, &[("URB", "Urban")]),
    (CodeField::Class, &[("MID", "Middle")]),
    (CodeField::ProfessionalStatus, &[("EMP", "Employed")]),
    (CodeField::Ability, &[("NON", "Non-disabled")]),
    (CodeField::AssistedMobility, &[("NO", "No")]),
    (CodeField::RoleClass, &[("LEAD", "Lead"), ("SUP", "Supporting")]),
];

pub fn codes() -> CodeExpander {
    CODE_TABLES
        .iter()
        .fold(CodeExpander::in_memory(), |codes, (field, entries)| {
            codes.with_table(*field, entries.iter().copied())
        })
}

/// Write every code table under `dir` as `<field>.csv`.
pub fn write_code_tables(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    for (field, entries) in CODE_TABLES {
        let mut text = String::from("Code,Description\n");
        for (code, description) in *entries {
            text.push_str(&format!("{code},{description}\n"));
        }
        fs::write(dir.join(field.file_name()), text).unwrap();
    }
}
