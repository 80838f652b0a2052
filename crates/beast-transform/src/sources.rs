//! The named source tables the builders consume.

use beast_ingest::{SourceSet, Table};

use crate::error::Result;

/// Names under which source tables are loaded.
pub mod names {
    pub const MAIN: &str = "main";
    pub const GENRE: &str = "genre";
    pub const MARKETING: &str = "marketing";
    pub const NATIONALITY: &str = "nationality";
    pub const TAGS: &str = "tags";
    pub const CHARACTERS: &str = "characters";
    pub const ROLES: &str = "roles";
    pub const BIOGRAPHIES: &str = "biographies";
    pub const BIOGRAPHY_NATIONALITY: &str = "biography_nationality";

    pub const ALL: [&str; 9] = [
        MAIN,
        GENRE,
        MARKETING,
        NATIONALITY,
        TAGS,
        CHARACTERS,
        ROLES,
        BIOGRAPHIES,
        BIOGRAPHY_NATIONALITY,
    ];
}

/// Borrowed view of every table a run needs.
#[derive(Debug, Clone, Copy)]
pub struct SourceTables<'a> {
    pub main: &'a Table,
    pub genre: &'a Table,
    pub marketing: &'a Table,
    pub nationality: &'a Table,
    pub tags: &'a Table,
    pub characters: &'a Table,
    pub roles: &'a Table,
    pub biographies: &'a Table,
    pub biography_nationality: &'a Table,
}

impl<'a> SourceTables<'a> {
    pub fn from_set(set: &'a SourceSet) -> Result<Self> {
        Ok(Self {
            main: set.table(names::MAIN)?,
            genre: set.table(names::GENRE)?,
            marketing: set.table(names::MARKETING)?,
            nationality: set.table(names::NATIONALITY)?,
            tags: set.table(names::TAGS)?,
            characters: set.table(names::CHARACTERS)?,
            roles: set.table(names::ROLES)?,
            biographies: set.table(names::BIOGRAPHIES)?,
            biography_nationality: set.table(names::BIOGRAPHY_NATIONALITY)?,
        })
    }
}
