//! Biography builder: people and their nationalities, joined on the trimmed
//! person name.

use beast_codes::{CodeExpander, CodeField};
use beast_ingest::{Table, cell};
use beast_model::{PersonKey, QualityReport};

use crate::error::Result;
use crate::keys::{at, report_blank_keys};
use crate::record::PersonHead;
use crate::slug::slugify;

const PERSON_NAME: &str = "person_name";
const PERSON_NAT: &str = "person_nat";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Biographies {
    /// One entry per biography row, in table order.
    pub heads: Vec<(PersonKey, PersonHead)>,
    /// Expanded nationalities, in table order. May name people with no head.
    pub nationalities: Vec<(PersonKey, String)>,
}

/// Parse a year cell. Blank, non-numeric and `0` values are unknown.
///
/// Exports written through a float column carry years as `1965.0`; those
/// are accepted when the fraction is zero.
pub fn parse_year(raw: &str) -> Option<i32> {
    let value = raw.trim();
    let year = value.parse::<i32>().ok().or_else(|| {
        let float = value.parse::<f64>().ok()?;
        (float.fract() == 0.0 && float.abs() < f64::from(i32::MAX)).then_some(float as i32)
    })?;
    (year != 0).then_some(year)
}

pub fn parse_biographies(
    biographies: &Table,
    nationality: &Table,
    codes: &CodeExpander,
    quality: &mut QualityReport,
) -> Result<Biographies> {
    let name_idx = biographies.require_column(PERSON_NAME)?;
    let birth_idx = biographies.column_index("birth_year");
    let death_idx = biographies.column_index("death_year");
    let gender_idx = biographies.column_index("gender");

    let mut heads = Vec::with_capacity(biographies.len());
    let mut blank = 0u64;
    for row in biographies.rows() {
        let Ok(person) = PersonKey::new(at(row, name_idx)) else {
            blank += 1;
            continue;
        };
        let head = PersonHead {
            name: person.as_str().to_string(),
            slug: slugify(person.as_str()),
            birth_year: parse_year(cell(row, birth_idx)),
            death_year: parse_year(cell(row, death_idx)),
            gender: codes.expand(CodeField::Gender, cell(row, gender_idx)),
        };
        heads.push((person, head));
    }
    report_blank_keys(quality, biographies, blank);

    let [nat_name_idx, nat_idx] = nationality.require_columns([PERSON_NAME, PERSON_NAT])?;
    let mut nationalities = Vec::with_capacity(nationality.len());
    let mut blank = 0u64;
    for row in nationality.rows() {
        let Ok(person) = PersonKey::new(at(row, nat_name_idx)) else {
            blank += 1;
            continue;
        };
        nationalities.push((person, codes.expand(CodeField::Country, at(row, nat_idx))));
    }
    report_blank_keys(quality, nationality, blank);

    tracing::debug!(
        people = heads.len(),
        nationalities = nationalities.len(),
        "parsed biographies"
    );
    Ok(Biographies {
        heads,
        nationalities,
    })
}
