use std::fmt;
use std::str::FromStr;

/// A coded field. Each field has its own code table, `<codes_dir>/<name>.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CodeField {
    ReleaseType,
    FilmType,
    Genre,
    Country,
    ProductionShare,
    Gender,
    Age,
    Sexuality,
    Origin,
    Class,
    ProfessionalStatus,
    Ability,
    AssistedMobility,
    RoleClass,
}

impl CodeField {
    pub const ALL: [Self; 14] = [
        Self::ReleaseType,
        Self::FilmType,
        Self::Genre,
        Self::Country,
        Self::ProductionShare,
        Self::Gender,
        Self::Age,
        Self::Sexuality,
        Self::Origin,
        Self::Class,
        Self::ProfessionalStatus,
        Self::Ability,
        Self::AssistedMobility,
        Self::RoleClass,
    ];

    /// Table name, also the file stem of the code table.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReleaseType => "release_type",
            Self::FilmType => "film_type",
            Self::Genre => "genre",
            Self::Country => "country",
            Self::ProductionShare => "prod_share",
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Sexuality => "sexuality",
            Self::Origin => "origin",
            Self::Class => "class",
            Self::ProfessionalStatus => "professional_status",
            Self::Ability => "ability",
            Self::AssistedMobility => "assisted_mobility",
            Self::RoleClass => "role_class",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl fmt::Display for CodeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown code field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for CodeField {
    type Err = UnknownField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownField(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_table_name() {
        for field in CodeField::ALL {
            assert_eq!(field.as_str().parse::<CodeField>(), Ok(field));
        }
        assert_eq!("GENRE".parse::<CodeField>(), Ok(CodeField::Genre));
        assert!("colour".parse::<CodeField>().is_err());
    }
}
