//! Document model for the film/biography corpus.
//!
//! Every entity comes in two shapes. The full shape ([`Film`], [`Person`]) is
//! a top-level document. The summary shape ([`FilmSummary`],
//! [`PersonSummary`]) is what gets embedded inside the other collection; it
//! has no fields pointing back across the relation, so embedding stops after
//! one hop by construction.

pub mod character;
pub mod document;
pub mod embed;
pub mod error;
pub mod film;
pub mod ids;
pub mod person;
pub mod quality;

pub use character::{
    AgeBracket, CharacterAge, CharacterTraits, FilmCharacter, PersonCharacter,
};
pub use document::{CleanDocument, Collections, Document};
pub use embed::{Embedded, Identified};
pub use error::ModelError;
pub use film::{Film, FilmSummary, Localized, Media, Production, Release, ReleaseSummary};
pub use ids::{CharacterId, CharacterRef, FilmId, PersonKey};
pub use person::{Person, PersonSummary};
pub use quality::{IssueKind, QualityIssue, QualityReport};
