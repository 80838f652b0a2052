//! Entity builders.
//!
//! Turn the loaded source tables into flat, id-keyed records for the
//! aggregator. Every coded column is expanded here, through the shared
//! [`beast_codes::CodeExpander`]; later stages never see a raw code.

pub mod biography;
pub mod build;
pub mod character;
pub mod datetime;
pub mod error;
pub mod film;
mod keys;
pub mod record;
pub mod role;
pub mod slug;
pub mod sources;

pub use build::{Built, build_records};
pub use error::{Result, TransformError};
pub use record::{FilmField, FilmHead, FilmRecord, PersonField, PersonHead, PersonRecord};
pub use role::RoleLookup;
pub use slug::slugify;
pub use sources::{SourceTables, names};
