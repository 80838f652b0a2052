//! Code expansion for coded source columns.
//!
//! Source tables store controlled vocabulary as short codes (`COM`, `F`,
//! `FR`). Each coded field has a lookup table mapping code to description;
//! [`CodeExpander`] resolves codes against those tables and memoizes the
//! answers for the rest of the run.

mod error;
mod expander;
mod field;
mod table;

pub use error::{CodeError, Result};
pub use expander::{CodeExpander, UNKNOWN};
pub use field::{CodeField, UnknownField};
pub use table::{CodeTable, load_code_table};
