//! Library side of the `beast-etl` binary: configuration file handling,
//! logging setup and summary rendering.

pub mod config;
pub mod logging;
pub mod summary;
