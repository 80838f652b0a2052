use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("empty {kind}")]
    EmptyKey { kind: &'static str },
}
