use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate food name in catalog: {0}")]
    DuplicateFoodName(String),
}
