use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
}
