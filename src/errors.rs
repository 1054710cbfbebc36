use std::result::Result as StdResult;

use pulse_config::ConfigError as SettingsError;
use pulse_domain::DomainError;
use thiserror::Error;

/// Unified error type for the period, storage and service layers.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, BudgetError>;

impl BudgetError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        BudgetError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<DomainError> for BudgetError {
    fn from(err: DomainError) -> Self {
        BudgetError::InvalidInput(err.to_string())
    }
}

impl From<SettingsError> for BudgetError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Io(io) => BudgetError::StorageError(io.to_string()),
            SettingsError::Serde(message) | SettingsError::Invalid(message) => {
                BudgetError::ConfigError(message)
            }
        }
    }
}
