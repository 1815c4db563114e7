use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Error, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("External service error: {0}")]
    ExternalService(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::InfrastructureError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errs: validator::ValidationErrors) -> Self {
        let mut fields = errs
            .field_errors()
            .into_keys()
            .map(|k| k.to_string())
            .collect::<Vec<_>>();
        fields.sort();
        DomainError::ValidationError(format!("invalid fields: {}", fields.join(", ")))
    }
}
