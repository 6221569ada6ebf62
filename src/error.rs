use crate::domain::money::Money;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Invalid {field}: {reason}")]
    ValidationError { field: &'static str, reason: String },
    #[error("Insufficient funds: short by {shortfall}")]
    InsufficientFunds { shortfall: Money },
    #[error("Storage error: {0}")]
    StorageError(#[from] rusqlite::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("No payment recorded with id {0}")]
    NotFound(i64),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl PaymentError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
