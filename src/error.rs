//! Error types for the contacts service

use thiserror::Error;

use crate::types::FieldError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Contact not found: {0}")]
    ContactNotFound(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn not_found(id: impl Into<String>) -> Self {
        Error::ContactNotFound(id.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// Errors caused by the caller rather than by the service itself.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::ContactNotFound(_) | Error::Validation(_))
    }
}
