//! Error types for the billing service.

use crate::domain::{Currency, CustomerId};
use crate::ports::ChargerError;

/// Domain-level errors (business rule violations).
///
/// Each variant carries the identifying input so the boundary layer can
/// produce an actionable response.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("phone number [{0}] is not valid")]
    InvalidPhoneNumber(String),

    #[error("phone number [{0}] is taken")]
    PhoneNumberTaken(String),

    #[error("customer with id [{0}] not found")]
    CustomerNotFound(CustomerId),

    #[error("currency [{0}] not supported")]
    UnsupportedCurrency(Currency),

    #[error("card not debited for customer [{0}]")]
    ChargeDeclined(CustomerId),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
///
/// Propagated through the services unmodified; the core never reinterprets
/// a store failure.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Entity not found")]
    NotFound,
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes in the inbound adapter.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payment provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => AppError::Domain(e),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Conflict(e) => AppError::Conflict(e),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
        }
    }
}

impl From<ChargerError> for AppError {
    fn from(err: ChargerError) -> Self {
        match err {
            ChargerError::Unavailable(e) | ChargerError::Provider(e) => {
                AppError::ProviderUnavailable(e)
            }
            ChargerError::InvalidRequest(e) => AppError::BadRequest(e),
        }
    }
}
