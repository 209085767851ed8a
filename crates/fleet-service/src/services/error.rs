//! Service layer error types
//!
//! Not-found is lifted out of [`DomainError`] so handlers can match on the
//! banner kind and id directly.

use fleet_common::AppError;
use fleet_core::{BannerId, BannerKind, DomainError};
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or repository failure
    Domain(DomainError),

    /// Banner does not exist in the table for its kind
    BannerNotFound { kind: BannerKind, id: BannerId },

    /// Request payload failed `validator` checks
    Validation(String),

    /// Service context wired with missing or mismatched collaborators
    Misconfigured(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::BannerNotFound { kind, id } => write!(f, "{kind} banner not found: {id}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Misconfigured(msg) => write!(f, "Service misconfigured: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    pub fn banner_not_found(kind: BannerKind, id: BannerId) -> Self {
        Self::BannerNotFound { kind, id }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn misconfigured(msg: impl Into<String>) -> Self {
        Self::Misconfigured(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => fleet_common::error::domain_status_code(e),
            Self::BannerNotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Misconfigured(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::BannerNotFound { .. } => "UNKNOWN_BANNER",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Misconfigured(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::BannerNotFound { kind, id } => Self::BannerNotFound { kind, id },
            other => Self::Domain(other),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::BannerNotFound { kind, id } => {
                AppError::Domain(DomainError::banner_not_found(kind, id))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Misconfigured(msg) => AppError::Config(msg),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
