//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::BannerKind;
use crate::schedule::DateRangeError;
use crate::value_objects::BannerId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("{kind} banner not found: {id}")]
    BannerNotFound { kind: BannerKind, id: BannerId },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error(transparent)]
    InvalidDateRange(#[from] DateRangeError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown banner kind: {0}")]
    UnknownBannerKind(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn banner_not_found(kind: BannerKind, id: BannerId) -> Self {
        Self::BannerNotFound { kind, id }
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::BannerNotFound { .. } => "UNKNOWN_BANNER",
            Self::InvalidDateRange(_) => "INVALID_DATE_RANGE",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::UnknownBannerKind(_) => "UNKNOWN_BANNER_KIND",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BannerNotFound { .. } | Self::UnknownBannerKind(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDateRange(_) | Self::ValidationError(_)
        )
    }
}
