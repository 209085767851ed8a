//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use fleet_core::{BannerId, BannerKind, BannerStatus};
use serde::Serialize;

// ============================================================================
// Banner Responses
// ============================================================================

/// Administrator view of a banner, with its computed status
#[derive(Debug, Clone, Serialize)]
pub struct BannerResponse {
    pub id: BannerId,
    pub kind: BannerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    pub active: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub manually_deactivated_at: Option<DateTime<Utc>>,
    pub status: BannerStatus,
    /// Reconciliation will leave this banner's flag alone for now
    pub override_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a displayable banner
#[derive(Debug, Clone, Serialize)]
pub struct PublicBannerResponse {
    pub id: BannerId,
    pub kind: BannerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

// ============================================================================
// Reconciliation Responses
// ============================================================================

/// Outcome of one reconciliation run
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileSummary {
    /// The instant every record in this run was evaluated against
    pub started_at: DateTime<Utc>,
    pub checked: usize,
    pub activated: usize,
    pub deactivated: usize,
    /// Drifted records left alone because of a recent manual deactivation
    pub skipped: usize,
    pub unchanged: usize,
    pub skipped_ids: Vec<BannerId>,
    pub errors: Vec<ReconcileFailure>,
}

/// A record whose flag write failed
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileFailure {
    pub banner_id: BannerId,
    pub kind: BannerKind,
    pub message: String,
}

impl ReconcileSummary {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            checked: 0,
            activated: 0,
            deactivated: 0,
            skipped: 0,
            unchanged: 0,
            skipped_ids: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Number of flag writes that succeeded
    pub fn writes(&self) -> usize {
        self.activated + self.deactivated
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy(now: DateTime<Utc>) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: now,
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, now: DateTime<Utc>) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: now,
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
