//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. One repository instance serves one
//! [`BannerKind`]; site and ad banners each get their own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Banner, BannerKind};
use crate::error::DomainError;
use crate::value_objects::BannerId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait BannerRepository: Send + Sync {
    /// Which banner table this repository serves
    fn kind(&self) -> BannerKind;

    /// Cheap connectivity check for readiness probes
    async fn ping(&self) -> RepoResult<()>;

    /// Find banner by ID
    async fn find_by_id(&self, id: BannerId) -> RepoResult<Option<Banner>>;

    /// List every banner, newest first
    async fn list(&self) -> RepoResult<Vec<Banner>>;

    /// List banners whose flag is on; the caller still applies the display filter
    async fn list_active(&self) -> RepoResult<Vec<Banner>>;

    /// List banners with at least one of start_date / end_date set
    async fn list_scheduled(&self) -> RepoResult<Vec<Banner>>;

    /// Insert a new banner
    async fn create(&self, banner: &Banner) -> RepoResult<()>;

    /// Overwrite payload, dates, flag and override stamp
    async fn update(&self, banner: &Banner) -> RepoResult<()>;

    /// Reconciliation write: change the flag only, leave the override stamp untouched.
    /// `updated_at` is set to `at`.
    async fn update_active(&self, id: BannerId, active: bool, at: DateTime<Utc>) -> RepoResult<()>;

    /// Administrator toggle: write the flag together with its override stamp.
    /// `updated_at` is set to `at`.
    async fn set_active_manual(
        &self,
        id: BannerId,
        active: bool,
        manually_deactivated_at: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Delete a banner
    async fn delete(&self, id: BannerId) -> RepoResult<()>;
}
