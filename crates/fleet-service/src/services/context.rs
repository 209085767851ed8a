//! Service context - dependency container for services
//!
//! Holds the per-kind banner repositories, the clock, and the manual
//! override window.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use fleet_core::{
    override_window, BannerKind, BannerRepository, SharedClock, SystemClock,
    DEFAULT_OVERRIDE_WINDOW_HOURS,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    site_repo: Arc<dyn BannerRepository>,
    ad_repo: Arc<dyn BannerRepository>,

    clock: SharedClock,
    override_window: Duration,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(
        site_repo: Arc<dyn BannerRepository>,
        ad_repo: Arc<dyn BannerRepository>,
        clock: SharedClock,
        override_window: Duration,
    ) -> Self {
        Self {
            site_repo,
            ad_repo,
            clock,
            override_window,
        }
    }

    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the repository serving `kind`
    pub fn banner_repo(&self, kind: BannerKind) -> &dyn BannerRepository {
        match kind {
            BannerKind::Site => self.site_repo.as_ref(),
            BannerKind::Ad => self.ad_repo.as_ref(),
        }
    }

    // === Time ===

    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    /// Current instant from the configured clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// How long a manual deactivation blocks reconciliation
    pub fn override_window(&self) -> Duration {
        self.override_window
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("override_window", &self.override_window)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    site_repo: Option<Arc<dyn BannerRepository>>,
    ad_repo: Option<Arc<dyn BannerRepository>>,
    clock: Option<SharedClock>,
    override_window_hours: i64,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            site_repo: None,
            ad_repo: None,
            clock: None,
            override_window_hours: DEFAULT_OVERRIDE_WINDOW_HOURS,
        }
    }

    pub fn site_repo(mut self, repo: Arc<dyn BannerRepository>) -> Self {
        self.site_repo = Some(repo);
        self
    }

    pub fn ad_repo(mut self, repo: Arc<dyn BannerRepository>) -> Self {
        self.ad_repo = Some(repo);
        self
    }

    /// Defaults to the system clock
    pub fn clock(mut self, clock: SharedClock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn override_window_hours(mut self, hours: i64) -> Self {
        self.override_window_hours = hours;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Misconfigured` if a repository is missing or serves
    /// the wrong kind, or if the override window is out of range
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let site_repo = self
            .site_repo
            .ok_or_else(|| ServiceError::misconfigured("site_repo is required"))?;
        let ad_repo = self
            .ad_repo
            .ok_or_else(|| ServiceError::misconfigured("ad_repo is required"))?;

        for (repo, expected) in [(&site_repo, BannerKind::Site), (&ad_repo, BannerKind::Ad)] {
            if repo.kind() != expected {
                return Err(ServiceError::misconfigured(format!(
                    "{expected} repository serves {} banners",
                    repo.kind()
                )));
            }
        }

        let window = override_window(self.override_window_hours).ok_or_else(|| {
            ServiceError::misconfigured(format!(
                "override window of {} hours is out of range",
                self.override_window_hours
            ))
        })?;

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        Ok(ServiceContext::new(site_repo, ad_repo, clock, window))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
