//! Banner service
//!
//! Administrator write path (create, update, toggle, delete), admin views
//! with computed status, and the public read path that filters by schedule.

use fleet_core::{
    check_date_range, displayable, validate_date_range, Banner, BannerId, BannerKind,
    DomainError,
};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{BannerResponse, CreateBannerRequest, PublicBannerResponse, UpdateBannerRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Banner service
pub struct BannerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BannerService<'a> {
    /// Create a new BannerService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a banner. Creating it inactive counts as a manual deactivation.
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        kind: BannerKind,
        request: CreateBannerRequest,
    ) -> ServiceResult<BannerResponse> {
        request.validate()?;
        let range = validate_date_range(request.start_date.as_deref(), request.end_date.as_deref())
            .map_err(DomainError::from)?;

        let now = self.ctx.now();
        let mut banner = Banner::new(kind, request.image_url.trim().to_string(), now)
            .with_title(non_blank(request.title))
            .with_redirect_url(non_blank(request.redirect_url))
            .with_dates(range.start, range.end);
        if !request.active {
            banner.set_active_manually(false, now);
        }

        self.ctx.banner_repo(kind).create(&banner).await?;

        info!(banner_id = %banner.id, kind = %kind, active = banner.active, "Banner created");

        Ok(self.respond(&banner, now))
    }

    /// Partially update a banner; the merged date range is revalidated
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        kind: BannerKind,
        id: BannerId,
        request: UpdateBannerRequest,
    ) -> ServiceResult<BannerResponse> {
        request.validate()?;

        // Parse whatever bounds were supplied so errors name the offending field
        let supplied = validate_date_range(
            request.start_date.as_ref().and_then(|v| v.as_deref()),
            request.end_date.as_ref().and_then(|v| v.as_deref()),
        )
        .map_err(DomainError::from)?;

        let mut banner = self.load(kind, id).await?;
        let now = self.ctx.now();

        if request.start_date.is_some() {
            banner.start_date = supplied.start;
        }
        if request.end_date.is_some() {
            banner.end_date = supplied.end;
        }
        check_date_range(banner.start_date, banner.end_date).map_err(DomainError::from)?;

        if let Some(title) = request.title {
            banner.title = non_blank(Some(title));
        }
        if let Some(image_url) = request.image_url {
            banner.image_url = image_url.trim().to_string();
        }
        if let Some(redirect_url) = request.redirect_url {
            banner.redirect_url = non_blank(Some(redirect_url));
        }
        // An explicit flag is a manual action even when it matches the stored one
        match request.active {
            Some(active) => banner.set_active_manually(active, now),
            None => banner.updated_at = now,
        }

        self.ctx.banner_repo(kind).update(&banner).await?;

        info!(banner_id = %id, kind = %kind, "Banner updated");

        Ok(self.respond(&banner, now))
    }

    /// Administrator toggle.
    ///
    /// Deactivating always stamps the current instant, restarting the
    /// override window; activating clears the stamp.
    #[instrument(skip(self))]
    pub async fn set_active(
        &self,
        kind: BannerKind,
        id: BannerId,
        active: bool,
    ) -> ServiceResult<BannerResponse> {
        let mut banner = self.load(kind, id).await?;
        let now = self.ctx.now();
        banner.set_active_manually(active, now);

        self.ctx
            .banner_repo(kind)
            .set_active_manual(id, active, banner.manually_deactivated_at, now)
            .await?;

        info!(banner_id = %id, kind = %kind, active, "Banner toggled manually");

        Ok(self.respond(&banner, now))
    }

    /// Delete a banner
    #[instrument(skip(self))]
    pub async fn delete(&self, kind: BannerKind, id: BannerId) -> ServiceResult<()> {
        self.ctx.banner_repo(kind).delete(id).await?;

        info!(banner_id = %id, kind = %kind, "Banner deleted");
        Ok(())
    }

    /// Get one banner with its computed status
    #[instrument(skip(self))]
    pub async fn get(&self, kind: BannerKind, id: BannerId) -> ServiceResult<BannerResponse> {
        let banner = self.load(kind, id).await?;
        Ok(self.respond(&banner, self.ctx.now()))
    }

    /// Every banner of `kind`, newest first, with computed status
    #[instrument(skip(self))]
    pub async fn list(&self, kind: BannerKind) -> ServiceResult<Vec<BannerResponse>> {
        let banners = self.ctx.banner_repo(kind).list().await?;
        let now = self.ctx.now();

        Ok(banners.iter().map(|b| self.respond(b, now)).collect())
    }

    /// Banners that should be shown right now.
    ///
    /// The schedule is applied at read time, so an expired banner disappears
    /// even if reconciliation has not yet cleared its flag.
    #[instrument(skip(self))]
    pub async fn list_displayable(
        &self,
        kind: BannerKind,
    ) -> ServiceResult<Vec<PublicBannerResponse>> {
        let candidates = self.ctx.banner_repo(kind).list_active().await?;
        let now = self.ctx.now();

        Ok(displayable(&candidates, now)
            .into_iter()
            .map(PublicBannerResponse::from)
            .collect())
    }

    async fn load(&self, kind: BannerKind, id: BannerId) -> ServiceResult<Banner> {
        self.ctx
            .banner_repo(kind)
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::banner_not_found(kind, id))
    }

    fn respond(&self, banner: &Banner, now: chrono::DateTime<chrono::Utc>) -> BannerResponse {
        BannerResponse::at(banner, now, self.ctx.override_window())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
