//! Banner to DTO mappers

use chrono::{DateTime, Duration, Utc};
use fleet_core::{calculate_status, is_override_active, Banner};

use super::responses::{BannerResponse, PublicBannerResponse};

impl BannerResponse {
    /// Administrator view of `banner` as seen at `now`
    pub fn at(banner: &Banner, now: DateTime<Utc>, override_window: Duration) -> Self {
        Self {
            id: banner.id,
            kind: banner.kind,
            title: banner.title.clone(),
            image_url: banner.image_url.clone(),
            redirect_url: banner.redirect_url.clone(),
            active: banner.active,
            start_date: banner.start_date,
            end_date: banner.end_date,
            manually_deactivated_at: banner.manually_deactivated_at,
            status: calculate_status(banner, now),
            override_active: is_override_active(banner.manually_deactivated_at, now, override_window),
            created_at: banner.created_at,
            updated_at: banner.updated_at,
        }
    }
}

impl From<&Banner> for PublicBannerResponse {
    fn from(banner: &Banner) -> Self {
        Self {
            id: banner.id,
            kind: banner.kind,
            title: banner.title.clone(),
            image_url: banner.image_url.clone(),
            redirect_url: banner.redirect_url.clone(),
            end_date: banner.end_date,
        }
    }
}

impl From<Banner> for PublicBannerResponse {
    fn from(banner: Banner) -> Self {
        Self::from(&banner)
    }
}
