//! Banner database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Row of `site_banners` or `ad_banners`; both tables share this layout
#[derive(Debug, Clone, FromRow)]
pub struct BannerModel {
    pub id: Uuid,
    pub title: Option<String>,
    pub image_url: String,
    pub redirect_url: Option<String>,
    pub active: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub manually_deactivated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BannerModel {
    /// Columns selected by every banner query, in struct order
    pub const COLUMNS: &'static str = "id, title, image_url, redirect_url, active, start_date, \
        end_date, manually_deactivated_at, created_at, updated_at";
}
