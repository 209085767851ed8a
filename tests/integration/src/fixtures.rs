//! Test fixtures and data generators
//!
//! Request bodies the tests send and the response shapes they read back.

use chrono::{DateTime, Duration, Utc};
use fleet_core::{Banner, BannerKind};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::helpers::test_now;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Create banner request
#[derive(Debug, Clone, Serialize)]
pub struct CreateBanner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl CreateBanner {
    /// An active banner with no schedule
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: Some(format!("Banner {suffix}")),
            image_url: format!("/uploads/banner-{suffix}.png"),
            redirect_url: Some("https://fleet.example/sale".to_string()),
            active: true,
            start_date: None,
            end_date: None,
        }
    }

    pub fn window(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_date = start.map(String::from);
        self.end_date = end.map(String::from);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Administrator view of a banner
#[derive(Debug, Deserialize)]
pub struct BannerView {
    pub id: String,
    pub kind: String,
    pub title: Option<String>,
    pub image_url: String,
    pub redirect_url: Option<String>,
    pub active: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub manually_deactivated_at: Option<DateTime<Utc>>,
    pub status: String,
    pub override_active: bool,
}

/// Storefront view of a banner
#[derive(Debug, Deserialize)]
pub struct PublicBannerView {
    pub id: String,
    pub kind: String,
    pub image_url: String,
    pub end_date: Option<DateTime<Utc>>,
}

/// Reconciliation run outcome
#[derive(Debug, Deserialize)]
pub struct ReconcileView {
    pub started_at: DateTime<Utc>,
    pub checked: usize,
    pub activated: usize,
    pub deactivated: usize,
    pub skipped: usize,
    pub unchanged: usize,
    pub skipped_ids: Vec<String>,
    pub errors: Vec<serde_json::Value>,
}

/// Error envelope returned on every failure
#[derive(Debug, Deserialize)]
pub struct ErrorView {
    pub error: ErrorDetailView,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetailView {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// A stored banner whose window is given relative to [`test_now`]
pub fn scheduled_banner(
    kind: BannerKind,
    active: bool,
    start: Option<Duration>,
    end: Option<Duration>,
) -> Banner {
    let now = test_now();
    let mut banner = Banner::new(
        kind,
        format!("/uploads/seeded-{}.png", unique_suffix()),
        now - Duration::days(30),
    )
    .with_dates(start.map(|d| now + d), end.map(|d| now + d));
    banner.active = active;
    banner
}
