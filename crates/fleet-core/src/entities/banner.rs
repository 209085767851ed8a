//! Banner entity - a promotional record with an optional display window
//!
//! Site banners and ad banners are stored separately but share the same
//! temporal fields, so both are represented by one [`Banner`] shape tagged
//! with a [`BannerKind`]. The schedule rules only ever look at the four
//! fields exposed through [`Scheduled`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::BannerId;

/// The two banner variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    /// Site-wide promotional banner
    Site,
    /// Advertisement banner
    Ad,
}

impl BannerKind {
    pub const ALL: [Self; 2] = [Self::Site, Self::Ad];

    /// Path segment and log label
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Site => "site",
            Self::Ad => "ad",
        }
    }

    /// Backing table for this kind
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Site => "site_banners",
            Self::Ad => "ad_banners",
        }
    }
}

impl fmt::Display for BannerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a BannerKind from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown banner kind: {0}")]
pub struct BannerKindParseError(pub String);

impl std::str::FromStr for BannerKind {
    type Err = BannerKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "site" => Ok(Self::Site),
            "ad" | "ads" => Ok(Self::Ad),
            _ => Err(BannerKindParseError(s.to_string())),
        }
    }
}

/// Read access to the temporal fields of a banner-like record
pub trait Scheduled {
    fn active(&self) -> bool;
    fn start_date(&self) -> Option<DateTime<Utc>>;
    fn end_date(&self) -> Option<DateTime<Utc>>;
    fn manually_deactivated_at(&self) -> Option<DateTime<Utc>>;

    /// Whether at least one bound is set
    fn has_schedule(&self) -> bool {
        self.start_date().is_some() || self.end_date().is_some()
    }
}

/// Snapshot of just the schedule-relevant fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BannerSchedule {
    pub active: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub manually_deactivated_at: Option<DateTime<Utc>>,
}

impl BannerSchedule {
    /// An active schedule with the given bounds
    pub fn new(start_date: Option<DateTime<Utc>>, end_date: Option<DateTime<Utc>>) -> Self {
        Self {
            active: true,
            start_date,
            end_date,
            manually_deactivated_at: None,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_manually_deactivated_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.manually_deactivated_at = at;
        self
    }
}

impl Scheduled for BannerSchedule {
    fn active(&self) -> bool {
        self.active
    }

    fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    fn manually_deactivated_at(&self) -> Option<DateTime<Utc>> {
        self.manually_deactivated_at
    }
}

/// Banner entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: BannerId,
    pub kind: BannerKind,
    pub title: Option<String>,
    pub image_url: String,
    pub redirect_url: Option<String>,
    pub active: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Set by an administrator deactivation, cleared on reactivation
    pub manually_deactivated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Banner {
    /// Create a new active, unscheduled Banner
    pub fn new(kind: BannerKind, image_url: String, now: DateTime<Utc>) -> Self {
        Self {
            id: BannerId::generate(),
            kind,
            title: None,
            image_url,
            redirect_url: None,
            active: true,
            start_date: None,
            end_date: None,
            manually_deactivated_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_redirect_url(mut self, redirect_url: Option<String>) -> Self {
        self.redirect_url = redirect_url;
        self
    }

    /// Set the display window. Callers validate the range first.
    pub fn with_dates(
        mut self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Administrator toggle: deactivation stamps `now`, activation clears the stamp
    pub fn set_active_manually(&mut self, active: bool, now: DateTime<Utc>) {
        self.active = active;
        self.manually_deactivated_at = if active { None } else { Some(now) };
        self.updated_at = now;
    }

    /// Copy of the schedule-relevant fields
    pub fn schedule(&self) -> BannerSchedule {
        BannerSchedule {
            active: self.active,
            start_date: self.start_date,
            end_date: self.end_date,
            manually_deactivated_at: self.manually_deactivated_at,
        }
    }
}

impl Scheduled for Banner {
    fn active(&self) -> bool {
        self.active
    }

    fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    fn manually_deactivated_at(&self) -> Option<DateTime<Utc>> {
        self.manually_deactivated_at
    }
}
