//! Banner status calculator and display filter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::Scheduled;

/// Lifecycle state of a banner at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerStatus {
    /// Start date is in the future
    Scheduled,
    /// Inside its window
    Active,
    /// End date has passed
    Expired,
    /// Switched off (by an administrator or by reconciliation)
    Paused,
    /// Active with no bounds at all
    NoSchedule,
}

impl BannerStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Paused => "paused",
            Self::NoSchedule => "no_schedule",
        }
    }

    /// Whether a banner in this state is shown to end users
    #[inline]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Active | Self::NoSchedule)
    }
}

impl fmt::Display for BannerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the lifecycle state of `banner` at `now`.
///
/// The start bound is inclusive and the end bound is exclusive: at exactly
/// `start_date` the banner has started, at exactly `end_date` it has ended.
pub fn calculate_status<S: Scheduled + ?Sized>(banner: &S, now: DateTime<Utc>) -> BannerStatus {
    // An inactive banner is paused whether or not its window is currently open.
    if !banner.active() {
        return BannerStatus::Paused;
    }

    let start = banner.start_date();
    let end = banner.end_date();

    if start.is_none() && end.is_none() {
        return BannerStatus::NoSchedule;
    }
    if start.is_some_and(|start| now < start) {
        return BannerStatus::Scheduled;
    }
    if end.is_some_and(|end| now >= end) {
        return BannerStatus::Expired;
    }
    BannerStatus::Active
}

/// Whether `banner` should be rendered to end users at `now`
#[inline]
pub fn is_displayable<S: Scheduled + ?Sized>(banner: &S, now: DateTime<Utc>) -> bool {
    calculate_status(banner, now).is_live()
}

/// Keep only the banners displayable at `now`, preserving order
pub fn displayable<S: Scheduled>(banners: &[S], now: DateTime<Utc>) -> Vec<&S> {
    banners.iter().filter(|b| is_displayable(*b, now)).collect()
}
