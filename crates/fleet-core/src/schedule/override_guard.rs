//! Manual-override guard
//!
//! After an administrator deactivates a banner, automatic reconciliation must
//! leave the flag alone for a grace window. The stamp never affects display.

use chrono::{DateTime, Duration, Utc};

/// Default grace window after a manual deactivation
pub const DEFAULT_OVERRIDE_WINDOW_HOURS: i64 = 24;

/// Longest grace window accepted from configuration (one year)
pub const MAX_OVERRIDE_WINDOW_HOURS: i64 = 24 * 365;

/// Build the override window from an hour count.
///
/// Returns `None` for negative counts and counts above
/// [`MAX_OVERRIDE_WINDOW_HOURS`].
pub fn override_window(hours: i64) -> Option<Duration> {
    if !(0..=MAX_OVERRIDE_WINDOW_HOURS).contains(&hours) {
        return None;
    }
    Duration::try_hours(hours)
}

/// True iff a manual deactivation happened less than `window` before `now`
pub fn is_override_active(
    manually_deactivated_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    window: Duration,
) -> bool {
    manually_deactivated_at.is_some_and(|at| now - at < window)
}
