//! Per-record reconciliation decision
//!
//! The I/O side of reconciliation lives in the service layer; this module only
//! decides, for one snapshot and one instant, what should happen to its flag.

use chrono::{DateTime, Duration, Utc};

use crate::entities::Scheduled;

use super::override_guard::is_override_active;
use super::status::is_displayable;

/// Outcome of reconciling one banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// Stored flag already matches the schedule
    Unchanged,
    /// Flag has drifted but a manual deactivation is still inside its window
    Suppressed,
    /// Write this value to the stored flag
    SetActive(bool),
}

/// Decide what reconciliation should do with `banner` at `now`
pub fn plan_reconciliation<S: Scheduled + ?Sized>(
    banner: &S,
    now: DateTime<Utc>,
    override_window: Duration,
) -> ReconcileAction {
    // The expectation comes from the dates alone; the stored flag is what we are correcting.
    let expected = is_displayable(&WindowOnly(banner), now);

    if banner.active() == expected {
        ReconcileAction::Unchanged
    } else if is_override_active(banner.manually_deactivated_at(), now, override_window) {
        ReconcileAction::Suppressed
    } else {
        ReconcileAction::SetActive(expected)
    }
}

/// View of a banner with its flag forced on, so only its window is evaluated
struct WindowOnly<'a, S: ?Sized>(&'a S);

impl<S: Scheduled + ?Sized> Scheduled for WindowOnly<'_, S> {
    fn active(&self) -> bool {
        true
    }

    fn start_date(&self) -> Option<DateTime<Utc>> {
        self.0.start_date()
    }

    fn end_date(&self) -> Option<DateTime<Utc>> {
        self.0.end_date()
    }

    fn manually_deactivated_at(&self) -> Option<DateTime<Utc>> {
        self.0.manually_deactivated_at()
    }
}
