//! Banner schedule rules
//!
//! All temporal decisions live here as pure functions of a banner snapshot
//! and an instant:
//!
//! - [`calculate_status`] - the single source of truth for lifecycle state
//! - [`is_displayable`] - read-path yes/no, derived from the status
//! - [`validate_date_range`] / [`check_date_range`] - write-path gate
//! - [`is_override_active`] - manual deactivation grace window
//! - [`plan_reconciliation`] - what the reconciliation job should do for one record

mod date_range;
mod override_guard;
mod reconcile;
mod status;

pub use date_range::{check_date_range, parse_instant, validate_date_range, DateBound, DateRange, DateRangeError};
pub use override_guard::{
    is_override_active, override_window, DEFAULT_OVERRIDE_WINDOW_HOURS, MAX_OVERRIDE_WINDOW_HOURS,
};
pub use reconcile::{plan_reconciliation, ReconcileAction};
pub use status::{calculate_status, displayable, is_displayable, BannerStatus};
