//! # fleet-core
//!
//! Domain layer for promotional banners: the banner entity, the pure schedule
//! rules that decide what a banner's effective state is at a given instant,
//! the clock abstraction, and the repository port.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod clock;
pub mod entities;
pub mod error;
pub mod schedule;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use entities::{Banner, BannerKind, BannerKindParseError, BannerSchedule, Scheduled};
pub use error::DomainError;
pub use schedule::{
    calculate_status, check_date_range, displayable, is_displayable, is_override_active,
    override_window, parse_instant, plan_reconciliation, validate_date_range, BannerStatus,
    DateBound, DateRange, DateRangeError, ReconcileAction, DEFAULT_OVERRIDE_WINDOW_HOURS,
    MAX_OVERRIDE_WINDOW_HOURS,
};
pub use traits::{BannerRepository, RepoResult};
pub use value_objects::{BannerId, BannerIdParseError};
