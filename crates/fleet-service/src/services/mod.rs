//! Business logic services
//!
//! Services borrow a [`ServiceContext`] for the duration of a call and hold
//! no state of their own.

pub mod banner;
pub mod context;
pub mod error;
pub mod health;
pub mod reconcile;

pub use banner::BannerService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use health::HealthService;
pub use reconcile::ReconcileService;
