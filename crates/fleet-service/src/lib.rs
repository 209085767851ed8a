//! # fleet-service
//!
//! Application layer: banner management use cases, the read-path display
//! filter, and the reconciliation job that realigns stored flags with
//! banner schedules.

pub mod dto;
pub mod services;

pub use services::{
    BannerService, HealthService, ReconcileService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
