//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting banners to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreateBannerRequest, SetActiveRequest, UpdateBannerRequest};

pub use responses::{
    BannerResponse, HealthChecks, HealthResponse, PublicBannerResponse,
    ReadinessResponse, ReconcileFailure, ReconcileSummary,
};
