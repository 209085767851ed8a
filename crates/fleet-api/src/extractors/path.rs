//! Path parameter extractors
//!
//! Type-safe extraction of banner kinds and IDs from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use fleet_core::{BannerId, BannerKind, DomainError};
use serde::Deserialize;

use crate::response::ApiError;

#[derive(Debug, Deserialize)]
struct RawKind {
    kind: String,
}

#[derive(Debug, Deserialize)]
struct RawBanner {
    kind: String,
    banner_id: String,
}

/// `/:kind` segment
#[derive(Debug, Clone, Copy)]
pub struct KindPath(pub BannerKind);

/// `/:kind/:banner_id` segments
#[derive(Debug, Clone, Copy)]
pub struct BannerPath {
    pub kind: BannerKind,
    pub id: BannerId,
}

fn parse_kind(raw: &str) -> Result<BannerKind, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::from(DomainError::UnknownBannerKind(raw.to_string())))
}

#[async_trait]
impl<S> FromRequestParts<S> for KindPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RawKind>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(KindPath(parse_kind(&raw.kind)?))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BannerPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RawBanner>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        let kind = parse_kind(&raw.kind)?;
        let id = BannerId::parse(&raw.banner_id)
            .map_err(|_| ApiError::invalid_path("Invalid banner_id format"))?;

        Ok(BannerPath { kind, id })
    }
}
