//! Public banner handlers
//!
//! The storefront reads banners through here; the schedule is applied on
//! every request.

use axum::{extract::State, Json};
use fleet_service::dto::PublicBannerResponse;
use fleet_service::BannerService;

use crate::extractors::KindPath;
use crate::response::ApiResult;
use crate::state::AppState;

/// Banners that should be displayed now
///
/// GET /banners/{kind}
pub async fn list_displayable(
    State(state): State<AppState>,
    KindPath(kind): KindPath,
) -> ApiResult<Json<Vec<PublicBannerResponse>>> {
    let service = BannerService::new(state.service_context());
    let banners = service.list_displayable(kind).await?;
    Ok(Json(banners))
}
