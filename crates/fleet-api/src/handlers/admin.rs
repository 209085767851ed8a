//! Admin banner handlers
//!
//! Back-office management of site and ad banners. Every handler requires
//! [`AdminAuth`].

use axum::{extract::State, Json};
use fleet_service::dto::{BannerResponse, CreateBannerRequest, SetActiveRequest, UpdateBannerRequest};
use fleet_service::BannerService;

use crate::extractors::{AdminAuth, BannerPath, KindPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List every banner of a kind with its computed status
///
/// GET /admin/banners/{kind}
pub async fn list_banners(
    State(state): State<AppState>,
    _admin: AdminAuth,
    KindPath(kind): KindPath,
) -> ApiResult<Json<Vec<BannerResponse>>> {
    let service = BannerService::new(state.service_context());
    Ok(Json(service.list(kind).await?))
}

/// Create a banner
///
/// POST /admin/banners/{kind}
pub async fn create_banner(
    State(state): State<AppState>,
    _admin: AdminAuth,
    KindPath(kind): KindPath,
    ValidatedJson(request): ValidatedJson<CreateBannerRequest>,
) -> ApiResult<Created<Json<BannerResponse>>> {
    let service = BannerService::new(state.service_context());
    let response = service.create(kind, request).await?;
    Ok(Created(Json(response)))
}

/// Get one banner
///
/// GET /admin/banners/{kind}/{banner_id}
pub async fn get_banner(
    State(state): State<AppState>,
    _admin: AdminAuth,
    path: BannerPath,
) -> ApiResult<Json<BannerResponse>> {
    let service = BannerService::new(state.service_context());
    Ok(Json(service.get(path.kind, path.id).await?))
}

/// Partially update a banner
///
/// PATCH /admin/banners/{kind}/{banner_id}
pub async fn update_banner(
    State(state): State<AppState>,
    _admin: AdminAuth,
    path: BannerPath,
    ValidatedJson(request): ValidatedJson<UpdateBannerRequest>,
) -> ApiResult<Json<BannerResponse>> {
    let service = BannerService::new(state.service_context());
    Ok(Json(service.update(path.kind, path.id, request).await?))
}

/// Delete a banner
///
/// DELETE /admin/banners/{kind}/{banner_id}
pub async fn delete_banner(
    State(state): State<AppState>,
    _admin: AdminAuth,
    path: BannerPath,
) -> ApiResult<NoContent> {
    let service = BannerService::new(state.service_context());
    service.delete(path.kind, path.id).await?;
    Ok(NoContent)
}

/// Manually activate or deactivate a banner
///
/// PUT /admin/banners/{kind}/{banner_id}/active
pub async fn set_banner_active(
    State(state): State<AppState>,
    _admin: AdminAuth,
    path: BannerPath,
    ValidatedJson(request): ValidatedJson<SetActiveRequest>,
) -> ApiResult<Json<BannerResponse>> {
    let service = BannerService::new(state.service_context());
    Ok(Json(
        service
            .set_active(path.kind, path.id, request.active)
            .await?,
    ))
}
