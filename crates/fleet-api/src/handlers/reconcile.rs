//! Manual reconciliation trigger

use axum::{extract::State, Json};
use fleet_service::dto::ReconcileSummary;
use fleet_service::ReconcileService;

use crate::extractors::AdminAuth;
use crate::response::ApiResult;
use crate::state::AppState;

/// Run a reconciliation pass now and return its summary
///
/// POST /admin/reconcile
pub async fn run_reconciliation(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> ApiResult<Json<ReconcileSummary>> {
    let service = ReconcileService::new(state.service_context());
    Ok(Json(service.reconcile().await?))
}
