//! Route definitions
//!
//! Public and admin routes are mounted under /api/v1; health routes sit at
//! the root so they can skip rate limiting.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{admin, banners, health, reconcile};
use crate::state::AppState;

/// Create the main API router (health routes excluded)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .nest("/admin", admin_routes())
}

/// Storefront routes
fn public_routes() -> Router<AppState> {
    Router::new().route("/banners/:kind", get(banners::list_displayable))
}

/// Back-office routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/banners/:kind",
            get(admin::list_banners).post(admin::create_banner),
        )
        .route(
            "/banners/:kind/:banner_id",
            get(admin::get_banner)
                .patch(admin::update_banner)
                .delete(admin::delete_banner),
        )
        .route("/banners/:kind/:banner_id/active", put(admin::set_banner_active))
        .route("/reconcile", post(reconcile::run_reconciliation))
}
