//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use fleet_common::{AppConfig, AppError, AppResult};
use fleet_core::{BannerKind, BannerRepository, SystemClock};
use fleet_db::{create_pool, run_migrations, MemoryBannerRepository, PgBannerRepository};
use fleet_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::scheduler::spawn_reconciler;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes get the base stack only so probes are never rate limited.
pub fn create_app(state: AppState) -> AppResult<Router> {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes());

    Ok(api.merge(health).with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    let (site_repo, ad_repo): (Arc<dyn BannerRepository>, Arc<dyn BannerRepository>) =
        match &config.database {
            Some(db_config) => {
                info!("Connecting to PostgreSQL...");
                let pool = create_pool(db_config)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                info!("PostgreSQL connection established");

                if db_config.run_migrations {
                    run_migrations(&pool)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?;
                }

                (
                    Arc::new(PgBannerRepository::new(pool.clone(), BannerKind::Site)),
                    Arc::new(PgBannerRepository::new(pool, BannerKind::Ad)),
                )
            }
            None => {
                warn!("DATABASE_URL not set; banners are kept in memory and lost on exit");
                (
                    Arc::new(MemoryBannerRepository::new(BannerKind::Site)),
                    Arc::new(MemoryBannerRepository::new(BannerKind::Ad)),
                )
            }
        };

    if config.admin.api_token.is_none() {
        warn!("ADMIN_API_TOKEN not set; admin routes are open");
    }

    let service_context = ServiceContextBuilder::new()
        .site_repo(site_repo)
        .ad_repo(ad_repo)
        .clock(Arc::new(SystemClock))
        .override_window_hours(config.reconcile.override_window_hours)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until Ctrl+C
pub async fn run_server(app: Router, addr: SocketAddr) -> AppResult<()> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {}", e)))?;

    // Create app state
    let state = create_app_state(config).await?;

    // Start the reconciliation scheduler alongside the HTTP server
    let reconciler = spawn_reconciler(state.shared_context(), &state.config().reconcile);

    // Build application
    let app = create_app(state)?;

    // Run server
    let result = run_server(app, addr).await;

    if let Some(handle) = reconciler {
        handle.abort();
        info!("Banner reconciliation scheduler stopped");
    }

    result
}
