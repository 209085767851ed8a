//! Configuration structs

mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    RateLimitConfig, ReconcileConfig, ServerConfig, MAX_RECONCILE_INTERVAL_SECS,
};
