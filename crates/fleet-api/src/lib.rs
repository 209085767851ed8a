//! # fleet-api
//!
//! REST API server built with Axum: the public banner feed, the admin
//! back office, and the background reconciliation scheduler.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod scheduler;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
