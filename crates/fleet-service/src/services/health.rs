//! Health service
//!
//! Liveness is unconditional; readiness requires both banner stores to answer a ping.

use fleet_core::BannerKind;
use tracing::warn;

use crate::dto::{HealthResponse, ReadinessResponse};

use super::context::ServiceContext;

/// Health service
pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn liveness(&self) -> HealthResponse {
        HealthResponse::healthy(self.ctx.now())
    }

    pub async fn readiness(&self) -> ReadinessResponse {
        let mut database_healthy = true;
        for kind in BannerKind::ALL {
            if let Err(e) = self.ctx.banner_repo(kind).ping().await {
                warn!(kind = %kind, error = %e, "Readiness probe failed");
                database_healthy = false;
            }
        }

        ReadinessResponse::ready(database_healthy, self.ctx.now())
    }
}
