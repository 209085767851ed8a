//! Background reconciliation scheduler
//!
//! Runs one reconciliation pass per configured interval for as long as the
//! server is up. A failed pass is logged and the next tick tries again.

use std::sync::Arc;
use std::time::Duration;

use fleet_common::{ReconcileConfig, MAX_RECONCILE_INTERVAL_SECS};
use fleet_service::{ReconcileService, ServiceContext};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

/// Spawn the periodic reconciliation task.
///
/// Returns `None` when reconciliation is disabled. The first pass runs
/// immediately if `run_on_startup` is set, otherwise one interval from now.
pub fn spawn_reconciler(
    ctx: Arc<ServiceContext>,
    config: &ReconcileConfig,
) -> Option<JoinHandle<()>> {
    if !config.enabled {
        info!("Banner reconciliation scheduler disabled");
        return None;
    }

    let period = Duration::from_secs(config.interval_secs.clamp(1, MAX_RECONCILE_INTERVAL_SECS));
    let now = Instant::now();
    let start = if config.run_on_startup {
        now
    } else {
        now.checked_add(period).unwrap_or(now)
    };

    info!(
        interval_secs = period.as_secs(),
        run_on_startup = config.run_on_startup,
        "Banner reconciliation scheduler started"
    );

    Some(tokio::spawn(async move {
        let mut ticker = interval_at(start, period);
        // A pass that overruns its slot should not trigger a burst of catch-up runs
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            run_once(&ctx).await;
        }
    }))
}

async fn run_once(ctx: &ServiceContext) {
    match ReconcileService::new(ctx).reconcile().await {
        Ok(summary) if summary.is_clean() => {
            info!(writes = summary.writes(), "Scheduled reconciliation completed");
        }
        Ok(summary) => {
            error!(
                writes = summary.writes(),
                failures = summary.errors.len(),
                "Scheduled reconciliation completed with failures"
            );
        }
        Err(e) => {
            error!(error = %e, "Scheduled reconciliation failed");
        }
    }
}
