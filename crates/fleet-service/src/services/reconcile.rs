//! Reconciliation service
//!
//! Walks every scheduled banner and realigns its stored `active` flag with
//! what its window says, unless an administrator deactivated it recently.
//! One pass may be triggered by the background scheduler or on demand.

use fleet_core::{plan_reconciliation, Banner, BannerKind, ReconcileAction};
use tracing::{error, info, instrument, warn};

use crate::dto::{ReconcileFailure, ReconcileSummary};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reconciliation service
pub struct ReconcileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReconcileService<'a> {
    /// Create a new ReconcileService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run one reconciliation pass over both banner kinds.
    ///
    /// Every record is judged against a single instant taken when the run
    /// starts. Failing to load either kind aborts the run; a failed write
    /// for one record is recorded and the pass continues.
    #[instrument(skip(self))]
    pub async fn reconcile(&self) -> ServiceResult<ReconcileSummary> {
        let now = self.ctx.now();
        let mut summary = ReconcileSummary::new(now);

        let mut loaded: Vec<(BannerKind, Vec<Banner>)> = Vec::with_capacity(BannerKind::ALL.len());
        for kind in BannerKind::ALL {
            let banners = self
                .ctx
                .banner_repo(kind)
                .list_scheduled()
                .await
                .map_err(|e| {
                    error!(kind = %kind, error = %e, "Reconciliation aborted: could not load banners");
                    e
                })?;
            loaded.push((kind, banners));
        }

        for (kind, banners) in loaded {
            for banner in &banners {
                self.apply(kind, banner, &mut summary).await;
            }
        }

        info!(
            checked = summary.checked,
            activated = summary.activated,
            deactivated = summary.deactivated,
            skipped = summary.skipped,
            unchanged = summary.unchanged,
            errors = summary.errors.len(),
            "Banner reconciliation finished"
        );

        Ok(summary)
    }

    async fn apply(&self, kind: BannerKind, banner: &Banner, summary: &mut ReconcileSummary) {
        summary.checked += 1;

        match plan_reconciliation(banner, summary.started_at, self.ctx.override_window()) {
            ReconcileAction::Unchanged => summary.unchanged += 1,
            ReconcileAction::Suppressed => {
                summary.skipped += 1;
                summary.skipped_ids.push(banner.id);
            }
            ReconcileAction::SetActive(active) => {
                let repo = self.ctx.banner_repo(kind);
                match repo.update_active(banner.id, active, summary.started_at).await {
                    Ok(()) if active => summary.activated += 1,
                    Ok(()) => summary.deactivated += 1,
                    Err(e) => {
                        warn!(banner_id = %banner.id, kind = %kind, error = %e, "Failed to update banner flag");
                        summary.errors.push(ReconcileFailure {
                            banner_id: banner.id,
                            kind,
                            message: e.to_string(),
                        });
                    }
                }
            }
        }
    }
}
