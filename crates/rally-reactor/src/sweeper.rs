//! Cleanup sweeper - timer-driven cascading removal of expired plans
//!
//! Each tick queries plans scheduled at or before now and deletes each
//! one together with its subscriptions and reverse-index records. Plans
//! are processed sequentially and failures are isolated per plan. The
//! sweep sends no notifications.

use chrono::{DateTime, Utc};
use tracing::{error, info, instrument};

use rally_common::SweepConfig;
use rally_core::CascadeOutcome;

use crate::context::ReactorContext;
use crate::error::ReactorResult;

/// Tally of one sweep run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Expired plans the query returned
    pub scanned: usize,
    /// Plans removed with their subscriptions
    pub deleted: usize,
    /// Plans the cascade refused, e.g. rescheduled past the cutoff by a
    /// concurrent edit
    pub skipped: usize,
    /// Plans whose cascade errored; they stay for the next run
    pub failed: usize,
}

/// Timer-driven cleanup sweeper
pub struct CleanupSweeper {
    ctx: ReactorContext,
    config: SweepConfig,
}

impl CleanupSweeper {
    /// Create a sweeper over a reactor context
    pub fn new(ctx: ReactorContext, config: SweepConfig) -> Self {
        Self { ctx, config }
    }

    /// Run one sweep against the given instant
    ///
    /// # Errors
    /// Fails only when the expired-plans query itself fails; per-plan
    /// cascade errors are logged and counted, never propagated.
    #[instrument(skip(self))]
    pub async fn run_once(&self, now: DateTime<Utc>) -> ReactorResult<SweepReport> {
        let expired = self.ctx.plan_repo().find_expired(now).await?;

        let mut report = SweepReport {
            scanned: expired.len(),
            ..SweepReport::default()
        };

        for plan in &expired {
            match self.ctx.plan_repo().delete_cascade(&plan.id, now).await {
                Ok(CascadeOutcome::Deleted { subscriptions }) => {
                    report.deleted += 1;
                    info!(
                        plan_id = %plan.id,
                        subscriptions,
                        "expired plan removed"
                    );
                }
                Ok(CascadeOutcome::Skipped) => {
                    report.skipped += 1;
                }
                Err(e) => {
                    report.failed += 1;
                    error!(plan_id = %plan.id, error = %e, "cascade failed, plan kept for next sweep");
                }
            }
        }

        Ok(report)
    }

    /// Run sweeps forever on the configured interval
    ///
    /// The first tick fires after one full interval, not at startup.
    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.config.interval());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // Consume the immediate first tick
        interval.tick().await;

        info!(
            interval_secs = self.config.interval_secs,
            timezone = %self.config.timezone,
            "cleanup sweeper started"
        );

        loop {
            interval.tick().await;
            match self.run_once(Utc::now()).await {
                Ok(report) => {
                    info!(
                        scanned = report.scanned,
                        deleted = report.deleted,
                        skipped = report.skipped,
                        failed = report.failed,
                        "sweep finished"
                    );
                }
                Err(e) => {
                    error!(error = %e, "sweep failed, will retry next tick");
                }
            }
        }
    }
}
