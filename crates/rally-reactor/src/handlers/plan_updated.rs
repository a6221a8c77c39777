//! Plan updated handler
//!
//! Diffs the watched fields between snapshots and tells every subscriber
//! what changed. Updates that touch none of the watched fields are
//! silent; an internal counter bump must never page a phone.

use tracing::{debug, instrument};

use rally_core::{join_changed_fields, IntentData, Plan};

use crate::context::ReactorContext;
use crate::error::{HandlerOutcome, ReactorResult, SkipReason};
use crate::resolver;

/// Plan updated handler
pub struct PlanUpdatedHandler<'a> {
    ctx: &'a ReactorContext,
}

impl<'a> PlanUpdatedHandler<'a> {
    /// Create a new PlanUpdatedHandler
    pub fn new(ctx: &'a ReactorContext) -> Self {
        Self { ctx }
    }

    /// Notify all subscribers about the changed fields
    #[instrument(skip(self, before, after), fields(plan_id = %after.id))]
    pub async fn handle(&self, before: &Plan, after: &Plan) -> ReactorResult<HandlerOutcome> {
        let changed = before.changed_fields(after);
        if changed.is_empty() {
            debug!(plan_id = %after.id, "update touched no watched fields");
            return Ok(HandlerOutcome::Skipped(SkipReason::NoWatchedChanges));
        }

        let tokens = resolver::subscriber_tokens(self.ctx, &after.id, None).await?;
        if tokens.is_empty() {
            return Ok(HandlerOutcome::Skipped(SkipReason::NoRecipients));
        }

        let body = format!(
            "\"{}\" changed: {}",
            after.title,
            join_changed_fields(&changed)
        );
        let data = IntentData::plan(after.id.clone());

        let report = self
            .ctx
            .dispatcher()
            .send_multicast(tokens, "Plan updated", &body, data)
            .await;

        Ok(HandlerOutcome::Dispatched(report.attempted()))
    }
}
