//! Plan deleted handler
//!
//! Tells the subscribers still present at deletion time that the plan is
//! gone. The plan's fields come from the before snapshot; the document
//! itself no longer exists.

use tracing::instrument;

use rally_core::{IntentData, Plan};

use crate::context::ReactorContext;
use crate::error::{HandlerOutcome, ReactorResult, SkipReason};
use crate::resolver;

/// Plan deleted handler
pub struct PlanDeletedHandler<'a> {
    ctx: &'a ReactorContext,
}

impl<'a> PlanDeletedHandler<'a> {
    /// Create a new PlanDeletedHandler
    pub fn new(ctx: &'a ReactorContext) -> Self {
        Self { ctx }
    }

    /// Notify every remaining subscriber that the plan was deleted
    #[instrument(skip(self, plan), fields(plan_id = %plan.id))]
    pub async fn handle(&self, plan: &Plan) -> ReactorResult<HandlerOutcome> {
        let tokens = resolver::subscriber_tokens(self.ctx, &plan.id, None).await?;
        if tokens.is_empty() {
            return Ok(HandlerOutcome::Skipped(SkipReason::NoRecipients));
        }

        let body = format!("\"{}\" was deleted", plan.title);
        let data = IntentData::plan(plan.id.clone());

        let report = self
            .ctx
            .dispatcher()
            .send_multicast(tokens, "Plan deleted", &body, data)
            .await;

        Ok(HandlerOutcome::Dispatched(report.attempted()))
    }
}
