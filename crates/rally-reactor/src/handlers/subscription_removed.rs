//! Subscription removed handler
//!
//! Tells the plan owner someone left their plan. The subscriber's name
//! comes from the deleted record's before snapshot.

use tracing::{debug, instrument};

use rally_core::{IntentData, Subscription};
use rally_push::DeliveryOutcome;

use crate::context::ReactorContext;
use crate::error::{HandlerOutcome, ReactorResult, SkipReason};
use crate::resolver;

/// Subscription removed handler
pub struct SubscriptionRemovedHandler<'a> {
    ctx: &'a ReactorContext,
}

impl<'a> SubscriptionRemovedHandler<'a> {
    /// Create a new SubscriptionRemovedHandler
    pub fn new(ctx: &'a ReactorContext) -> Self {
        Self { ctx }
    }

    /// Notify the plan owner about the departed subscriber
    #[instrument(skip(self, subscription), fields(plan_id = %subscription.plan_id))]
    pub async fn handle(&self, subscription: &Subscription) -> ReactorResult<HandlerOutcome> {
        let Some((plan, token)) =
            resolver::plan_owner_token(self.ctx, &subscription.plan_id).await?
        else {
            // The plan is often already gone when its subscriptions are
            // swept; that is the normal cascade order, not an error.
            return Ok(HandlerOutcome::Skipped(SkipReason::MissingPlan));
        };

        if plan.owner_id.is_none() {
            debug!(plan_id = %plan.id, "plan has no owner recorded");
            return Ok(HandlerOutcome::Skipped(SkipReason::MissingOwner));
        }
        if token.is_none() {
            return Ok(HandlerOutcome::Skipped(SkipReason::MissingToken));
        }

        let body = format!("{} left \"{}\"", subscription.subscriber_name(), plan.title);
        let data = IntentData::plan(plan.id.clone()).with_user(subscription.user_id.clone());

        let outcome = self
            .ctx
            .dispatcher()
            .send_one(token, "Subscriber left", &body, data)
            .await;

        match outcome {
            DeliveryOutcome::Skipped => Ok(HandlerOutcome::Skipped(SkipReason::MissingToken)),
            _ => Ok(HandlerOutcome::Dispatched(1)),
        }
    }
}
