//! Chat message created handler
//!
//! Fans the message out to every subscriber except its sender, even when
//! the sender is subscribed to the plan.

use tracing::instrument;

use rally_core::{ChatMessage, IntentData};

use crate::context::ReactorContext;
use crate::error::{HandlerOutcome, ReactorResult, SkipReason};
use crate::resolver;

/// Chat message created handler
pub struct ChatMessageCreatedHandler<'a> {
    ctx: &'a ReactorContext,
}

impl<'a> ChatMessageCreatedHandler<'a> {
    /// Create a new ChatMessageCreatedHandler
    pub fn new(ctx: &'a ReactorContext) -> Self {
        Self { ctx }
    }

    /// Notify the plan's subscribers about the new message
    #[instrument(skip(self, message), fields(plan_id = %message.plan_id))]
    pub async fn handle(&self, message: &ChatMessage) -> ReactorResult<HandlerOutcome> {
        let tokens =
            resolver::subscriber_tokens(self.ctx, &message.plan_id, Some(&message.sender_id))
                .await?;
        if tokens.is_empty() {
            return Ok(HandlerOutcome::Skipped(SkipReason::NoRecipients));
        }

        let body = format!("{}: {}", message.sender_name(), message.body);
        let data = IntentData::plan(message.plan_id.clone()).chat_message();

        let report = self
            .ctx
            .dispatcher()
            .send_multicast(tokens, "New message", &body, data)
            .await;

        Ok(HandlerOutcome::Dispatched(report.attempted()))
    }
}
