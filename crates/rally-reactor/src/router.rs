//! Event router - decodes raw mutations and calls exactly one handler
//!
//! The (kind, path) match lives in `ChangeEvent::from_raw`; the router
//! owns the dispatch table from tagged variant to handler.

use tracing::{debug, info, instrument};

use rally_core::{ChangeEvent, RawChangeEvent};

use crate::context::ReactorContext;
use crate::error::{HandlerOutcome, ReactorResult};
use crate::handlers::{
    ChatMessageCreatedHandler, PlanDeletedHandler, PlanUpdatedHandler, SubscriptionCreatedHandler,
    SubscriptionRemovedHandler,
};

/// Routes decoded change events to their handlers
#[derive(Clone)]
pub struct EventRouter {
    ctx: ReactorContext,
}

impl EventRouter {
    /// Create a router over a reactor context
    pub fn new(ctx: ReactorContext) -> Self {
        Self { ctx }
    }

    /// Decode a raw event and run its handler
    ///
    /// # Errors
    /// Returns `ReactorError::Unrouted` for events no handler is bound
    /// to, `ReactorError::Decode` for malformed snapshots, and
    /// `ReactorError::Domain` when the store fails mid-handling.
    #[instrument(skip(self, raw), fields(kind = %raw.kind, path = %raw.path))]
    pub async fn dispatch(&self, raw: &RawChangeEvent) -> ReactorResult<HandlerOutcome> {
        let event = ChangeEvent::from_raw(raw)?;
        let name = event.name();

        let outcome = match &event {
            ChangeEvent::SubscriptionCreated { subscription } => {
                SubscriptionCreatedHandler::new(&self.ctx)
                    .handle(subscription)
                    .await?
            }
            ChangeEvent::SubscriptionRemoved { subscription } => {
                SubscriptionRemovedHandler::new(&self.ctx)
                    .handle(subscription)
                    .await?
            }
            ChangeEvent::PlanUpdated { before, after } => {
                PlanUpdatedHandler::new(&self.ctx)
                    .handle(before, after)
                    .await?
            }
            ChangeEvent::PlanDeleted { plan } => {
                PlanDeletedHandler::new(&self.ctx).handle(plan).await?
            }
            ChangeEvent::ChatMessageCreated { message } => {
                ChatMessageCreatedHandler::new(&self.ctx)
                    .handle(message)
                    .await?
            }
        };

        match outcome {
            HandlerOutcome::Dispatched(n) => {
                info!(handler = name, recipients = n, "event handled");
            }
            HandlerOutcome::Skipped(reason) => {
                debug!(handler = name, %reason, "event handled, nothing to send");
            }
        }

        Ok(outcome)
    }
}
