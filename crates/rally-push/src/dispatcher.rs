//! Notification dispatcher - best-effort delivery over the push gateway
//!
//! Delivery failures are logged and swallowed: the triggering event is
//! still considered successfully processed. There is no retry queue.

use std::sync::Arc;

use tracing::{debug, warn};

use rally_core::{IntentData, NotificationIntent, PushToken};

use crate::fanout::{count_ok, join_all_outcomes};
use crate::gateway::PushGateway;
use crate::payload::PushPayload;

/// Outcome of a single-recipient send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// No token, or the intent could not be constructed
    Skipped,
    /// Gateway refused or errored; logged, never propagated
    Failed,
}

/// Outcome of a multicast send
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MulticastReport {
    pub delivered: usize,
    pub failed: usize,
}

impl MulticastReport {
    /// Number of tokens the dispatch attempted
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Dispatches notification intents to the push gateway
#[derive(Clone)]
pub struct NotificationDispatcher {
    gateway: Arc<dyn PushGateway>,
}

impl NotificationDispatcher {
    /// Create a dispatcher over a gateway
    pub fn new(gateway: Arc<dyn PushGateway>) -> Self {
        Self { gateway }
    }

    /// Send one notification; absent token is a logged no-op
    pub async fn send_one(
        &self,
        token: Option<PushToken>,
        title: &str,
        body: &str,
        data: IntentData,
    ) -> DeliveryOutcome {
        let Some(token) = token else {
            debug!("push token absent, skipping notification");
            return DeliveryOutcome::Skipped;
        };

        let intent = match NotificationIntent::new(token, title, body, data) {
            Ok(intent) => intent,
            Err(e) => {
                warn!(error = %e, "dropping malformed notification intent");
                return DeliveryOutcome::Skipped;
            }
        };

        self.deliver(&intent).await
    }

    /// Send the same notification to many tokens concurrently
    ///
    /// An empty token list is a no-op. Per-token failures are counted,
    /// never fatal.
    pub async fn send_multicast(
        &self,
        tokens: Vec<PushToken>,
        title: &str,
        body: &str,
        data: IntentData,
    ) -> MulticastReport {
        if tokens.is_empty() {
            return MulticastReport::default();
        }

        let intents: Vec<NotificationIntent> = tokens
            .into_iter()
            .filter_map(|token| {
                NotificationIntent::new(token, title, body, data.clone())
                    .map_err(|e| warn!(error = %e, "dropping malformed notification intent"))
                    .ok()
            })
            .collect();

        let sends: Vec<_> = intents
            .iter()
            .map(|intent| async move {
                match self.deliver(intent).await {
                    DeliveryOutcome::Delivered => Ok(()),
                    _ => Err(()),
                }
            })
            .collect();

        let outcomes: Vec<Result<(), ()>> = join_all_outcomes(sends).await;
        let delivered = count_ok(&outcomes);
        MulticastReport {
            delivered,
            failed: outcomes.len() - delivered,
        }
    }

    async fn deliver(&self, intent: &NotificationIntent) -> DeliveryOutcome {
        let payload = PushPayload::from_intent(intent);
        match self.gateway.send(&payload).await {
            Ok(()) => {
                debug!(title = %intent.title, "notification delivered");
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                warn!(error = %e, title = %intent.title, "push delivery failed");
                DeliveryOutcome::Failed
            }
        }
    }
}
