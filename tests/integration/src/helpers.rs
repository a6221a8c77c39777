//! Test helpers - recording gateway, context wiring, raw event builders

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use rally_core::{RawChangeEvent, TriggerKind};
use rally_push::{NotificationDispatcher, PushError, PushGateway, PushPayload, PushResult};
use rally_reactor::{CleanupSweeper, EventRouter, ReactorContext};

use crate::fixtures::InMemoryStore;

/// Push gateway that records every payload instead of sending it
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<PushPayload>>,
    failing_tokens: Mutex<Vec<String>>,
}

impl RecordingGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make delivery to one token fail with a gateway error
    pub fn fail_token(&self, token: &str) {
        self.failing_tokens.lock().push(token.to_string());
    }

    /// Every payload delivered so far
    pub fn sent(&self) -> Vec<PushPayload> {
        self.sent.lock().clone()
    }

    /// Tokens the payloads were delivered to, in send order
    pub fn sent_tokens(&self) -> Vec<String> {
        self.sent.lock().iter().map(|p| p.token.clone()).collect()
    }
}

#[async_trait]
impl PushGateway for RecordingGateway {
    async fn send(&self, payload: &PushPayload) -> PushResult<()> {
        if self.failing_tokens.lock().contains(&payload.token) {
            return Err(PushError::Gateway {
                status: 404,
                message: "unregistered token".to_string(),
            });
        }
        self.sent.lock().push(payload.clone());
        Ok(())
    }
}

/// Wire a reactor context over the in-memory store and recording gateway
pub fn build_context(store: &Arc<InMemoryStore>, gateway: &Arc<RecordingGateway>) -> ReactorContext {
    ReactorContext::new(
        store.clone(),
        store.clone(),
        store.clone(),
        NotificationDispatcher::new(gateway.clone()),
    )
}

/// Build a router over a fresh store and gateway
pub fn build_router(store: &Arc<InMemoryStore>, gateway: &Arc<RecordingGateway>) -> EventRouter {
    EventRouter::new(build_context(store, gateway))
}

/// Build a sweeper with the default hourly config
pub fn build_sweeper(store: &Arc<InMemoryStore>, gateway: &Arc<RecordingGateway>) -> CleanupSweeper {
    let config = rally_common::SweepConfig {
        interval_secs: 3600,
        timezone: "Europe/Madrid".to_string(),
    };
    CleanupSweeper::new(build_context(store, gateway), config)
}

/// Build a raw change event
pub fn raw_event(
    kind: TriggerKind,
    path: &str,
    before: Option<Value>,
    after: Option<Value>,
) -> RawChangeEvent {
    RawChangeEvent {
        kind,
        path: path.to_string(),
        before,
        after,
    }
}
