//! Notification intent - a fully resolved instruction to send one push
//!
//! Ephemeral: constructed inside a handler invocation, handed to the
//! dispatcher, never persisted. Validated at construction so a blank
//! title or body can never reach the gateway.

use std::collections::BTreeMap;

use crate::error::DomainError;
use crate::value_objects::{PlanId, PushToken, UserId};

/// Closed key set for the notification data map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentData {
    plan_id: Option<PlanId>,
    user_id: Option<UserId>,
    click_action: Option<&'static str>,
    kind: Option<&'static str>,
}

impl IntentData {
    /// Data referencing a plan
    pub fn plan(plan_id: PlanId) -> Self {
        Self {
            plan_id: Some(plan_id),
            ..Self::default()
        }
    }

    /// Attach the user the event concerns
    #[must_use]
    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Mark as a chat message notification (mobile client routes on these)
    #[must_use]
    pub fn chat_message(mut self) -> Self {
        self.click_action = Some("FLUTTER_NOTIFICATION_CLICK");
        self.kind = Some("chat_message");
        self
    }

    /// Render to the wire map delivered alongside the notification
    pub fn into_map(self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        if let Some(plan_id) = self.plan_id {
            map.insert("planId".to_string(), plan_id.into_inner());
        }
        if let Some(user_id) = self.user_id {
            map.insert("userId".to_string(), user_id.into_inner());
        }
        if let Some(click_action) = self.click_action {
            map.insert("click_action".to_string(), click_action.to_string());
        }
        if let Some(kind) = self.kind {
            map.insert("type".to_string(), kind.to_string());
        }
        map
    }
}

/// A single resolved push notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationIntent {
    pub token: PushToken,
    pub title: String,
    pub body: String,
    pub data: BTreeMap<String, String>,
}

impl NotificationIntent {
    /// Build an intent, rejecting blank title or body
    pub fn new(
        token: PushToken,
        title: impl Into<String>,
        body: impl Into<String>,
        data: IntentData,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        let body = body.into();
        if title.trim().is_empty() {
            return Err(DomainError::InvalidIntent("empty title".to_string()));
        }
        if body.trim().is_empty() {
            return Err(DomainError::InvalidIntent("empty body".to_string()));
        }
        Ok(Self {
            token,
            title,
            body,
            data: data.into_map(),
        })
    }
}
