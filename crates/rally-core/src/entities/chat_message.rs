//! Chat message entity - a message in a plan's chat
//!
//! Messages are immutable once created; there is no update or delete flow.

use chrono::{DateTime, Utc};

use crate::value_objects::{MessageId, PlanId, UserId};

/// Placeholder sender name for messages without one
pub const ANONYMOUS_SENDER: &str = "Someone";

/// Chat message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub plan_id: PlanId,
    pub sender_id: UserId,
    pub sender_name: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new ChatMessage
    pub fn new(
        id: MessageId,
        plan_id: PlanId,
        sender_id: UserId,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id,
            plan_id,
            sender_id,
            sender_name: None,
            body: body.into(),
            created_at: Utc::now(),
        }
    }

    /// Sender name used in notifications
    pub fn sender_name(&self) -> &str {
        self.sender_name.as_deref().unwrap_or(ANONYMOUS_SENDER)
    }
}
