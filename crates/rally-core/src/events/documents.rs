//! Wire documents - store snapshots as they arrive on a change event
//!
//! Each DTO declares up front which fields are required and which are
//! optional, and is decoded exactly once at the store boundary. Downstream
//! code works with the domain entities and never probes for field
//! presence.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::entities::{ChatMessage, Plan, Subscription, UNTITLED_PLAN};
use crate::error::DomainError;
use crate::value_objects::{MessageId, PlanId, UserId};

fn decode<T: DeserializeOwned>(doc: Value, what: &'static str) -> Result<T, DomainError> {
    serde_json::from_value(doc).map_err(|e| DomainError::InvalidDocument(format!("{what}: {e}")))
}

/// Plan document snapshot
///
/// Required: `scheduledAt`. Optional: title (placeholder applied), the
/// owner (legacy documents carry `uid` instead of `ownerId`, some carry
/// neither), and location.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDoc {
    #[serde(default)]
    pub title: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
}

impl PlanDoc {
    /// Decode a raw snapshot
    pub fn decode(doc: Value) -> Result<Self, DomainError> {
        decode(doc, "plan")
    }

    /// Convert to the domain entity; the id comes from the document path
    pub fn into_plan(self, id: PlanId) -> Plan {
        let owner_id = self.owner_id.or(self.uid).map(UserId::new);
        Plan {
            id,
            title: self.title.unwrap_or_else(|| UNTITLED_PLAN.to_string()),
            scheduled_at: self.scheduled_at,
            location: self.location,
            owner_id,
        }
    }
}

/// Subscription document snapshot
///
/// Both fields are optional on the wire; a missing join timestamp falls
/// back to the decode instant.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDoc {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

impl SubscriptionDoc {
    /// Decode a raw snapshot
    pub fn decode(doc: Value) -> Result<Self, DomainError> {
        decode(doc, "subscription")
    }

    /// Convert to the domain entity; the key comes from the document path
    pub fn into_subscription(self, plan_id: PlanId, user_id: UserId) -> Subscription {
        Subscription {
            plan_id,
            user_id,
            display_name: self.display_name,
            joined_at: self.joined_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Chat message document snapshot
///
/// Required: `senderId` (sender exclusion depends on it). Optional:
/// sender name, body (empty string applied), created timestamp.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDoc {
    pub sender_id: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ChatMessageDoc {
    /// Decode a raw snapshot
    pub fn decode(doc: Value) -> Result<Self, DomainError> {
        decode(doc, "chat message")
    }

    /// Convert to the domain entity; ids come from the document path
    pub fn into_message(self, id: MessageId, plan_id: PlanId) -> ChatMessage {
        ChatMessage {
            id,
            plan_id,
            sender_id: UserId::new(self.sender_id),
            sender_name: self.sender_name,
            body: self.message.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}
