//! Change events - typed triggers decoded from raw store mutations
//!
//! A raw event carries the trigger kind, the slash-separated document
//! path, and optional before/after snapshots. Decoding matches the
//! (kind, path) pair against the bound path templates and produces a
//! tagged variant; the router dispatches on the variant.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::entities::{ChatMessage, Plan, Subscription};
use crate::error::DomainError;
use crate::events::documents::{ChatMessageDoc, PlanDoc, SubscriptionDoc};
use crate::value_objects::{MessageId, PlanId, UserId};

/// Kind of trigger that fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    Create,
    Update,
    Delete,
    /// Timer tick; never carried on the change feed, the sweeper owns it
    Schedule,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Update => f.write_str("update"),
            Self::Delete => f.write_str("delete"),
            Self::Schedule => f.write_str("schedule"),
        }
    }
}

/// A raw mutation event as it arrives from the store's change feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawChangeEvent {
    pub kind: TriggerKind,
    pub path: String,
    #[serde(default)]
    pub before: Option<Value>,
    #[serde(default)]
    pub after: Option<Value>,
}

/// A parsed document path with its parameters bound
///
/// Templates:
/// - `plans/{planId}`
/// - `plans/{planId}/subscriptions/{userId}`
/// - `plans/{planId}/chatMessages/{chatId}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentPath {
    Plan {
        plan_id: PlanId,
    },
    Subscription {
        plan_id: PlanId,
        user_id: UserId,
    },
    ChatMessage {
        plan_id: PlanId,
        message_id: MessageId,
    },
}

impl DocumentPath {
    /// Match a raw path against the known templates
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        match segments.as_slice() {
            ["plans", plan_id] => Some(Self::Plan {
                plan_id: PlanId::new(*plan_id),
            }),
            ["plans", plan_id, "subscriptions", user_id] => Some(Self::Subscription {
                plan_id: PlanId::new(*plan_id),
                user_id: UserId::new(*user_id),
            }),
            ["plans", plan_id, "chatMessages", message_id] => Some(Self::ChatMessage {
                plan_id: PlanId::new(*plan_id),
                message_id: MessageId::new(*message_id),
            }),
            _ => None,
        }
    }
}

/// Error decoding a raw event into a typed change event
#[derive(Debug, Error)]
pub enum EventDecodeError {
    #[error("no handler bound to {kind} on \"{path}\"")]
    Unrouted { kind: TriggerKind, path: String },

    #[error("{kind} on \"{path}\" is missing its {which} snapshot")]
    MissingSnapshot {
        kind: TriggerKind,
        path: String,
        which: &'static str,
    },

    #[error(transparent)]
    Document(#[from] DomainError),
}

/// A typed change event, ready for dispatch
#[derive(Debug, Clone)]
pub enum ChangeEvent {
    SubscriptionCreated {
        subscription: Subscription,
    },
    SubscriptionRemoved {
        subscription: Subscription,
    },
    PlanUpdated {
        before: Plan,
        after: Plan,
    },
    PlanDeleted {
        plan: Plan,
    },
    ChatMessageCreated {
        message: ChatMessage,
    },
}

impl ChangeEvent {
    /// Decode a raw event, binding path parameters and decoding snapshots
    pub fn from_raw(raw: &RawChangeEvent) -> Result<Self, EventDecodeError> {
        let unrouted = || EventDecodeError::Unrouted {
            kind: raw.kind,
            path: raw.path.clone(),
        };
        let missing = |which: &'static str| EventDecodeError::MissingSnapshot {
            kind: raw.kind,
            path: raw.path.clone(),
            which,
        };

        let path = DocumentPath::parse(&raw.path).ok_or_else(unrouted)?;

        match (raw.kind, path) {
            (TriggerKind::Create, DocumentPath::Subscription { plan_id, user_id }) => {
                let doc = raw.after.clone().ok_or_else(|| missing("after"))?;
                let subscription =
                    SubscriptionDoc::decode(doc)?.into_subscription(plan_id, user_id);
                Ok(Self::SubscriptionCreated { subscription })
            }
            (TriggerKind::Delete, DocumentPath::Subscription { plan_id, user_id }) => {
                let doc = raw.before.clone().ok_or_else(|| missing("before"))?;
                let subscription =
                    SubscriptionDoc::decode(doc)?.into_subscription(plan_id, user_id);
                Ok(Self::SubscriptionRemoved { subscription })
            }
            (TriggerKind::Update, DocumentPath::Plan { plan_id }) => {
                let before_doc = raw.before.clone().ok_or_else(|| missing("before"))?;
                let after_doc = raw.after.clone().ok_or_else(|| missing("after"))?;
                let before = PlanDoc::decode(before_doc)?.into_plan(plan_id.clone());
                let after = PlanDoc::decode(after_doc)?.into_plan(plan_id);
                Ok(Self::PlanUpdated { before, after })
            }
            (TriggerKind::Delete, DocumentPath::Plan { plan_id }) => {
                let doc = raw.before.clone().ok_or_else(|| missing("before"))?;
                let plan = PlanDoc::decode(doc)?.into_plan(plan_id);
                Ok(Self::PlanDeleted { plan })
            }
            (TriggerKind::Create, DocumentPath::ChatMessage {
                plan_id,
                message_id,
            }) => {
                let doc = raw.after.clone().ok_or_else(|| missing("after"))?;
                let message = ChatMessageDoc::decode(doc)?.into_message(message_id, plan_id);
                Ok(Self::ChatMessageCreated { message })
            }
            _ => Err(unrouted()),
        }
    }

    /// Name of the bound handler, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::SubscriptionCreated { .. } => "subscription_created",
            Self::SubscriptionRemoved { .. } => "subscription_removed",
            Self::PlanUpdated { .. } => "plan_updated",
            Self::PlanDeleted { .. } => "plan_deleted",
            Self::ChatMessageCreated { .. } => "chat_message_created",
        }
    }
}
