//! # rally-core
//!
//! Domain layer containing entities, value objects, repository traits, and
//! change events. This crate has zero dependencies on infrastructure
//! (database, push gateway, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    join_changed_fields, ChangedField, ChatMessage, Plan, Subscription, UserProfile,
    ANONYMOUS_SENDER, ANONYMOUS_SUBSCRIBER, UNTITLED_PLAN,
};
pub use error::DomainError;
pub use events::{ChangeEvent, DocumentPath, EventDecodeError, RawChangeEvent, TriggerKind};
pub use traits::{
    CascadeOutcome, PlanRepository, RepoResult, SubscriptionRepository, UserProfileRepository,
};
pub use value_objects::{IntentData, MessageId, NotificationIntent, PlanId, PushToken, UserId};
