//! Change event handlers
//!
//! One module per bound event. Handlers are stateless; everything they
//! need comes in through the injected context.

pub mod chat_message_created;
pub mod plan_deleted;
pub mod plan_updated;
pub mod subscription_created;
pub mod subscription_removed;

pub use chat_message_created::ChatMessageCreatedHandler;
pub use plan_deleted::PlanDeletedHandler;
pub use plan_updated::PlanUpdatedHandler;
pub use subscription_created::SubscriptionCreatedHandler;
pub use subscription_removed::SubscriptionRemovedHandler;
