//! Domain entities - core business objects

mod chat_message;
mod plan;
mod subscription;
mod user_profile;

pub use chat_message::{ChatMessage, ANONYMOUS_SENDER};
pub use plan::{join_changed_fields, ChangedField, Plan, UNTITLED_PLAN};
pub use subscription::{Subscription, ANONYMOUS_SUBSCRIBER};
pub use user_profile::UserProfile;
