//! Value objects - immutable domain values

mod ids;
mod notification_intent;
mod push_token;

pub use ids::{MessageId, PlanId, UserId};
pub use notification_intent::{IntentData, NotificationIntent};
pub use push_token::PushToken;
