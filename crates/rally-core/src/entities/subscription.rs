//! Subscription entity - a user's membership record in a plan

use chrono::{DateTime, Utc};

use crate::value_objects::{PlanId, UserId};

/// Placeholder shown when a subscriber never set a display name
pub const ANONYMOUS_SUBSCRIBER: &str = "A user";

/// Subscription entity, keyed by (plan_id, user_id)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub plan_id: PlanId,
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub joined_at: DateTime<Utc>,
}

impl Subscription {
    /// Create a new Subscription
    pub fn new(plan_id: PlanId, user_id: UserId, display_name: Option<String>) -> Self {
        Self {
            plan_id,
            user_id,
            display_name,
            joined_at: Utc::now(),
        }
    }

    /// Name used in notifications, falling back for anonymous subscribers
    pub fn subscriber_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(ANONYMOUS_SUBSCRIBER)
    }
}
