//! Database model for subscriptions

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row in the `subscriptions` table
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionModel {
    pub plan_id: String,
    pub user_id: String,
    pub display_name: Option<String>,
    pub joined_at: DateTime<Utc>,
}
