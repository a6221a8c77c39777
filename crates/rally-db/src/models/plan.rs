//! Database model for plans

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row in the `plans` table
#[derive(Debug, Clone, FromRow)]
pub struct PlanModel {
    pub id: String,
    pub title: String,
    pub scheduled_at: DateTime<Utc>,
    pub location: Option<String>,
    pub owner_id: Option<String>,
}
