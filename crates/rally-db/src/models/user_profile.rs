//! Database model for user profiles

use sqlx::FromRow;

/// Row in the `user_profiles` table
#[derive(Debug, Clone, FromRow)]
pub struct UserProfileModel {
    pub id: String,
    pub display_name: Option<String>,
    pub push_token: Option<String>,
}
