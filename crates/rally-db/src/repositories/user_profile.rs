//! PostgreSQL implementation of UserProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use rally_core::entities::UserProfile;
use rally_core::traits::{RepoResult, UserProfileRepository};
use rally_core::value_objects::UserId;

use crate::mappers::profile_from_model;
use crate::models::UserProfileModel;

use super::error::map_db_error;

/// PostgreSQL implementation of UserProfileRepository
#[derive(Clone)]
pub struct PgUserProfileRepository {
    pool: PgPool,
}

impl PgUserProfileRepository {
    /// Create a new PgUserProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserProfileRepository for PgUserProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, user_id: &UserId) -> RepoResult<Option<UserProfile>> {
        let result = sqlx::query_as::<_, UserProfileModel>(
            r#"
            SELECT id, display_name, push_token
            FROM user_profiles
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(profile_from_model))
    }

    #[instrument(skip(self, profile))]
    async fn upsert(&self, profile: &UserProfile) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_profiles (id, display_name, push_token)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET display_name = EXCLUDED.display_name,
                push_token = EXCLUDED.push_token
            "#,
        )
        .bind(profile.id.as_str())
        .bind(&profile.display_name)
        .bind(profile.push_token.as_ref().map(|t| t.as_str()))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
