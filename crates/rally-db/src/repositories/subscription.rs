//! PostgreSQL implementation of SubscriptionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use rally_core::entities::Subscription;
use rally_core::traits::{RepoResult, SubscriptionRepository};
use rally_core::value_objects::{PlanId, UserId};

use crate::mappers::subscription_from_model;
use crate::models::SubscriptionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of SubscriptionRepository
///
/// Keeps the `user_plans` reverse index in step with `subscriptions`:
/// both rows are written inside one transaction.
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    /// Create a new PgSubscriptionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    #[instrument(skip(self))]
    async fn find_by_plan(&self, plan_id: &PlanId) -> RepoResult<Vec<Subscription>> {
        let results = sqlx::query_as::<_, SubscriptionModel>(
            r#"
            SELECT plan_id, user_id, display_name, joined_at
            FROM subscriptions
            WHERE plan_id = $1
            ORDER BY joined_at
            "#,
        )
        .bind(plan_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(subscription_from_model).collect())
    }

    #[instrument(skip(self))]
    async fn find_plans_by_user(&self, user_id: &UserId) -> RepoResult<Vec<PlanId>> {
        let plan_ids = sqlx::query_scalar::<_, String>(
            r#"
            SELECT plan_id FROM user_plans WHERE user_id = $1 ORDER BY joined_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(plan_ids.into_iter().map(PlanId::new).collect())
    }

    #[instrument(skip(self, subscription))]
    async fn create(&self, subscription: &Subscription) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO subscriptions (plan_id, user_id, display_name, joined_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(subscription.plan_id.as_str())
        .bind(subscription.user_id.as_str())
        .bind(&subscription.display_name)
        .bind(subscription.joined_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO user_plans (user_id, plan_id, joined_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(subscription.user_id.as_str())
        .bind(subscription.plan_id.as_str())
        .bind(subscription.joined_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
