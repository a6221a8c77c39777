//! PostgreSQL implementation of PlanRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use rally_core::entities::Plan;
use rally_core::traits::{CascadeOutcome, PlanRepository, RepoResult};
use rally_core::value_objects::PlanId;

use crate::mappers::plan_from_model;
use crate::models::PlanModel;

use super::error::map_db_error;

/// PostgreSQL implementation of PlanRepository
#[derive(Clone)]
pub struct PgPlanRepository {
    pool: PgPool,
}

impl PgPlanRepository {
    /// Create a new PgPlanRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PgPlanRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &PlanId) -> RepoResult<Option<Plan>> {
        let result = sqlx::query_as::<_, PlanModel>(
            r#"
            SELECT id, title, scheduled_at, location, owner_id
            FROM plans
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(plan_from_model))
    }

    #[instrument(skip(self))]
    async fn find_expired(&self, cutoff: DateTime<Utc>) -> RepoResult<Vec<Plan>> {
        let results = sqlx::query_as::<_, PlanModel>(
            r#"
            SELECT id, title, scheduled_at, location, owner_id
            FROM plans
            WHERE scheduled_at <= $1
            ORDER BY scheduled_at
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(plan_from_model).collect())
    }

    #[instrument(skip(self, plan))]
    async fn create(&self, plan: &Plan) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO plans (id, title, scheduled_at, location, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(plan.id.as_str())
        .bind(&plan.title)
        .bind(plan.scheduled_at)
        .bind(&plan.location)
        .bind(plan.owner_id.as_ref().map(|id| id.as_str()))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_cascade(
        &self,
        id: &PlanId,
        expired_before: DateTime<Utc>,
    ) -> RepoResult<CascadeOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the plan row and re-check expiry: an edit racing the sweep
        // may have pushed the schedule past the cutoff.
        let scheduled_at: Option<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            SELECT scheduled_at FROM plans WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        match scheduled_at {
            None => return Ok(CascadeOutcome::Skipped),
            Some(scheduled_at) if scheduled_at > expired_before => {
                return Ok(CascadeOutcome::Skipped);
            }
            Some(_) => {}
        }

        sqlx::query("DELETE FROM user_plans WHERE plan_id = $1")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let subscriptions = sqlx::query("DELETE FROM subscriptions WHERE plan_id = $1")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        sqlx::query("DELETE FROM plans WHERE id = $1")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(CascadeOutcome::Deleted {
            subscriptions: subscriptions as usize,
        })
    }
}
