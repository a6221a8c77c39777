//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs from the document store; the
//! infrastructure layer provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Plan, Subscription, UserProfile};
use crate::error::DomainError;
use crate::value_objects::{PlanId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Outcome of a cascading plan delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeOutcome {
    /// Plan, its subscriptions, and their reverse-index records were all
    /// removed in one atomic operation
    Deleted {
        subscriptions: usize,
    },
    /// Plan was already gone or its schedule was pushed past the cutoff
    /// by a concurrent edit; nothing was removed
    Skipped,
}

// ============================================================================
// Plan Repository
// ============================================================================

#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Find plan by ID
    async fn find_by_id(&self, id: &PlanId) -> RepoResult<Option<Plan>>;

    /// List plans whose scheduled time is at or before the cutoff
    async fn find_expired(&self, cutoff: DateTime<Utc>) -> RepoResult<Vec<Plan>>;

    /// Create a new plan
    async fn create(&self, plan: &Plan) -> RepoResult<()>;

    /// Atomically delete a plan together with every subscription under it
    /// and every corresponding reverse-index record
    ///
    /// The expiry is re-checked on the plan row inside the same
    /// transaction; a plan rescheduled past `expired_before` by a racing
    /// edit is skipped, not deleted.
    async fn delete_cascade(
        &self,
        id: &PlanId,
        expired_before: DateTime<Utc>,
    ) -> RepoResult<CascadeOutcome>;
}

// ============================================================================
// Subscription Repository
// ============================================================================

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// List all subscriptions under a plan
    async fn find_by_plan(&self, plan_id: &PlanId) -> RepoResult<Vec<Subscription>>;

    /// Enumerate a user's plans via the reverse index
    async fn find_plans_by_user(&self, user_id: &UserId) -> RepoResult<Vec<PlanId>>;

    /// Create a subscription and its reverse-index record atomically
    async fn create(&self, subscription: &Subscription) -> RepoResult<()>;
}

// ============================================================================
// User Profile Repository
// ============================================================================

#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Find profile by user ID
    async fn find_by_id(&self, id: &UserId) -> RepoResult<Option<UserProfile>>;

    /// Create or replace a profile
    async fn upsert(&self, profile: &UserProfile) -> RepoResult<()>;
}
