//! Test fixtures - in-memory store and entity builders
//!
//! The store honors the same invariants as the PostgreSQL
//! implementation: subscriptions and their reverse-index records move
//! together, and the cascade re-checks expiry before deleting.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use rally_core::entities::{Plan, Subscription, UserProfile};
use rally_core::traits::{
    CascadeOutcome, PlanRepository, RepoResult, SubscriptionRepository, UserProfileRepository,
};
use rally_core::value_objects::{PlanId, PushToken, UserId};
use rally_core::DomainError;

/// In-memory store implementing all repository traits
#[derive(Default)]
pub struct InMemoryStore {
    plans: Mutex<HashMap<PlanId, Plan>>,
    subscriptions: Mutex<Vec<Subscription>>,
    user_plans: Mutex<HashSet<(UserId, PlanId)>>,
    profiles: Mutex<HashMap<UserId, UserProfile>>,
    /// Plan ids whose cascade fails with a store error
    failing_cascades: Mutex<HashSet<PlanId>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seed a plan
    pub fn add_plan(&self, plan: Plan) {
        self.plans.lock().insert(plan.id.clone(), plan);
    }

    /// Seed a subscription together with its reverse-index record
    pub fn add_subscription(&self, subscription: Subscription) {
        self.user_plans.lock().insert((
            subscription.user_id.clone(),
            subscription.plan_id.clone(),
        ));
        self.subscriptions.lock().push(subscription);
    }

    /// Seed a user profile
    pub fn add_profile(&self, profile: UserProfile) {
        self.profiles.lock().insert(profile.id.clone(), profile);
    }

    /// Make the cascade for one plan fail with a store error
    pub fn fail_cascade(&self, plan_id: &PlanId) {
        self.failing_cascades.lock().insert(plan_id.clone());
    }

    /// Whether the plan document still exists
    pub fn has_plan(&self, plan_id: &PlanId) -> bool {
        self.plans.lock().contains_key(plan_id)
    }

    /// Subscriptions currently stored under a plan
    pub fn subscription_count(&self, plan_id: &PlanId) -> usize {
        self.subscriptions
            .lock()
            .iter()
            .filter(|s| &s.plan_id == plan_id)
            .count()
    }

    /// Reverse-index records currently stored for a user
    pub fn reverse_plans(&self, user_id: &UserId) -> Vec<PlanId> {
        self.user_plans
            .lock()
            .iter()
            .filter(|(u, _)| u == user_id)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

#[async_trait]
impl PlanRepository for InMemoryStore {
    async fn find_by_id(&self, id: &PlanId) -> RepoResult<Option<Plan>> {
        Ok(self.plans.lock().get(id).cloned())
    }

    async fn find_expired(&self, cutoff: DateTime<Utc>) -> RepoResult<Vec<Plan>> {
        let mut expired: Vec<Plan> = self
            .plans
            .lock()
            .values()
            .filter(|p| p.scheduled_at <= cutoff)
            .cloned()
            .collect();
        expired.sort_by_key(|p| p.scheduled_at);
        Ok(expired)
    }

    async fn create(&self, plan: &Plan) -> RepoResult<()> {
        self.add_plan(plan.clone());
        Ok(())
    }

    async fn delete_cascade(
        &self,
        id: &PlanId,
        expired_before: DateTime<Utc>,
    ) -> RepoResult<CascadeOutcome> {
        if self.failing_cascades.lock().contains(id) {
            return Err(DomainError::StoreError("injected cascade failure".to_string()));
        }

        let mut plans = self.plans.lock();
        let Some(plan) = plans.get(id) else {
            return Ok(CascadeOutcome::Skipped);
        };
        if plan.scheduled_at > expired_before {
            return Ok(CascadeOutcome::Skipped);
        }

        let mut subscriptions = self.subscriptions.lock();
        let before = subscriptions.len();
        subscriptions.retain(|s| &s.plan_id != id);
        let removed = before - subscriptions.len();

        self.user_plans.lock().retain(|(_, p)| p != id);
        plans.remove(id);

        Ok(CascadeOutcome::Deleted {
            subscriptions: removed,
        })
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn find_by_plan(&self, plan_id: &PlanId) -> RepoResult<Vec<Subscription>> {
        let mut subs: Vec<Subscription> = self
            .subscriptions
            .lock()
            .iter()
            .filter(|s| &s.plan_id == plan_id)
            .cloned()
            .collect();
        subs.sort_by_key(|s| s.joined_at);
        Ok(subs)
    }

    async fn find_plans_by_user(&self, user_id: &UserId) -> RepoResult<Vec<PlanId>> {
        Ok(self.reverse_plans(user_id))
    }

    async fn create(&self, subscription: &Subscription) -> RepoResult<()> {
        self.add_subscription(subscription.clone());
        Ok(())
    }
}

#[async_trait]
impl UserProfileRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> RepoResult<Option<UserProfile>> {
        Ok(self.profiles.lock().get(id).cloned())
    }

    async fn upsert(&self, profile: &UserProfile) -> RepoResult<()> {
        self.add_profile(profile.clone());
        Ok(())
    }
}

// ============================================================================
// Entity builders
// ============================================================================

/// Build a plan scheduled relative to now
pub fn plan(id: &str, title: &str, owner: &str, hours_from_now: i64) -> Plan {
    Plan {
        id: PlanId::new(id),
        title: title.to_string(),
        scheduled_at: Utc::now() + Duration::hours(hours_from_now),
        location: Some("Park".to_string()),
        owner_id: Some(UserId::new(owner)),
    }
}

/// Build a subscription with a display name
pub fn subscription(plan_id: &str, user_id: &str, name: &str) -> Subscription {
    Subscription {
        plan_id: PlanId::new(plan_id),
        user_id: UserId::new(user_id),
        display_name: Some(name.to_string()),
        joined_at: Utc::now(),
    }
}

/// Build a profile with a push token
pub fn profile(user_id: &str, token: &str) -> UserProfile {
    UserProfile {
        id: UserId::new(user_id),
        display_name: Some(format!("User {user_id}")),
        push_token: PushToken::new(token),
    }
}

/// Build a profile without a push token
pub fn tokenless_profile(user_id: &str) -> UserProfile {
    UserProfile {
        id: UserId::new(user_id),
        display_name: Some(format!("User {user_id}")),
        push_token: None,
    }
}
