//! Reactor context - dependency container for handlers
//!
//! Holds the repositories and the dispatcher every handler needs.
//! Constructed once at process start and injected everywhere; nothing in
//! the reactor reaches for global state.

use std::sync::Arc;

use rally_core::traits::{PlanRepository, SubscriptionRepository, UserProfileRepository};
use rally_push::NotificationDispatcher;

/// Reactor context containing all handler dependencies
///
/// Provides access to:
/// - Store repositories
/// - The push notification dispatcher
#[derive(Clone)]
pub struct ReactorContext {
    plan_repo: Arc<dyn PlanRepository>,
    subscription_repo: Arc<dyn SubscriptionRepository>,
    profile_repo: Arc<dyn UserProfileRepository>,
    dispatcher: NotificationDispatcher,
}

impl ReactorContext {
    /// Create a new reactor context with all dependencies
    pub fn new(
        plan_repo: Arc<dyn PlanRepository>,
        subscription_repo: Arc<dyn SubscriptionRepository>,
        profile_repo: Arc<dyn UserProfileRepository>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            plan_repo,
            subscription_repo,
            profile_repo,
            dispatcher,
        }
    }

    /// Get the plan repository
    pub fn plan_repo(&self) -> &dyn PlanRepository {
        self.plan_repo.as_ref()
    }

    /// Get the subscription repository
    pub fn subscription_repo(&self) -> &dyn SubscriptionRepository {
        self.subscription_repo.as_ref()
    }

    /// Get the user profile repository
    pub fn profile_repo(&self) -> &dyn UserProfileRepository {
        self.profile_repo.as_ref()
    }

    /// Get the notification dispatcher
    pub fn dispatcher(&self) -> &NotificationDispatcher {
        &self.dispatcher
    }
}

impl std::fmt::Debug for ReactorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactorContext")
            .field("repositories", &"...")
            .field("dispatcher", &"NotificationDispatcher")
            .finish()
    }
}
