//! Mappers - convert database models to domain entities
//!
//! The push token column may hold an empty string left by old client
//! versions; `PushToken::new` folds that into absence here, once.

use rally_core::entities::{Plan, Subscription, UserProfile};
use rally_core::value_objects::{PlanId, PushToken, UserId};

use crate::models::{PlanModel, SubscriptionModel, UserProfileModel};

/// Convert a plan row to the domain entity
pub fn plan_from_model(model: PlanModel) -> Plan {
    Plan {
        id: PlanId::new(model.id),
        title: model.title,
        scheduled_at: model.scheduled_at,
        location: model.location,
        owner_id: model.owner_id.map(UserId::new),
    }
}

/// Convert a subscription row to the domain entity
pub fn subscription_from_model(model: SubscriptionModel) -> Subscription {
    Subscription {
        plan_id: PlanId::new(model.plan_id),
        user_id: UserId::new(model.user_id),
        display_name: model.display_name,
        joined_at: model.joined_at,
    }
}

/// Convert a profile row to the domain entity
pub fn profile_from_model(model: UserProfileModel) -> UserProfile {
    UserProfile {
        id: UserId::new(model.id),
        display_name: model.display_name,
        push_token: model.push_token.and_then(PushToken::new),
    }
}
