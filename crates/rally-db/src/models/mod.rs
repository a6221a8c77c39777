//! Database models - rows as they exist in PostgreSQL

mod plan;
mod subscription;
mod user_profile;

pub use plan::PlanModel;
pub use subscription::SubscriptionModel;
pub use user_profile::UserProfileModel;
