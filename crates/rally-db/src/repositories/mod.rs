//! Repository implementations

pub mod error;
pub mod plan;
pub mod subscription;
pub mod user_profile;

pub use plan::PgPlanRepository;
pub use subscription::PgSubscriptionRepository;
pub use user_profile::PgUserProfileRepository;
