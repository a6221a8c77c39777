//! Repository traits

mod repositories;

pub use repositories::{
    CascadeOutcome, PlanRepository, RepoResult, SubscriptionRepository, UserProfileRepository,
};
