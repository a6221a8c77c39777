//! # rally-db
//!
//! Storage layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `rally-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//! - The document change feed over LISTEN/NOTIFY
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rally_db::pool::{create_pool, DatabaseConfig};
//! use rally_db::repositories::PgPlanRepository;
//! use rally_core::traits::PlanRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new("postgresql://localhost/rally_db", 20, 5);
//!     let pool = create_pool(&config).await?;
//!     let plan_repo = PgPlanRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod feed;
pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use feed::{ChangeFeed, FeedConfig};
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::{PgPlanRepository, PgSubscriptionRepository, PgUserProfileRepository};
