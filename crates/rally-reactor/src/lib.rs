//! # rally-reactor
//!
//! Application layer reacting to store mutations: the recipient
//! resolver, the five change handlers, the event router, and the
//! cleanup sweeper. All dependencies arrive through [`ReactorContext`].

pub mod context;
pub mod error;
pub mod handlers;
pub mod resolver;
pub mod router;
pub mod sweeper;

// Re-export commonly used types at crate root
pub use context::ReactorContext;
pub use error::{HandlerOutcome, ReactorError, ReactorResult, SkipReason};
pub use router::EventRouter;
pub use sweeper::{CleanupSweeper, SweepReport};
