//! # rally-push
//!
//! Push delivery infrastructure: the platform envelope, the gateway
//! abstraction with its HTTP implementation, and the best-effort
//! dispatcher.

pub mod dispatcher;
pub mod fanout;
pub mod gateway;
pub mod payload;

// Re-export commonly used types at crate root
pub use dispatcher::{DeliveryOutcome, MulticastReport, NotificationDispatcher};
pub use fanout::{count_ok, join_all_outcomes};
pub use gateway::{HttpPushGateway, PushError, PushGateway, PushResult};
pub use payload::{PushPayload, DEFAULT_CHANNEL, DEFAULT_SOUND, PRIORITY_HIGH};
