//! Reactor error types and handler outcomes

use std::fmt;

use rally_core::{DomainError, EventDecodeError};

/// Reactor error type
#[derive(Debug, thiserror::Error)]
pub enum ReactorError {
    /// No handler is bound to the event's (kind, path) pair
    #[error("unrouted event: {0}")]
    Unrouted(#[source] EventDecodeError),

    /// Event snapshot failed to decode into its typed document
    #[error("event decode failed: {0}")]
    Decode(#[source] EventDecodeError),

    /// Store access failed while handling an event
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<EventDecodeError> for ReactorError {
    fn from(err: EventDecodeError) -> Self {
        match err {
            EventDecodeError::Unrouted { .. } => Self::Unrouted(err),
            _ => Self::Decode(err),
        }
    }
}

/// Result type for reactor operations
pub type ReactorResult<T> = Result<T, ReactorError>;

/// Why a handler dispatched nothing
///
/// Skips are success: the event was handled, there was just nobody to
/// tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Parent plan no longer exists
    MissingPlan,
    /// Plan carries no owner id
    MissingOwner,
    /// Recipient has no registered push token
    MissingToken,
    /// No reachable subscribers
    NoRecipients,
    /// Update touched none of the watched fields
    NoWatchedChanges,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPlan => f.write_str("plan missing"),
            Self::MissingOwner => f.write_str("plan has no owner"),
            Self::MissingToken => f.write_str("recipient has no token"),
            Self::NoRecipients => f.write_str("no reachable subscribers"),
            Self::NoWatchedChanges => f.write_str("no watched fields changed"),
        }
    }
}

/// Outcome of one handler invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// Notifications were dispatched to this many recipients
    Dispatched(usize),
    /// Nothing to send; the reason is logged at debug
    Skipped(SkipReason),
}

impl HandlerOutcome {
    /// Number of notifications dispatched
    pub fn dispatched(&self) -> usize {
        match self {
            Self::Dispatched(n) => *n,
            Self::Skipped(_) => 0,
        }
    }
}
