//! Push token - a device registration token for the push gateway
//!
//! The token is the single delivery target for a user. An absent or stale
//! token is a routing dead-end, never an error; emptiness is rejected at
//! construction so downstream code only ever sees deliverable tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-empty push device token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushToken(String);

impl PushToken {
    /// Create a token, returning None for empty or whitespace-only input
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Get the token as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PushToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
