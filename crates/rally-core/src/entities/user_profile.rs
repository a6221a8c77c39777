//! User profile entity - display name and push routing for one user

use crate::value_objects::{PushToken, UserId};

/// User profile entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: Option<String>,
    /// The single delivery target for this user; absence is a routing
    /// dead-end, not an error
    pub push_token: Option<PushToken>,
}

impl UserProfile {
    /// Create a profile without a push token
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            display_name: None,
            push_token: None,
        }
    }

    /// Create a profile with a push token
    pub fn with_token(id: UserId, token: PushToken) -> Self {
        Self {
            id,
            display_name: None,
            push_token: Some(token),
        }
    }

    /// Check whether this profile can receive notifications
    #[inline]
    pub fn is_reachable(&self) -> bool {
        self.push_token.is_some()
    }
}
