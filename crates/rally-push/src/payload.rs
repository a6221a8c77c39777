//! Push payload - the platform envelope delivered to the gateway
//!
//! Pure construction, no side effects. Token format is not validated
//! here; malformed tokens are rejected downstream by the gateway.

use serde::Serialize;
use std::collections::BTreeMap;

use rally_core::{NotificationIntent, PushToken};

/// Delivery priority hint for the Android platform block
pub const PRIORITY_HIGH: &str = "high";
/// Notification channel the mobile client registers at install
pub const DEFAULT_CHANNEL: &str = "default_channel";
/// Default notification sound on both platforms
pub const DEFAULT_SOUND: &str = "default";

/// The full envelope sent to the push gateway for one device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushPayload {
    pub token: String,
    pub notification: NotificationBlock,
    pub data: BTreeMap<String, String>,
    pub android: AndroidHints,
    pub apns: ApnsHints,
}

/// Title and body shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationBlock {
    pub title: String,
    pub body: String,
}

/// Android-specific delivery hints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidHints {
    pub priority: &'static str,
    pub notification: AndroidNotification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidNotification {
    #[serde(rename = "channelId")]
    pub channel_id: &'static str,
    pub sound: &'static str,
}

/// APNs-specific delivery hints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApnsHints {
    pub payload: ApnsPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApnsPayload {
    pub aps: Aps,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aps {
    pub sound: &'static str,
    /// Enables background delivery on iOS
    #[serde(rename = "contentAvailable")]
    pub content_available: bool,
}

impl PushPayload {
    /// Build the envelope for one token
    pub fn new(
        token: &PushToken,
        title: impl Into<String>,
        body: impl Into<String>,
        data: BTreeMap<String, String>,
    ) -> Self {
        Self {
            token: token.as_str().to_string(),
            notification: NotificationBlock {
                title: title.into(),
                body: body.into(),
            },
            data,
            android: AndroidHints {
                priority: PRIORITY_HIGH,
                notification: AndroidNotification {
                    channel_id: DEFAULT_CHANNEL,
                    sound: DEFAULT_SOUND,
                },
            },
            apns: ApnsHints {
                payload: ApnsPayload {
                    aps: Aps {
                        sound: DEFAULT_SOUND,
                        content_available: true,
                    },
                },
            },
        }
    }

    /// Build the envelope from a resolved intent
    pub fn from_intent(intent: &NotificationIntent) -> Self {
        Self::new(
            &intent.token,
            intent.title.clone(),
            intent.body.clone(),
            intent.data.clone(),
        )
    }
}
