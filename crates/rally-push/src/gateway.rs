//! Push gateway - the seam between dispatch and the delivery service

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use rally_common::PushConfig;

use crate::payload::PushPayload;

/// Error type for gateway operations
#[derive(Debug, Error)]
pub enum PushError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway rejected delivery ({status}): {message}")]
    Gateway { status: u16, message: String },
}

/// Result type for gateway operations
pub type PushResult<T> = Result<T, PushError>;

/// Abstraction over the push delivery service
///
/// One call delivers one payload to one device. Multicast is composed
/// above this seam so per-token failures stay observable.
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Deliver one payload
    async fn send(&self, payload: &PushPayload) -> PushResult<()>;
}

/// HTTP implementation of the push gateway
pub struct HttpPushGateway {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpPushGateway {
    /// Create a gateway client from configuration
    pub fn new(config: &PushConfig) -> PushResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl PushGateway for HttpPushGateway {
    async fn send(&self, payload: &PushPayload) -> PushResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PushError::Gateway {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
