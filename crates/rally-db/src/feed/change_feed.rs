//! Document change feed over PostgreSQL LISTEN/NOTIFY.
//!
//! Database triggers publish one JSON notification per document mutation;
//! the feed decodes them into [`RawChangeEvent`]s for the reactor.

use sqlx::postgres::PgListener;
use sqlx::PgPool;
use tokio::sync::mpsc;
use tracing::{error, info, trace, warn};

use rally_core::events::RawChangeEvent;

/// Error type for feed operations
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to parse event: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Channel closed")]
    ChannelClosed,
}

/// Result type for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Feed configuration
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Notification channel to listen on
    pub channel: String,
    /// Event buffer size
    pub buffer: usize,
    /// Reconnection delay in milliseconds
    pub reconnect_delay_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            channel: "document_events".to_string(),
            buffer: 1024,
            reconnect_delay_ms: 1000,
        }
    }
}

/// Document change feed
///
/// Owns a background task that holds the LISTEN connection and
/// reconnects on failure. Consumers take the receiver exactly once.
pub struct ChangeFeed {
    receiver: mpsc::Receiver<RawChangeEvent>,
}

impl ChangeFeed {
    /// Start listening on the configured channel
    pub fn start(pool: PgPool, config: FeedConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.buffer);

        tokio::spawn(Self::listener_loop(pool, config, tx));

        Self { receiver: rx }
    }

    /// Receive the next change event, or `None` when the feed has shut down
    pub async fn recv(&mut self) -> Option<RawChangeEvent> {
        self.receiver.recv().await
    }

    /// Background listener loop
    async fn listener_loop(pool: PgPool, config: FeedConfig, tx: mpsc::Sender<RawChangeEvent>) {
        loop {
            match Self::run_listener(&pool, &config, &tx).await {
                Ok(()) => {
                    info!("Change feed shutting down");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "Change feed error, reconnecting...");
                    tokio::time::sleep(tokio::time::Duration::from_millis(
                        config.reconnect_delay_ms,
                    ))
                    .await;
                }
            }
        }
    }

    /// Run the listener until error or receiver drop
    async fn run_listener(
        pool: &PgPool,
        config: &FeedConfig,
        tx: &mpsc::Sender<RawChangeEvent>,
    ) -> FeedResult<()> {
        let mut listener = PgListener::connect_with(pool).await?;
        listener.listen(&config.channel).await?;

        info!(channel = %config.channel, "Change feed connected");

        loop {
            let notification = listener.recv().await?;

            let event: RawChangeEvent = match serde_json::from_str(notification.payload()) {
                Ok(event) => event,
                Err(e) => {
                    warn!(error = %e, "Discarding malformed change notification");
                    continue;
                }
            };

            trace!(path = %event.path, kind = %event.kind, "Received change event");

            if tx.send(event).await.is_err() {
                // Receiver dropped, nothing left to feed
                return Ok(());
            }
        }
    }
}
