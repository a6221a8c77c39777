//! # rally-worker
//!
//! Wires configuration, storage, and push delivery together, then runs
//! two long-lived tasks: the change feed consumer and the cleanup
//! sweeper. Neither task crashes on a bad event; failures are logged
//! and the loops keep going.

use std::sync::Arc;

use anyhow::Context as _;
use tracing::{error, info, warn};

use rally_common::AppConfig;
use rally_db::{
    create_pool, ChangeFeed, FeedConfig, PgPlanRepository, PgSubscriptionRepository,
    PgUserProfileRepository,
};
use rally_push::{HttpPushGateway, NotificationDispatcher};
use rally_reactor::{CleanupSweeper, EventRouter, ReactorContext, ReactorError};

/// Build the reactor context from configuration
async fn create_context(config: &AppConfig) -> anyhow::Result<(ReactorContext, rally_db::PgPool)> {
    info!("Connecting to PostgreSQL...");
    let db_config = rally_db::DatabaseConfig::new(
        config.database.url.clone(),
        config.database.max_connections,
        config.database.min_connections,
    );
    let pool = create_pool(&db_config)
        .await
        .context("failed to connect to PostgreSQL")?;
    info!("PostgreSQL connection established");

    let gateway = HttpPushGateway::new(&config.push).context("failed to build push gateway")?;
    let dispatcher = NotificationDispatcher::new(Arc::new(gateway));

    let context = ReactorContext::new(
        Arc::new(PgPlanRepository::new(pool.clone())),
        Arc::new(PgSubscriptionRepository::new(pool.clone())),
        Arc::new(PgUserProfileRepository::new(pool.clone())),
        dispatcher,
    );

    Ok((context, pool))
}

/// Consume the change feed, dispatching every event through the router
///
/// Decode problems are warnings; store failures are errors. Both leave
/// the loop running.
async fn consume_feed(mut feed: ChangeFeed, router: EventRouter) {
    while let Some(raw) = feed.recv().await {
        match router.dispatch(&raw).await {
            Ok(_) => {}
            Err(e @ (ReactorError::Unrouted(_) | ReactorError::Decode(_))) => {
                warn!(path = %raw.path, kind = %raw.kind, error = %e, "event not dispatched");
            }
            Err(e) => {
                error!(path = %raw.path, kind = %raw.kind, error = %e, "event handling failed");
            }
        }
    }
    info!("Change feed closed");
}

/// Run the complete worker with configuration
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let (context, pool) = create_context(&config).await?;

    let feed = ChangeFeed::start(
        pool,
        FeedConfig {
            channel: config.feed.channel.clone(),
            reconnect_delay_ms: config.feed.reconnect_delay_ms,
            ..FeedConfig::default()
        },
    );

    let router = EventRouter::new(context.clone());
    let sweeper = CleanupSweeper::new(context, config.sweep.clone());

    let sweep_task = tokio::spawn(sweeper.run());
    let feed_task = tokio::spawn(consume_feed(feed, router));

    info!("Worker running, press ctrl-c to stop");

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for ctrl-c")?;
            info!("Shutdown signal received");
        }
        _ = feed_task => {
            error!("Change feed task exited unexpectedly");
        }
    }

    sweep_task.abort();

    info!("Worker stopped");
    Ok(())
}
