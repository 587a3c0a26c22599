//! Background task that drops idle sessions

use std::sync::Arc;
use std::time::Duration;

use chat_core::repositories::SessionRepository;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Periodically drop idle sessions. Runs until the returned task is aborted.
pub fn spawn_sweeper(store: Arc<dyn SessionRepository>, every: Duration) -> JoinHandle<()> {
    info!("Session sweeper started (every {:?})", every);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = store.purge_expired().await;
            debug!(
                "Sweep removed {} sessions, {} active",
                removed,
                store.count().await
            );
        }
    })
}
