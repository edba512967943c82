//! Background data refresh system
//!
//! Provides automatic refresh of the feed snapshot in the background using
//! tokio channels to communicate updates to the main application.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::data::{FeedSnapshot, SocialClient};

/// Messages sent from background refresh to main app
#[derive(Debug, Clone)]
pub enum RefreshMessage {
    /// A refresh cycle has started
    RefreshStarted,
    /// A fresh snapshot is available
    SnapshotUpdated(FeedSnapshot),
    /// An error occurred during refresh
    RefreshError(String),
    /// Refresh cycle completed
    RefreshCompleted,
}

/// Configuration for the refresh interval
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Interval between snapshot refreshes
    pub interval: Duration,
    /// Whether auto-refresh is enabled
    pub enabled: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            enabled: true,
        }
    }
}

/// Handle for controlling the background refresh system
pub struct RefreshHandle {
    /// Channel for receiving refresh messages
    pub receiver: mpsc::Receiver<RefreshMessage>,
    /// Flag to signal shutdown
    shutdown_tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Creates a new RefreshHandle and spawns the background refresh task
    ///
    /// Each tick re-reads the full snapshot through the cached client, so how
    /// often the source is actually hit is governed by the cache TTL, not the
    /// tick interval.
    ///
    /// # Arguments
    /// * `config` - Configuration for the refresh interval
    /// * `client` - Shared client the snapshot is read through
    ///
    /// # Returns
    /// A RefreshHandle that receives updates via the `receiver` channel
    pub fn spawn(config: RefreshConfig, client: Arc<SocialClient>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(32);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        if config.enabled {
            let tick_interval = config.interval;
            let tx = msg_tx.clone();

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(tick_interval);
                // Skip the first tick (immediate); the app performs the
                // initial load itself
                interval.tick().await;

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            let _ = tx.send(RefreshMessage::RefreshStarted).await;

                            match client.snapshot().await {
                                Ok(snapshot) => {
                                    let _ = tx
                                        .send(RefreshMessage::SnapshotUpdated(snapshot))
                                        .await;
                                }
                                Err(err) => {
                                    let _ = tx
                                        .send(RefreshMessage::RefreshError(err.to_string()))
                                        .await;
                                }
                            }

                            let _ = tx.send(RefreshMessage::RefreshCompleted).await;
                        }
                        _ = shutdown_rx.recv() => {
                            break;
                        }
                    }
                }
            });
        }

        Self {
            receiver: msg_rx,
            shutdown_tx,
        }
    }

    /// Shuts down the background refresh task
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Checks for pending refresh messages without blocking
///
/// # Arguments
/// * `handle` - The RefreshHandle to check
///
/// # Returns
/// * `Some(RefreshMessage)` if a message was available
/// * `None` if no messages are pending
pub fn try_recv(handle: &mut RefreshHandle) -> Option<RefreshMessage> {
    handle.receiver.try_recv().ok()
}
