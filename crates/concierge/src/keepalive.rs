//! Periodic heartbeat to keep the chat session warm.

use std::sync::Arc;
use std::time::Duration;

use concierge_core::{MessageSender, SendError};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

use crate::replies::HEARTBEAT;

/// Default heartbeat period (13 minutes).
pub const DEFAULT_KEEPALIVE_PERIOD: Duration = Duration::from_secs(13 * 60);

/// Sends [`HEARTBEAT`] to one peer on a fixed period.
pub struct KeepalivePulse {
    sender: Arc<dyn MessageSender>,
    peer: String,
    period: Duration,
}

impl KeepalivePulse {
    /// Create a pulse with the default period.
    pub fn new(sender: Arc<dyn MessageSender>, peer: impl Into<String>) -> Self {
        Self {
            sender,
            peer: peer.into(),
            period: DEFAULT_KEEPALIVE_PERIOD,
        }
    }

    /// Override the period.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// The heartbeat period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Send one heartbeat now.
    pub async fn fire(&self) -> Result<(), SendError> {
        let chat = self.sender.get_chat(&self.peer).await?;
        self.sender.send_text(&chat, HEARTBEAT).await
    }

    /// Run forever on a background task.
    ///
    /// The first heartbeat goes out one period after spawning. A failed
    /// heartbeat is logged and the timer keeps running.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "Keepalive started: pinging {} every {:?}",
                self.peer, self.period
            );
            let mut ticker = interval_at(Instant::now() + self.period, self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match self.fire().await {
                    Ok(()) => info!("Ping message sent"),
                    Err(e) => error!("Ping failed: {}", e),
                }
            }
        })
    }
}
