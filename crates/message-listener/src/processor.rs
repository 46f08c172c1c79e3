//! Message processor that connects the bridge's event stream to a TurnRouter.

use std::sync::Arc;

use concierge::{KeepalivePulse, TurnRouter};
use concierge_core::InboundMessage;
use futures::{Stream, StreamExt};
use thiserror::Error;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info, warn};
use wa_gateway::{GatewayError, GatewayEvent, WaMessage};

/// Configuration for the message processor.
#[derive(Debug, Clone, Default)]
pub struct ProcessorConfig {
    /// The bot's own chat id (to ignore messages from self).
    pub bot_id: Option<String>,
}

impl ProcessorConfig {
    /// Create a new config with the bot's chat id.
    pub fn with_bot_id(bot_id: impl Into<String>) -> Self {
        Self {
            bot_id: Some(bot_id.into()),
        }
    }
}

/// Errors that can occur while running the processor.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// Error from the bridge.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The event stream ended unexpectedly.
    #[error("event stream ended")]
    StreamEnded,
}

/// What the processor did with one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// The message was handed to the router on its own task.
    Dispatched { sender: String },
    /// The message was dropped.
    Skipped { reason: &'static str },
    /// The session became ready.
    Ready { keepalive_started: bool },
}

/// Convert a bridge message into the router's input.
pub fn to_inbound(message: WaMessage) -> InboundMessage {
    InboundMessage {
        id: message.id,
        sender: message.from,
        text: message.body,
        timestamp: message.timestamp,
        has_media: message.has_media,
        media_type: message.kind.filter(|_| message.has_media),
    }
}

/// Receives bridge events and routes each chat message to a [`TurnRouter`].
pub struct MessageProcessor {
    router: Arc<TurnRouter>,
    config: ProcessorConfig,
    keepalive: Option<KeepalivePulse>,
    keepalive_handle: Option<JoinHandle<()>>,
    turns: JoinSet<()>,
}

impl MessageProcessor {
    /// Create a new message processor.
    pub fn new(router: TurnRouter, config: ProcessorConfig) -> Self {
        Self {
            router: Arc::new(router),
            config,
            keepalive: None,
            keepalive_handle: None,
            turns: JoinSet::new(),
        }
    }

    /// Start this pulse the first time the session reports ready.
    pub fn with_keepalive(mut self, pulse: KeepalivePulse) -> Self {
        self.keepalive = Some(pulse);
        self
    }

    /// Get a reference to the router.
    pub fn router(&self) -> &TurnRouter {
        &self.router
    }

    /// Check if we should process this message.
    fn should_process(&self, message: &WaMessage) -> Result<(), &'static str> {
        if message.is_own(self.config.bot_id.as_deref()) {
            return Err("message from self");
        }

        if message.is_status_broadcast() {
            return Err("status broadcast");
        }

        Ok(())
    }

    /// Handle one bridge event.
    ///
    /// Chat messages are dispatched onto their own task; call
    /// [`drain`](Self::drain) to wait for them.
    pub fn process_event(&mut self, event: GatewayEvent) -> ProcessResult {
        match event {
            GatewayEvent::Ready => {
                info!("WhatsApp session is ready");
                let keepalive_started = match self.keepalive.take() {
                    Some(pulse) => {
                        self.keepalive_handle = Some(pulse.spawn());
                        true
                    }
                    None => false,
                };
                ProcessResult::Ready { keepalive_started }
            }
            GatewayEvent::Message(message) => self.process_message(message),
        }
    }

    fn process_message(&mut self, message: WaMessage) -> ProcessResult {
        if let Err(reason) = self.should_process(&message) {
            debug!("Skipping message from {}: {}", message.from, reason);
            return ProcessResult::Skipped { reason };
        }

        let inbound = to_inbound(message);
        let sender = inbound.sender.clone();
        info!("Processing message from {}: {}", sender, inbound.text);

        let router = Arc::clone(&self.router);
        self.turns.spawn(async move {
            match router.handle(&inbound).await {
                Ok(outcome) => debug!(
                    "Turn for {} finished: {:?} (greeted: {})",
                    inbound.sender, outcome.action, outcome.greeted
                ),
                Err(e) => error!("Failed to reply to {}: {}", inbound.sender, e),
            }
        });

        ProcessResult::Dispatched { sender }
    }

    /// Wait for every in-flight turn to finish.
    pub async fn drain(&mut self) {
        while let Some(joined) = self.turns.join_next().await {
            if let Err(e) = joined {
                error!("Turn task failed: {}", e);
            }
        }
    }

    fn stop_keepalive(&mut self) {
        if let Some(handle) = self.keepalive_handle.take() {
            handle.abort();
        }
    }

    /// Run the processor until the event stream ends.
    pub async fn run<St>(self, events: St) -> Result<(), ProcessorError>
    where
        St: Stream<Item = Result<GatewayEvent, GatewayError>> + Unpin,
    {
        self.run_with_shutdown(events, std::future::pending()).await
    }

    /// Run the processor with graceful shutdown support.
    ///
    /// This method runs until either:
    /// - The provided shutdown signal completes (returns `Ok`)
    /// - The event stream ends (returns [`ProcessorError::StreamEnded`])
    ///
    /// Stream errors are logged and the loop keeps going. In-flight turns
    /// are awaited before returning either way.
    pub async fn run_with_shutdown<St, S>(
        mut self,
        mut events: St,
        shutdown_signal: S,
    ) -> Result<(), ProcessorError>
    where
        St: Stream<Item = Result<GatewayEvent, GatewayError>> + Unpin,
        S: std::future::Future<Output = ()> + Send,
    {
        info!("Starting message processor (graceful shutdown enabled)");

        tokio::pin!(shutdown_signal);

        let result = loop {
            tokio::select! {
                biased;

                () = &mut shutdown_signal => {
                    info!("Shutdown signal received, stopping message processor");
                    break Ok(());
                }

                Some(joined) = self.turns.join_next(), if !self.turns.is_empty() => {
                    if let Err(e) = joined {
                        error!("Turn task failed: {}", e);
                    }
                }

                event = events.next() => {
                    match event {
                        Some(Ok(event)) => {
                            let result = self.process_event(event);
                            debug!("Event processed: {:?}", result);
                        }
                        Some(Err(e)) => {
                            error!("Stream error: {}", e);
                        }
                        None => {
                            warn!("Event stream ended");
                            break Err(ProcessorError::StreamEnded);
                        }
                    }
                }
            }
        };

        self.stop_keepalive();
        self.drain().await;
        result
    }
}

impl Drop for MessageProcessor {
    fn drop(&mut self) {
        self.stop_keepalive();
    }
}
