//! Server-Sent Events (SSE) client for receiving session events.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::Stream;
use reqwest_eventsource::{Event, EventSource, RequestBuilderExt};
use tracing::{debug, error, info, warn};

use crate::error::GatewayError;
use crate::types::{GatewayEvent, WaMessage};
use crate::WhatsAppClient;

/// A stream of session events from the bridge.
///
/// The underlying event source reconnects on its own after transient
/// failures; each failure is still surfaced as an `Err` item.
pub struct EventStream {
    event_source: EventSource,
}

impl EventStream {
    /// Open the event stream for a client's session.
    pub fn new(client: &WhatsAppClient) -> Result<Self, GatewayError> {
        let url = client.config().events_url();
        info!("Creating SSE connection to {}", url);

        // SSE connections are long-lived, so no request timeout here.
        let sse_client = reqwest::Client::builder()
            .build()
            .map_err(GatewayError::Http)?;

        let event_source = sse_client
            .get(&url)
            .eventsource()
            .map_err(|e| GatewayError::Sse(e.to_string()))?;

        Ok(Self { event_source })
    }

    /// Stop receiving events.
    pub fn close(&mut self) {
        self.event_source.close();
    }
}

/// Decode one SSE message into a gateway event.
///
/// Returns `None` for event types the bot does not act on.
pub(crate) fn decode_event(event: &str, data: &str) -> Option<Result<GatewayEvent, GatewayError>> {
    match event {
        "ready" => Some(Ok(GatewayEvent::Ready)),
        "message" => Some(
            serde_json::from_str::<WaMessage>(data)
                .map(GatewayEvent::Message)
                .map_err(GatewayError::Json),
        ),
        _ => None,
    }
}

impl Stream for EventStream {
    type Item = Result<GatewayEvent, GatewayError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.event_source).poll_next(cx) {
                Poll::Ready(Some(Ok(Event::Open))) => {
                    debug!("SSE connection opened");
                    continue;
                }
                Poll::Ready(Some(Ok(Event::Message(msg)))) => {
                    match decode_event(&msg.event, &msg.data) {
                        Some(Ok(event)) => return Poll::Ready(Some(Ok(event))),
                        Some(Err(e)) => {
                            warn!("Failed to parse SSE event data: {}", e);
                            debug!("Raw data: {}", msg.data);
                            continue;
                        }
                        None => {
                            debug!("Ignoring SSE event type: {}", msg.event);
                            continue;
                        }
                    }
                }
                Poll::Ready(Some(Err(e))) => {
                    error!("SSE error: {}", e);
                    return Poll::Ready(Some(Err(GatewayError::Sse(e.to_string()))));
                }
                Poll::Ready(None) => {
                    info!("SSE stream ended");
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Open the event stream for a client's session.
pub fn subscribe(client: &WhatsAppClient) -> Result<EventStream, GatewayError> {
    EventStream::new(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ready() {
        assert!(matches!(
            decode_event("ready", ""),
            Some(Ok(GatewayEvent::Ready))
        ));
    }

    #[test]
    fn test_decode_message() {
        let data = r#"{"from": "111@c.us", "body": "images", "timestamp": 5}"#;
        match decode_event("message", data) {
            Some(Ok(GatewayEvent::Message(msg))) => {
                assert_eq!(msg.from, "111@c.us");
                assert_eq!(msg.body, "images");
            }
            other => panic!("unexpected: {:?}", other.map(|r| r.is_ok())),
        }
    }

    #[test]
    fn test_decode_bad_message() {
        assert!(matches!(
            decode_event("message", "not json"),
            Some(Err(GatewayError::Json(_)))
        ));
    }

    #[test]
    fn test_decode_ignored() {
        assert!(decode_event("qr", "{}").is_none());
        assert!(decode_event("message_ack", "{}").is_none());
    }
}
