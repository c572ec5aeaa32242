//! Connection Manager
//!
//! Owns the single live transport and drives its lifecycle:
//!
//! ```text
//! Disconnected --connect()--> Connecting --opened--> Connected
//!      ^                                                 |
//!      |                                              closed
//!      |                                                 v
//!      +----timer fires---- Disconnected (backoff scheduled)
//! ```
//!
//! There is no terminal state. Every close schedules exactly one reconnect
//! after `min(base * 2^attempts, cap)`, and every successful open resets the
//! attempt counter and announces the session identity with a `Hello`.
//!
//! The manager never blocks its caller: [`connect`](ConnectionManager::connect)
//! and [`send`](ConnectionManager::send) return immediately, and all waiting
//! happens inside [`next_event`](ConnectionManager::next_event), which is
//! cancel safe and can sit in a `tokio::select!` next to user input.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

use crate::events::{OutboundMessage, SessionId};
use crate::messages::InboundMessage;

use super::backoff::Backoff;
use super::config::TransportConfig;
use super::frame::{self, DecodeError};
use super::traits::{Connector, TransportError, TransportEvent, TransportLink};

/// Connection state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// No transport; a reconnect may be scheduled
    #[default]
    Disconnected,
    /// Transport created, handshake in progress
    Connecting,
    /// Handshake complete; sends go out
    Connected,
}

/// What happened to an outbound message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Handed to the live transport
    Sent,
    /// Not connected (or the transport just went away); discarded
    Dropped,
    /// Nothing to send
    Rejected,
}

/// Events the manager surfaces to the session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Transport opened and `Hello` was sent
    Opened,
    /// A decoded server message
    Inbound(InboundMessage),
    /// A frame that could not be decoded; the connection stays up
    DecodeFailed(DecodeError),
    /// A transport fault; a `Closed` follows
    Fault(TransportError),
    /// Transport closed; a reconnect is scheduled
    Closed {
        /// Delay before the reconnect attempt
        retry_in: Duration,
    },
}

/// Owner of the chat transport
pub struct ConnectionManager<C: Connector> {
    connector: C,
    config: TransportConfig,
    state: ConnectionState,
    backoff: Backoff,
    link: Option<TransportLink>,
    reconnect_at: Option<Instant>,
    next_ping_at: Option<Instant>,
}

impl<C: Connector> ConnectionManager<C> {
    /// Create a manager; nothing is dialed until [`connect`](Self::connect)
    pub fn new(connector: C, config: TransportConfig) -> Self {
        Self {
            backoff: config.backoff(),
            connector,
            config,
            state: ConnectionState::Disconnected,
            link: None,
            reconnect_at: None,
            next_ping_at: None,
        }
    }

    /// Current connection state
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Closes since the last successful open
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.backoff.attempts()
    }

    /// Whether a reconnect timer is pending
    #[must_use]
    pub fn reconnect_pending(&self) -> bool {
        self.reconnect_at.is_some()
    }

    /// Transport configuration
    #[must_use]
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Start connecting; no-op unless `Disconnected`
    ///
    /// A pending reconnect timer is consumed, so at most one attempt is ever
    /// in flight.
    pub fn connect(&mut self) {
        if self.state != ConnectionState::Disconnected {
            tracing::debug!(state = ?self.state, "connect() ignored");
            return;
        }

        let url = self.config.endpoint_url();
        tracing::info!(url = %url, attempt = self.backoff.attempts(), "Connecting");

        self.reconnect_at = None;
        self.link = Some(self.connector.open(&url));
        self.state = ConnectionState::Connecting;
    }

    /// Transmit a message if connected; otherwise drop it silently
    pub fn send(&self, message: &OutboundMessage) -> SendOutcome {
        let link = match (&self.link, self.state) {
            (Some(link), ConnectionState::Connected) => link,
            _ => {
                tracing::debug!(kind = message.kind(), state = ?self.state, "Not connected, message dropped");
                return SendOutcome::Dropped;
            }
        };

        match link.transmit(frame::encode(message)) {
            Ok(()) => SendOutcome::Sent,
            Err(e) => {
                tracing::warn!(kind = message.kind(), error = %e, "Transport gone, message dropped");
                SendOutcome::Dropped
            }
        }
    }

    /// Wait for the next thing the session needs to know about
    ///
    /// Runs reconnect timers and keepalive pings along the way. `identity` is
    /// announced in the `Hello` sent when a transport opens. Pends forever if
    /// the manager was never asked to connect.
    pub async fn next_event(&mut self, identity: Option<&SessionId>) -> ConnectionEvent {
        loop {
            let event = if let Some(link) = self.link.as_mut() {
                match self.next_ping_at {
                    Some(deadline) => tokio::select! {
                        event = link.recv() => event,
                        () = sleep_until(deadline) => {
                            self.ping();
                            continue;
                        }
                    },
                    None => link.recv().await,
                }
            } else if let Some(deadline) = self.reconnect_at {
                sleep_until(deadline).await;
                self.connect();
                continue;
            } else {
                std::future::pending::<()>().await;
                continue;
            };

            if let Some(event) = self.on_transport_event(event, identity) {
                return event;
            }
        }
    }

    fn on_transport_event(
        &mut self,
        event: TransportEvent,
        identity: Option<&SessionId>,
    ) -> Option<ConnectionEvent> {
        match event {
            TransportEvent::Opened => {
                if self.state != ConnectionState::Connecting {
                    tracing::warn!(state = ?self.state, "Unexpected open ignored");
                    return None;
                }
                self.state = ConnectionState::Connected;
                self.backoff.reset();
                self.next_ping_at = self
                    .config
                    .heartbeat_interval()
                    .map(|interval| Instant::now() + interval);

                tracing::info!(session_id = ?identity.map(SessionId::as_str), "Connected");
                self.send(&OutboundMessage::Hello {
                    session_id: identity.cloned(),
                });
                Some(ConnectionEvent::Opened)
            }

            TransportEvent::Frame(bytes) => match frame::decode(&bytes) {
                Ok(message) => Some(ConnectionEvent::Inbound(message)),
                Err(e) => {
                    tracing::warn!(error = %e, "Undecodable frame skipped");
                    Some(ConnectionEvent::DecodeFailed(e))
                }
            },

            TransportEvent::Error(e) => {
                tracing::warn!(error = %e, "Transport error");
                Some(ConnectionEvent::Fault(e))
            }

            TransportEvent::Closed { reason } => {
                self.link = None;
                self.next_ping_at = None;
                self.state = ConnectionState::Disconnected;

                let retry_in = self.backoff.next_delay();
                self.reconnect_at = Some(Instant::now() + retry_in);

                tracing::info!(
                    reason = reason.as_deref().unwrap_or("none"),
                    attempt = self.backoff.attempts(),
                    delay_ms = u64::try_from(retry_in.as_millis()).unwrap_or(u64::MAX),
                    "Disconnected, reconnect scheduled"
                );
                Some(ConnectionEvent::Closed { retry_in })
            }
        }
    }

    fn ping(&mut self) {
        self.send(&OutboundMessage::Ping);
        self.next_ping_at = self
            .config
            .heartbeat_interval()
            .map(|interval| Instant::now() + interval);
    }
}
