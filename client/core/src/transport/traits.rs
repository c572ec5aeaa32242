//! Transport Traits
//!
//! Core definitions for the client side of a chat connection.
//!
//! A [`Connector`] dials an endpoint and hands back a [`TransportLink`]
//! immediately; the actual handshake and socket I/O run in a spawned task
//! that talks to the link through a [`LinkPeer`]. Lifecycle news (open, data,
//! error, close) arrives on the link as [`TransportEvent`]s, in order.

use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during transport operations
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection to the server failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// The handshake did not finish in time
    #[error("Connection timed out after {0} ms")]
    Timeout(u64),
    /// Connection was closed
    #[error("Connection closed")]
    ConnectionClosed,
    /// Failed to send a frame
    #[error("Send failed: {0}")]
    SendFailed(String),
    /// Failed to receive a frame
    #[error("Receive failed: {0}")]
    ReceiveFailed(String),
}

/// Lifecycle and data events produced by a live transport
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    /// Handshake finished; frames may now be sent
    Opened,
    /// One inbound data frame
    Frame(Vec<u8>),
    /// A transport-level fault; a `Closed` always follows
    Error(TransportError),
    /// The transport is gone
    Closed {
        /// Close reason, if the peer gave one
        reason: Option<String>,
    },
}

/// Client-side handle to one transport
///
/// Owned exclusively by the connection manager. Dropping it tells the
/// transport task to shut the socket.
#[derive(Debug)]
pub struct TransportLink {
    frames: mpsc::UnboundedSender<String>,
    events: mpsc::UnboundedReceiver<TransportEvent>,
}

impl TransportLink {
    /// Queue one outbound frame; never waits
    ///
    /// # Errors
    ///
    /// Returns `TransportError::ConnectionClosed` if the transport task is gone.
    pub fn transmit(&self, frame: String) -> Result<(), TransportError> {
        self.frames
            .send(frame)
            .map_err(|_| TransportError::ConnectionClosed)
    }

    /// Wait for the next transport event
    ///
    /// A transport task that vanished without saying goodbye reads as
    /// `Closed`. Cancel safe.
    pub async fn recv(&mut self) -> TransportEvent {
        self.events
            .recv()
            .await
            .unwrap_or(TransportEvent::Closed { reason: None })
    }
}

/// Transport-task side of a [`TransportLink`]
#[derive(Debug)]
pub struct LinkPeer {
    frames: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<TransportEvent>,
}

impl LinkPeer {
    /// Report an event to the link; returns false if the link was dropped
    pub fn emit(&self, event: TransportEvent) -> bool {
        self.events.send(event).is_ok()
    }

    /// Wait for the next frame the client wants sent
    ///
    /// Returns `None` once the link has been dropped.
    pub async fn next_frame(&mut self) -> Option<String> {
        self.frames.recv().await
    }

    /// Take a queued outbound frame without waiting
    pub fn try_next_frame(&mut self) -> Option<String> {
        self.frames.try_recv().ok()
    }

    /// Whether the client side has dropped the link
    #[must_use]
    pub fn is_link_dropped(&self) -> bool {
        self.events.is_closed()
    }
}

/// Create a connected link/peer pair
#[must_use]
pub fn link_pair() -> (TransportLink, LinkPeer) {
    let (frame_tx, frame_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    (
        TransportLink {
            frames: frame_tx,
            events: event_rx,
        },
        LinkPeer {
            frames: frame_rx,
            events: event_tx,
        },
    )
}

/// Dials chat endpoints
///
/// `open` must return at once; the handshake happens in the background and
/// is reported through the link as `Opened`, or as `Error` then `Closed`.
pub trait Connector: Send + Sync {
    /// Start connecting to `url`
    fn open(&self, url: &str) -> TransportLink;
}
