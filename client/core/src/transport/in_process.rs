//! In-Process Transport
//!
//! Channel-based connector for embedded mode and tests. Every dial is handed
//! to whoever holds the receiving end, who then plays the server: opening,
//! delivering frames, failing and closing at will.
//!
//! # Usage
//!
//! ```ignore
//! let (connector, mut dials) = InProcessConnector::new_pair();
//! let mut session = ChatSession::new(connector, TransportConfig::for_testing(), sink, None);
//!
//! session.connect();
//! let mut server = dials.recv().await.unwrap();
//! server.open();
//! server.deliver(r#"{"type":"ack"}"#);
//! ```

use tokio::sync::mpsc;

use super::traits::{link_pair, Connector, LinkPeer, TransportEvent, TransportError, TransportLink};

/// Connector whose transports are plain channels
#[derive(Clone, Debug)]
pub struct InProcessConnector {
    dials: mpsc::UnboundedSender<InProcessDial>,
}

impl InProcessConnector {
    /// Create a connector and the receiver its dials arrive on
    #[must_use]
    pub fn new_pair() -> (Self, mpsc::UnboundedReceiver<InProcessDial>) {
        let (dials, dial_rx) = mpsc::unbounded_channel();
        (Self { dials }, dial_rx)
    }
}

impl Connector for InProcessConnector {
    fn open(&self, url: &str) -> TransportLink {
        let (link, peer) = link_pair();
        let dial = InProcessDial {
            url: url.to_string(),
            peer,
        };
        if self.dials.send(dial).is_err() {
            tracing::debug!(url = %url, "No in-process server is listening");
        }
        link
    }
}

/// Server side of one in-process connection attempt
///
/// Dropping it without calling [`close`](Self::close) reads as a close on the
/// client side.
#[derive(Debug)]
pub struct InProcessDial {
    url: String,
    peer: LinkPeer,
}

impl InProcessDial {
    /// URL the client dialed
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Complete the handshake
    pub fn open(&self) -> bool {
        self.peer.emit(TransportEvent::Opened)
    }

    /// Deliver one text frame to the client
    pub fn deliver(&self, text: &str) -> bool {
        self.peer.emit(TransportEvent::Frame(text.as_bytes().to_vec()))
    }

    /// Report a transport fault to the client
    pub fn fail(&self, error: TransportError) -> bool {
        self.peer.emit(TransportEvent::Error(error))
    }

    /// Close the connection
    pub fn close(self, reason: Option<&str>) -> bool {
        self.peer.emit(TransportEvent::Closed {
            reason: reason.map(str::to_string),
        })
    }

    /// Wait for the next frame the client sent
    pub async fn next_frame(&mut self) -> Option<String> {
        self.peer.next_frame().await
    }

    /// Take a frame the client already sent, if any
    pub fn try_next_frame(&mut self) -> Option<String> {
        self.peer.try_next_frame()
    }

    /// Drain every frame the client has sent so far
    pub fn drain_frames(&mut self) -> Vec<String> {
        std::iter::from_fn(|| self.peer.try_next_frame()).collect()
    }

    /// Whether the client has let go of this connection
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.peer.is_link_dropped()
    }
}
