//! WebSocket Transport
//!
//! Dials the chat backend with `tokio-tungstenite`. Each [`open`](Connector::open)
//! spawns one I/O task that performs the handshake under a timeout, then
//! shuttles frames between the socket and the [`LinkPeer`] until either side
//! goes away.
//!
//! Protocol-level ping/pong frames are answered by tungstenite itself and
//! never reach the link; only text and binary payloads do.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::config::TransportConfig;
use super::traits::{link_pair, Connector, LinkPeer, TransportError, TransportEvent, TransportLink};

/// Connector for `ws://` and `wss://` endpoints
#[derive(Clone, Debug)]
pub struct WebSocketConnector {
    connect_timeout: Duration,
}

impl WebSocketConnector {
    /// Create a connector whose handshakes give up after `connect_timeout`
    #[must_use]
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    /// Create a connector from transport configuration
    #[must_use]
    pub fn from_config(config: &TransportConfig) -> Self {
        Self::new(config.connect_timeout())
    }
}

impl Default for WebSocketConnector {
    fn default() -> Self {
        Self::from_config(&TransportConfig::default())
    }
}

impl Connector for WebSocketConnector {
    /// Must be called from within a Tokio runtime; outside one the returned
    /// link reads as closed straight away.
    fn open(&self, url: &str) -> TransportLink {
        let (link, peer) = link_pair();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(run_socket(url.to_string(), self.connect_timeout, peer));
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "No runtime to drive the WebSocket");
            }
        }

        link
    }
}

async fn run_socket(url: String, connect_timeout: Duration, mut peer: LinkPeer) {
    let stream = match tokio::time::timeout(connect_timeout, connect_async(url.as_str())).await {
        Ok(Ok((stream, _response))) => stream,
        Ok(Err(e)) => {
            tracing::warn!(url = %url, error = %e, "WebSocket handshake failed");
            peer.emit(TransportEvent::Error(TransportError::ConnectionFailed(
                e.to_string(),
            )));
            peer.emit(TransportEvent::Closed { reason: None });
            return;
        }
        Err(_) => {
            let ms = u64::try_from(connect_timeout.as_millis()).unwrap_or(u64::MAX);
            tracing::warn!(url = %url, timeout_ms = ms, "WebSocket handshake timed out");
            peer.emit(TransportEvent::Error(TransportError::Timeout(ms)));
            peer.emit(TransportEvent::Closed { reason: None });
            return;
        }
    };

    if !peer.emit(TransportEvent::Opened) {
        tracing::debug!(url = %url, "Link dropped during handshake");
        return;
    }
    tracing::debug!(url = %url, "WebSocket open");

    let (mut sink, mut source) = stream.split();

    let reason = loop {
        tokio::select! {
            incoming = source.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    peer.emit(TransportEvent::Frame(text.into_bytes()));
                }
                Some(Ok(Message::Binary(data))) => {
                    peer.emit(TransportEvent::Frame(data));
                }
                Some(Ok(Message::Close(frame))) => {
                    break frame
                        .map(|f| f.reason.into_owned())
                        .filter(|reason| !reason.is_empty());
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "WebSocket read error");
                    peer.emit(TransportEvent::Error(TransportError::ReceiveFailed(
                        e.to_string(),
                    )));
                    break None;
                }
                None => break None,
            },

            outgoing = peer.next_frame() => match outgoing {
                Some(frame) => {
                    if let Err(e) = sink.send(Message::Text(frame)).await {
                        tracing::warn!(error = %e, "WebSocket write error");
                        peer.emit(TransportEvent::Error(TransportError::SendFailed(
                            e.to_string(),
                        )));
                        break None;
                    }
                }
                None => {
                    // Link dropped: the manager no longer wants this socket
                    if let Err(e) = sink.close().await {
                        tracing::debug!(error = %e, "WebSocket close failed");
                    }
                    tracing::debug!(url = %url, "WebSocket released");
                    return;
                }
            },
        }
    };

    tracing::debug!(url = %url, reason = reason.as_deref().unwrap_or("none"), "WebSocket closed");
    peer.emit(TransportEvent::Closed { reason });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_refused_connection_reports_error_then_close() {
        // Reserve a port, then free it so nothing is listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let connector = WebSocketConnector::new(Duration::from_secs(2));
        let mut link = connector.open(&format!("ws://{addr}/app/ws"));

        assert!(matches!(
            link.recv().await,
            TransportEvent::Error(TransportError::ConnectionFailed(_))
        ));
        assert_eq!(link.recv().await, TransportEvent::Closed { reason: None });
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        // Accepts TCP but never answers the upgrade request
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _hold = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            std::future::pending::<()>().await;
        });

        let connector = WebSocketConnector::new(Duration::from_millis(100));
        let mut link = connector.open(&format!("ws://{addr}/app/ws"));

        assert_eq!(
            link.recv().await,
            TransportEvent::Error(TransportError::Timeout(100))
        );
        assert_eq!(link.recv().await, TransportEvent::Closed { reason: None });
    }

    #[test]
    fn test_open_outside_runtime_reads_as_closed() {
        let connector = WebSocketConnector::default();
        let mut link = connector.open("ws://localhost:1/app/ws");

        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        assert_eq!(
            rt.block_on(link.recv()),
            TransportEvent::Closed { reason: None }
        );
    }
}
