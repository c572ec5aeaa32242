//! Transport Layer for the Chat Client
//!
//! Separates the wire mechanism from the chat session:
//! - `InProcess`: channel pair, for embedding and tests
//! - `WebSocket`: the real backend connection (feature `websocket`)
//!
//! The [`ConnectionManager`] sits on top of whichever [`Connector`] is in use
//! and owns lifecycle, reconnect backoff, keepalive and frame decoding, so the
//! session only ever sees decoded [`ConnectionEvent`]s.

pub mod backoff;
pub mod config;
pub mod connection;
pub mod frame;
pub mod in_process;
pub mod traits;
#[cfg(feature = "websocket")]
pub mod websocket;

// Re-exports for convenience
pub use backoff::Backoff;
pub use config::TransportConfig;
pub use connection::{ConnectionEvent, ConnectionManager, ConnectionState, SendOutcome};
pub use frame::{DecodeError, MAX_FRAME_SIZE};
pub use in_process::{InProcessConnector, InProcessDial};
pub use traits::{link_pair, Connector, LinkPeer, TransportError, TransportEvent, TransportLink};

#[cfg(feature = "websocket")]
pub use websocket::WebSocketConnector;
