//! cw-chat Core - Connection and Protocol Core for the Chat Client
//!
//! Everything a chat front end needs between "the user typed something" and
//! "the backend answered", with no UI attached. A host constructs one
//! [`ChatSession`], injects a [`Connector`] and a [`NotificationSink`], and
//! drives it from its own event loop.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          Host / UI                               │
//! │   send_user_message()            ▲ Notification (render, typing, │
//! │          │                       │   stream, error, link status) │
//! └──────────┼───────────────────────┼───────────────────────────────┘
//!            ▼                       │
//! ┌──────────────────────────────────┴───────────────────────────────┐
//! │                         ChatSession                              │
//! │   session identity      StreamAssembler (token → cumulative text)│
//! │          │                       ▲                               │
//! │          ▼                       │ ConnectionEvent               │
//! │  ┌────────────────────────────────────────────────────────────┐  │
//! │  │                   ConnectionManager                         │  │
//! │  │  state machine · backoff · keepalive · frame encode/decode  │  │
//! │  └──────────────────────────────┬─────────────────────────────┘  │
//! └─────────────────────────────────┼────────────────────────────────┘
//!                                   │ TransportLink
//!                        ┌──────────┴──────────┐
//!                        │ WebSocket │ InProcess│
//!                        └─────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use cw_chat_core::{load_config, ChatSession, WebSocketConnector};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config()?;
//!     let (tx, mut rx) = mpsc::unbounded_channel();
//!
//!     let connector = WebSocketConnector::from_config(&config.transport);
//!     let mut session = ChatSession::new(connector, config.transport, tx, config.session_id);
//!     session.connect();
//!
//!     loop {
//!         tokio::select! {
//!             () = session.step() => {}
//!             Some(notification) = rx.recv() => {
//!                 // Render notification
//!             }
//!         }
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`events`]: Messages from client to backend, session identity
//! - [`messages`]: Messages from backend to client
//! - [`transport`]: Codec, connection manager, connectors
//! - [`streaming`]: Streamed reply assembly
//! - [`session`]: The chat session
//! - [`notifications`]: UI-facing notifications and sinks
//! - [`history`]: Seeding a session from stored history
//! - [`config`]: File, environment and CLI configuration
//! - [`error`]: Reportable errors

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod events;
pub mod history;
pub mod messages;
pub mod notifications;
pub mod session;
pub mod streaming;
pub mod transport;

// Re-exports for convenience
pub use error::{ChatError, DEFAULT_SERVER_ERROR};
pub use events::{Attachment, OutboundMessage, SessionId, MAX_PREVIEW_CHARS, MAX_SESSION_ID_LEN};
pub use messages::{AssistantBody, InboundMessage, MessageRole};
pub use notifications::{Notification, NotificationSink};
pub use session::ChatSession;

// History exports
pub use history::{HistoryEntry, HistoryError, HistoryLoader, HistorySnapshot, HttpHistoryLoader};

// Streaming exports
pub use streaming::{StreamAssembler, StreamSignal};

// Transport exports
pub use transport::{
    Backoff, ConnectionEvent, ConnectionManager, ConnectionState, Connector, DecodeError,
    InProcessConnector, InProcessDial, SendOutcome, TransportConfig, TransportError,
};
#[cfg(feature = "websocket")]
pub use transport::WebSocketConnector;

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, load_config_with_env, ClientConfig,
    ClientToml, ConfigError, ConfigOverrides, ConfigSource,
};
