//! Chat Session
//!
//! The one object a host constructs per chat. It owns the connection manager
//! and the stream assembler, holds the session identity, and turns
//! everything that happens on the wire into [`Notification`]s for the UI.
//!
//! # Event loop
//!
//! ```text
//! host ──send_user_message()──▶ ChatSession ──encode──▶ ConnectionManager ──▶ transport
//!                                   │
//!                                   │ step(): ConnectionEvent
//!                                   ▼
//!                     dispatch by kind ──▶ StreamAssembler (token / done)
//!                                   │
//!                                   ▼
//!                          NotificationSink (render, typing, stream, error)
//! ```
//!
//! Nothing here blocks. The host drives the session by awaiting
//! [`step`](ChatSession::step) (or [`run`](ChatSession::run)) on its event
//! loop; `step` is cancel safe, so it can share a `tokio::select!` with user
//! input.

use chrono::{DateTime, Utc};

use crate::error::ChatError;
use crate::events::{Attachment, OutboundMessage, SessionId};
use crate::history::HistorySnapshot;
use crate::messages::{InboundMessage, MessageRole};
use crate::notifications::{Notification, NotificationSink};
use crate::streaming::{StreamAssembler, StreamSignal};
use crate::transport::{
    ConnectionEvent, ConnectionManager, ConnectionState, Connector, SendOutcome, TransportConfig,
};

/// A single chat session bound to one backend
pub struct ChatSession<C: Connector, S: NotificationSink> {
    manager: ConnectionManager<C>,
    assembler: StreamAssembler,
    sink: S,
    session_id: Option<SessionId>,
}

impl<C: Connector, S: NotificationSink> ChatSession<C, S> {
    /// Create a session; call [`connect`](Self::connect) to go online
    pub fn new(connector: C, config: TransportConfig, sink: S, session_id: Option<SessionId>) -> Self {
        Self {
            manager: ConnectionManager::new(connector, config),
            assembler: StreamAssembler::new(),
            sink,
            session_id,
        }
    }

    /// Current session identity
    #[must_use]
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Current connection state
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.manager.state()
    }

    /// Whether a streamed reply is in progress
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.assembler.is_active()
    }

    /// Start connecting; no-op unless disconnected
    pub fn connect(&mut self) {
        self.manager.connect();
    }

    /// Send what the user typed
    ///
    /// The message is rendered locally before the send is attempted, whether
    /// or not it gets out. A message typed while offline is dropped without
    /// an error notification; the returned [`SendOutcome`] tells the caller
    /// which happened. Blank text is rejected outright, with or without an
    /// attachment.
    ///
    /// Typing is only turned on once the frame is out; a dropped send leaves
    /// the indicator untouched.
    pub fn send_user_message(&self, text: &str, attachment: Option<Attachment>) -> SendOutcome {
        if text.trim().is_empty() {
            tracing::debug!(has_attachment = attachment.is_some(), "Blank message ignored");
            return SendOutcome::Rejected;
        }

        self.sink.notify(Notification::Render {
            role: MessageRole::User,
            content: text.to_string(),
            timestamp: Utc::now(),
        });

        let outcome = self.manager.send(&OutboundMessage::UserText {
            text: text.to_string(),
            attachment,
        });

        if outcome == SendOutcome::Sent {
            self.sink.notify(Notification::Typing(true));
        }
        outcome
    }

    /// Process the next connection event
    ///
    /// Cancel safe. Pends until the session has something to report.
    pub async fn step(&mut self) {
        let event = self.manager.next_event(self.session_id.as_ref()).await;
        self.on_connection_event(event);
    }

    /// Process connection events forever
    pub async fn run(&mut self) {
        loop {
            self.step().await;
        }
    }

    fn on_connection_event(&mut self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Opened => {
                // Whatever was streaming belongs to the old connection
                self.assembler.reset();
                self.sink.notify(Notification::Connected);
            }
            ConnectionEvent::Inbound(message) => self.on_inbound_message(message),
            ConnectionEvent::DecodeFailed(e) => {
                self.sink.notify(Notification::Error(ChatError::Decode(e)));
            }
            ConnectionEvent::Fault(e) => {
                self.sink.notify(Notification::Error(ChatError::Transport(e)));
            }
            ConnectionEvent::Closed { retry_in } => {
                self.sink.notify(Notification::Typing(false));
                self.sink.notify(Notification::Disconnected { retry_in });
            }
        }
    }

    /// Dispatch one decoded server message
    pub fn on_inbound_message(&mut self, message: InboundMessage) {
        tracing::trace!(kind = message.kind(), "Inbound message");

        match message {
            InboundMessage::Ack | InboundMessage::Pong | InboundMessage::Unknown => {}

            InboundMessage::Typing { on } => self.sink.notify(Notification::Typing(on)),

            InboundMessage::Token { text } => {
                let signal = self.assembler.on_token(&text);
                self.forward_stream_signal(signal);
            }

            InboundMessage::Done => {
                let signal = self.assembler.on_done();
                self.forward_stream_signal(signal);
                self.sink.notify(Notification::Typing(false));
            }

            InboundMessage::AssistantMessage { body } => {
                self.sink.notify(Notification::Render {
                    role: MessageRole::Assistant,
                    content: body.content,
                    timestamp: Utc::now(),
                });
            }

            InboundMessage::Error { message } => {
                let error = ChatError::protocol(message);
                tracing::warn!(error = %error, "Server reported an error");
                self.sink.notify(Notification::Error(error));
            }
        }
    }

    /// Seed the session from a history load
    ///
    /// Adopts the server's session identity when it is valid and replays the
    /// stored messages as renders. Takes effect on the next `Hello`; a live
    /// connection is not re-announced.
    pub fn apply_history(&mut self, snapshot: &HistorySnapshot) {
        match snapshot.session_id.as_deref().map(SessionId::from_cached) {
            Some(Some(id)) => {
                if self.session_id.as_ref() != Some(&id) {
                    tracing::info!(session_id = %id, "Adopting session from history");
                }
                self.session_id = Some(id);
            }
            Some(None) => tracing::warn!("History carried an unusable session id, keeping ours"),
            None => {}
        }

        for entry in &snapshot.messages {
            let timestamp = entry
                .at
                .as_deref()
                .and_then(|at| DateTime::parse_from_rfc3339(at).ok())
                .map_or_else(Utc::now, |at| at.with_timezone(&Utc));

            self.sink.notify(Notification::Render {
                role: entry.role,
                content: entry.content.clone(),
                timestamp,
            });
        }
    }

    fn forward_stream_signal(&self, signal: StreamSignal) {
        let notification = match signal {
            StreamSignal::Started(text) => Notification::StreamStarted { text },
            StreamSignal::Updated(text) => Notification::StreamUpdated { text },
            StreamSignal::Finished => Notification::StreamFinished,
        };
        self.sink.notify(notification);
    }
}
