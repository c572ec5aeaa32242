//! Inbound Messages
//!
//! Messages sent from the chat backend to the client. These are the server
//! events the session reconciles against the user's optimistic view:
//! acknowledgements, typing indicators, streamed tokens, completed messages
//! and errors.
//!
//! Kinds this client does not know decode to [`InboundMessage::Unknown`] and
//! are ignored, so a newer server never breaks an older client.

use serde::{Deserialize, Serialize};

/// Who authored a rendered message
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The local user
    #[default]
    User,
    /// The chat assistant
    Assistant,
    /// System notices
    System,
}

impl MessageRole {
    /// Lowercase display name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

/// Body of a completed assistant message
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantBody {
    /// Message text
    #[serde(default)]
    pub content: String,
    /// Role reported by the server (accepted, not used)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Messages from chat backend to client
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// The server accepted the last user message
    Ack,

    /// Assistant typing indicator
    Typing {
        /// Whether the assistant is currently composing
        #[serde(rename = "state", default)]
        on: bool,
    },

    /// One fragment of a streamed response
    Token {
        /// Fragment text
        #[serde(rename = "data", default)]
        text: String,
    },

    /// The streamed response is complete
    Done,

    /// A complete assistant message
    AssistantMessage {
        /// Message body
        #[serde(rename = "message", default)]
        body: AssistantBody,
    },

    /// Server-reported application error
    Error {
        /// Error text, if the server sent one
        #[serde(rename = "error", default)]
        message: Option<String>,
    },

    /// Reply to a keepalive ping
    Pong,

    /// Any kind this client does not understand
    #[serde(other)]
    Unknown,
}

impl InboundMessage {
    /// Short name for logging
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ack => "ack",
            Self::Typing { .. } => "typing",
            Self::Token { .. } => "token",
            Self::Done => "done",
            Self::AssistantMessage { .. } => "assistant_message",
            Self::Error { .. } => "error",
            Self::Pong => "pong",
            Self::Unknown => "unknown",
        }
    }
}
