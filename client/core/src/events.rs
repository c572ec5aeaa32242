//! Outbound Events
//!
//! Messages sent from the client to the chat backend. There are only two
//! things a client ever says: who it is (sent on every connect) and what the
//! user typed.
//!
//! # Design Philosophy
//!
//! The client does not upload files. An attachment is announced by name and
//! size with a short preview of its data URL, capped at
//! [`MAX_PREVIEW_CHARS`] so a pasted file can never blow up a frame.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of characters kept from an attachment's data URL
pub const MAX_PREVIEW_CHARS: usize = 256;

/// Maximum length of a session identity accepted from a cache or history load
pub const MAX_SESSION_ID_LEN: usize = 64;

/// Opaque session identity correlating a connection with server-side state
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Accept a cached or server-issued identity
    ///
    /// Returns `None` for empty identities and identities longer than
    /// [`MAX_SESSION_ID_LEN`] characters; callers treat those as absent.
    /// Anything else is kept verbatim.
    #[must_use]
    pub fn from_cached(raw: &str) -> Option<Self> {
        if raw.is_empty() || raw.chars().count() > MAX_SESSION_ID_LEN {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    /// Mint a fresh random identity (UUID v4, simple hex form)
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Borrow the identity as a string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File announcement attached to a user message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// File name as chosen by the user
    pub name: String,
    /// Full file size in bytes
    #[serde(rename = "size")]
    pub size_bytes: u64,
    /// Leading part of the file's data URL
    #[serde(rename = "dataUrl")]
    pub truncated_preview: String,
}

impl Attachment {
    /// Describe a file, keeping at most [`MAX_PREVIEW_CHARS`] of its data URL
    #[must_use]
    pub fn new(name: impl Into<String>, size_bytes: u64, data_url: &str) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            truncated_preview: data_url.chars().take(MAX_PREVIEW_CHARS).collect(),
        }
    }
}

/// Messages from client to chat backend
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutboundMessage {
    /// Announce the session identity; sent on every successful connect
    Hello {
        /// Identity to resume, or `None` to let the server assign one
        session_id: Option<SessionId>,
    },

    /// Text typed by the user, optionally with a file announcement
    UserText {
        /// The message text
        text: String,
        /// Optional file announcement
        attachment: Option<Attachment>,
    },

    /// Application-level keepalive
    Ping,
}

impl OutboundMessage {
    /// Wire name of this message kind
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Hello { .. } => "cw_chat_hello",
            Self::UserText { .. } => "user_message",
            Self::Ping => "ping",
        }
    }
}
