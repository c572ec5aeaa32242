//! UI Notifications
//!
//! Everything the session has to say to whatever is drawing the chat. The
//! session never renders anything itself; it pushes [`Notification`]s into an
//! injected [`NotificationSink`].

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::error::ChatError;
use crate::messages::MessageRole;

/// A UI-facing event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// Show a complete message
    Render {
        /// Author
        role: MessageRole,
        /// Message text
        content: String,
        /// When the message was sent or received
        timestamp: DateTime<Utc>,
    },

    /// Show or hide the assistant typing indicator
    Typing(bool),

    /// A streamed reply began; show progress with the text so far
    StreamStarted {
        /// Cumulative text
        text: String,
    },

    /// A streamed reply grew; replace the displayed text
    StreamUpdated {
        /// Cumulative text
        text: String,
    },

    /// The streamed reply is complete
    StreamFinished,

    /// Something went wrong; show it to the user
    Error(ChatError),

    /// The connection is up and the session was announced
    Connected,

    /// The connection dropped; a retry is scheduled
    Disconnected {
        /// Delay before the next attempt
        retry_in: Duration,
    },
}

impl Notification {
    /// Short name for logging
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Render { .. } => "render",
            Self::Typing(_) => "typing",
            Self::StreamStarted { .. } => "stream_started",
            Self::StreamUpdated { .. } => "stream_updated",
            Self::StreamFinished => "stream_finished",
            Self::Error(_) => "error",
            Self::Connected => "connected",
            Self::Disconnected { .. } => "disconnected",
        }
    }
}

/// Receiver of UI notifications
///
/// Called inline from the session's event loop, so implementations must not
/// block.
pub trait NotificationSink: Send {
    /// Deliver one notification
    fn notify(&self, notification: Notification);
}

impl NotificationSink for mpsc::UnboundedSender<Notification> {
    fn notify(&self, notification: Notification) {
        let kind = notification.kind();
        if self.send(notification).is_err() {
            tracing::debug!(kind, "Notification receiver dropped");
        }
    }
}
