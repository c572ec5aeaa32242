//! Frame Protocol
//!
//! Wire format for client-server chat messages: one JSON object per WebSocket
//! text frame, with the message kind in the `type` field.
//!
//! # Frame Format
//!
//! ```text
//! {"type":"cw_chat_hello","session_id":"4f9c..."}
//! {"type":"user_message","text":"hello","file":null}
//! {"type":"token","data":"Hel"}
//! ```
//!
//! Encoding is total: every [`OutboundMessage`] has exactly one wire form.
//! Decoding fails with a [`DecodeError`] that the caller reports and then
//! carries on; a bad frame never takes the connection down.
//!
//! # Security
//!
//! - Maximum frame size is enforced before parsing

use serde_json::{json, Value};
use thiserror::Error;

use crate::events::OutboundMessage;
use crate::messages::InboundMessage;

/// Maximum inbound frame size (1 MB)
pub const MAX_FRAME_SIZE: usize = 1024 * 1024;

/// Why an inbound frame could not be decoded
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Not well-formed JSON (truncated, invalid syntax, not UTF-8)
    #[error("Malformed frame: {0}")]
    Malformed(String),

    /// Well-formed JSON without a string `type` field
    #[error("Frame has no message kind")]
    MissingKind,

    /// A known kind whose fields have the wrong shape
    #[error("Invalid '{kind}' frame: {reason}")]
    InvalidFields {
        /// The message kind that failed
        kind: String,
        /// Deserializer explanation
        reason: String,
    },

    /// Frame exceeds [`MAX_FRAME_SIZE`]
    #[error("Frame too large: {size} bytes (max: {max})")]
    TooLarge {
        /// Actual size
        size: usize,
        /// Maximum allowed size
        max: usize,
    },
}

/// Encode an outbound message to its wire text
#[must_use]
pub fn encode(msg: &OutboundMessage) -> String {
    let value = match msg {
        OutboundMessage::Hello { session_id } => json!({
            "type": msg.kind(),
            "session_id": session_id.as_ref().map(|id| id.as_str()),
        }),
        OutboundMessage::UserText { text, attachment } => json!({
            "type": msg.kind(),
            "text": text,
            "file": attachment,
        }),
        OutboundMessage::Ping => json!({ "type": msg.kind() }),
    };
    value.to_string()
}

/// Decode one inbound frame
///
/// # Errors
///
/// Returns a [`DecodeError`] if the frame is oversized, is not JSON, has no
/// `type` field, or has a known kind with malformed fields.
pub fn decode(bytes: &[u8]) -> Result<InboundMessage, DecodeError> {
    if bytes.len() > MAX_FRAME_SIZE {
        return Err(DecodeError::TooLarge {
            size: bytes.len(),
            max: MAX_FRAME_SIZE,
        });
    }

    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingKind)?
        .to_string();

    serde_json::from_value(value).map_err(|e| DecodeError::InvalidFields {
        kind,
        reason: e.to_string(),
    })
}
