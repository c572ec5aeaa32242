//! Reportable chat errors
//!
//! None of these are fatal. Decode and protocol errors leave the connection
//! alone; transport errors are followed by the usual close and reconnect.

use thiserror::Error;

use crate::transport::{DecodeError, TransportError};

/// Text reported when the server sends an `error` frame without a message
pub const DEFAULT_SERVER_ERROR: &str = "Unknown server error";

/// Error surfaced to the user-facing sink
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChatError {
    /// An inbound frame could not be decoded
    #[error("Could not read server message: {0}")]
    Decode(#[from] DecodeError),

    /// The connection faulted
    #[error("Connection problem: {0}")]
    Transport(#[from] TransportError),

    /// The server reported an application error; shown verbatim
    #[error("{0}")]
    Protocol(String),
}

impl ChatError {
    /// Server-reported error, falling back to [`DEFAULT_SERVER_ERROR`]
    #[must_use]
    pub fn protocol(message: Option<String>) -> Self {
        Self::Protocol(
            message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SERVER_ERROR.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_is_verbatim() {
        let err = ChatError::protocol(Some("Model overloaded".to_string()));
        assert_eq!(err.to_string(), "Model overloaded");
    }

    #[test]
    fn test_protocol_error_default_text() {
        assert_eq!(
            ChatError::protocol(None),
            ChatError::Protocol(DEFAULT_SERVER_ERROR.to_string())
        );
        assert_eq!(
            ChatError::protocol(Some("  ".to_string())).to_string(),
            DEFAULT_SERVER_ERROR
        );
    }

    #[test]
    fn test_conversions() {
        let err: ChatError = DecodeError::MissingKind.into();
        assert!(matches!(err, ChatError::Decode(_)));

        let err: ChatError = TransportError::ConnectionClosed.into();
        assert!(err.to_string().contains("Connection closed"));
    }
}
