//! History Seeding
//!
//! At startup the host may fetch the stored conversation for this browser
//! session and hand it to the session: the server-side identity replaces the
//! cached one, and the stored messages are replayed as renders.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::events::SessionId;
use crate::messages::MessageRole;

/// Errors loading history
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Request could not be made or answered
    #[error("History request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The configured URL is unusable
    #[error("Invalid history URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// One stored message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Author
    #[serde(default)]
    pub role: MessageRole,
    /// Message text
    #[serde(default)]
    pub content: String,
    /// When it was sent (RFC 3339), if the server kept it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<String>,
}

/// Result of a history load
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    /// Identity the server associates with this history
    #[serde(default)]
    pub session_id: Option<String>,
    /// Stored messages, oldest first
    #[serde(default)]
    pub messages: Vec<HistoryEntry>,
}

/// Source of stored conversation history
#[async_trait]
pub trait HistoryLoader: Send + Sync {
    /// Load history for `session_id`, or for a fresh session if `None`
    async fn load(&self, session_id: Option<&SessionId>) -> Result<HistorySnapshot, HistoryError>;
}

/// Loads history from an HTTP endpoint returning a [`HistorySnapshot`] as JSON
#[derive(Clone, Debug)]
pub struct HttpHistoryLoader {
    url: url::Url,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl HttpHistoryLoader {
    /// Create a loader for `url`
    ///
    /// # Errors
    ///
    /// Returns an error if `url` does not parse.
    pub fn new(url: &str) -> Result<Self, HistoryError> {
        Ok(Self {
            url: url::Url::parse(url)?,
            timeout: Duration::from_secs(10),
            http_client: reqwest::Client::new(),
        })
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn request_url(&self, session_id: Option<&SessionId>) -> url::Url {
        let mut url = self.url.clone();
        if let Some(id) = session_id {
            url.query_pairs_mut().append_pair("session_id", id.as_str());
        }
        url
    }
}

#[async_trait]
impl HistoryLoader for HttpHistoryLoader {
    async fn load(&self, session_id: Option<&SessionId>) -> Result<HistorySnapshot, HistoryError> {
        let url = self.request_url(session_id);
        tracing::debug!(url = %url, "Loading history");

        let snapshot: HistorySnapshot = self
            .http_client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::info!(
            messages = snapshot.messages.len(),
            has_session = snapshot.session_id.is_some(),
            "History loaded"
        );
        Ok(snapshot)
    }
}
