//! Transport Configuration
//!
//! Where the chat endpoint lives and how the connection behaves around it:
//! reconnect backoff, handshake timeout, keepalive.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::backoff::Backoff;

/// Default host when nothing is configured
pub const DEFAULT_HOST: &str = "localhost:8000";

/// Default WebSocket path on the host
pub const DEFAULT_PATH: &str = "/app/ws";

/// Transport configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Host and optional port, e.g. `chat.example.com` or `localhost:8000`
    pub host: String,

    /// Whether the hosting page is served securely (selects `wss`)
    pub secure: bool,

    /// Endpoint path on the host
    pub path: String,

    /// First reconnect delay in milliseconds; doubles on each failed attempt
    pub reconnect_base_delay_ms: u64,

    /// Upper bound on the reconnect delay in milliseconds
    pub reconnect_max_delay_ms: u64,

    /// Connection timeout in milliseconds
    ///
    /// How long the handshake may take before the attempt counts as failed.
    pub connect_timeout_ms: u64,

    /// Whether to send keepalive pings while connected
    pub heartbeat_enabled: bool,

    /// Keepalive interval in milliseconds
    pub heartbeat_interval_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            secure: false,
            path: DEFAULT_PATH.to_string(),
            reconnect_base_delay_ms: 1000,
            reconnect_max_delay_ms: 10_000,
            connect_timeout_ms: 5000,
            heartbeat_enabled: true,
            heartbeat_interval_ms: 30_000,
        }
    }
}

impl TransportConfig {
    /// Derive the endpoint from the URL of the page hosting the chat
    ///
    /// The page's host (and port) is kept; `https` pages get a secure
    /// endpoint, anything else a plain one.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_url` does not parse or has no host.
    pub fn from_page_url(page_url: &str, path: &str) -> Result<Self, url::ParseError> {
        let mut config = Self {
            path: normalize_path(path),
            ..Default::default()
        };
        config.apply_page_url(page_url)?;
        Ok(config)
    }

    /// Replace host and security with those of the hosting page
    ///
    /// # Errors
    ///
    /// Returns an error if `page_url` does not parse or has no host.
    pub fn apply_page_url(&mut self, page_url: &str) -> Result<(), url::ParseError> {
        let page = Url::parse(page_url)?;
        let host = page
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or(url::ParseError::EmptyHost)?;

        self.host = match page.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        self.secure = matches!(page.scheme(), "https" | "wss");
        Ok(())
    }

    /// Full endpoint URL, e.g. `wss://chat.example.com/app/ws`
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{scheme}://{}{}", self.host, normalize_path(&self.path))
    }

    /// Fresh backoff policy for this configuration
    #[must_use]
    pub fn backoff(&self) -> Backoff {
        Backoff::new(
            Duration::from_millis(self.reconnect_base_delay_ms),
            Duration::from_millis(self.reconnect_max_delay_ms),
        )
    }

    /// Handshake timeout
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Keepalive interval, or `None` when keepalive is off
    #[must_use]
    pub fn heartbeat_interval(&self) -> Option<Duration> {
        (self.heartbeat_enabled && self.heartbeat_interval_ms > 0)
            .then(|| Duration::from_millis(self.heartbeat_interval_ms))
    }

    /// Configuration suitable for testing (no keepalive, short delays)
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            heartbeat_enabled: false,
            connect_timeout_ms: 500,
            ..Default::default()
        }
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
