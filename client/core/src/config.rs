//! Client Configuration
//!
//! Centralized configuration loading for the chat client, with an optional
//! TOML file at `~/.config/cw-chat/client.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [transport]
//! page_url = "https://chat.example.com/app/chat"
//! path = "/app/ws"
//! reconnect_base_delay_ms = 1000
//! reconnect_max_delay_ms = 10000
//! connect_timeout_ms = 5000
//! heartbeat_enabled = true
//! heartbeat_interval_secs = 30
//!
//! [session]
//! id = "4f9c2a..."
//!
//! [history]
//! url = "https://chat.example.com/app/history"
//! ```
//!
//! When both `page_url` and `host`/`secure` are given, the explicit values win.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::events::SessionId;
use crate::transport::TransportConfig;

// =============================================================================
// Error Types
// =============================================================================

/// Why a client configuration could not be built
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// Config file path
        path: PathBuf,
        /// I/O failure
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A value that parsed but makes no sense (bad URL, zero delay, ...)
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Where Settings Came From
// =============================================================================

/// Layer a client setting was taken from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Command-line flag
    Cli,
    /// `CW_CHAT_*` variable
    Env,
    /// `client.toml`
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// client.toml Layout
// =============================================================================

/// `[transport]`: where and how to reach the backend
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportToml {
    /// URL of the page hosting the chat; host and security are taken from it
    pub page_url: Option<String>,

    /// Host and optional port
    pub host: Option<String>,

    /// Use `wss`
    pub secure: Option<bool>,

    /// Endpoint path
    pub path: Option<String>,

    /// First reconnect delay in milliseconds
    pub reconnect_base_delay_ms: Option<u64>,

    /// Reconnect delay ceiling in milliseconds
    pub reconnect_max_delay_ms: Option<u64>,

    /// WebSocket handshake timeout in milliseconds
    pub connect_timeout_ms: Option<u64>,

    /// Whether to send keepalive pings
    pub heartbeat_enabled: Option<bool>,

    /// Keepalive interval in seconds
    pub heartbeat_interval_secs: Option<u64>,
}

/// Session section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionToml {
    /// Cached session identity
    pub id: Option<String>,
}

/// History section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryToml {
    /// History endpoint
    pub url: Option<String>,
}

/// Contents of `client.toml`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientToml {
    /// `[transport]` table
    pub transport: TransportToml,

    /// Session configuration section
    pub session: SessionToml,

    /// History configuration section
    pub history: HistoryToml,
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Centralized configuration for the chat client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Transport configuration
    pub transport: TransportConfig,

    /// Cached session identity to announce on connect
    pub session_id: Option<SessionId>,

    /// History endpoint, if history seeding is wanted
    pub history_url: Option<String>,

    /// Config file that was read, if one existed
    pub config_file_path: Option<PathBuf>,

    /// Highest-priority layer that contributed a value
    source: ConfigSource,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::default(),
            session_id: None,
            history_url: None,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest-priority layer that set anything
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check values that would make the client misbehave
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` describing the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.transport;
        if t.host.trim().is_empty() {
            return Err(ConfigError::ValidationError("host is empty".to_string()));
        }
        if t.reconnect_base_delay_ms == 0 {
            return Err(ConfigError::ValidationError(
                "reconnect_base_delay_ms must be positive".to_string(),
            ));
        }
        if t.reconnect_base_delay_ms > t.reconnect_max_delay_ms {
            return Err(ConfigError::ValidationError(format!(
                "reconnect_base_delay_ms ({}) exceeds reconnect_max_delay_ms ({})",
                t.reconnect_base_delay_ms, t.reconnect_max_delay_ms
            )));
        }
        if t.connect_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "connect_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// `$XDG_CONFIG_HOME/cw-chat/client.toml`
///
/// Returns `$XDG_CONFIG_HOME/cw-chat/client.toml` or
/// `~/.config/cw-chat/client.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cw-chat").join("client.toml"))
}

/// Load the client configuration from the default path and the environment
///
/// CLI overrides are not handled here; apply [`ConfigOverrides`] afterwards.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if
/// the resulting configuration is invalid. A missing config file is not an
/// error (defaults are used).
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path plus the process environment
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if the resulting configuration is invalid.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ClientConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration with an explicit environment lookup
///
/// # Errors
///
/// Same as [`load_config_from_path`].
pub fn load_config_with_env<F>(path: Option<PathBuf>, env: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Start with defaults
    let mut config = ClientConfig::default();

    // Try to load from file
    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ClientToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config)?;
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Read client.toml"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "No client.toml, using defaults"
            );
        }
    }

    // Environment beats the file
    apply_env_config(&mut config, env);

    config.validate()?;
    Ok(config)
}

fn apply_page_url(config: &mut ClientConfig, page_url: &str) -> Result<(), ConfigError> {
    config
        .transport
        .apply_page_url(page_url)
        .map_err(|e| ConfigError::ValidationError(format!("page_url '{page_url}': {e}")))
}

/// Merge the parsed file into `config`
fn apply_toml_config(config: &mut ClientConfig, toml: &ClientToml) -> Result<(), ConfigError> {
    let t = &toml.transport;

    // Page URL first so explicit host/secure can refine it
    if let Some(ref page_url) = t.page_url {
        apply_page_url(config, page_url)?;
    }
    if let Some(ref host) = t.host {
        config.transport.host.clone_from(host);
    }
    if let Some(secure) = t.secure {
        config.transport.secure = secure;
    }
    if let Some(ref path) = t.path {
        config.transport.path.clone_from(path);
    }
    if let Some(delay) = t.reconnect_base_delay_ms {
        config.transport.reconnect_base_delay_ms = delay;
    }
    if let Some(delay) = t.reconnect_max_delay_ms {
        config.transport.reconnect_max_delay_ms = delay;
    }
    if let Some(timeout) = t.connect_timeout_ms {
        config.transport.connect_timeout_ms = timeout;
    }
    if let Some(enabled) = t.heartbeat_enabled {
        config.transport.heartbeat_enabled = enabled;
    }
    if let Some(interval) = t.heartbeat_interval_secs {
        config.transport.heartbeat_interval_ms = interval.saturating_mul(1000);
    }

    if let Some(ref id) = toml.session.id {
        config.session_id = Some(SessionId::from_cached(id).ok_or_else(|| {
            ConfigError::ValidationError(format!("session id '{id}' is empty or too long"))
        })?);
    }

    if toml.history.url.is_some() {
        config.history_url.clone_from(&toml.history.url);
    }

    Ok(())
}

/// Merge `CW_CHAT_*` values into `config`
///
/// Unparseable values are ignored with a warning.
fn apply_env_config<F>(config: &mut ClientConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let parse_ms = |key: &str| -> Option<u64> {
        let raw = env(key)?;
        match raw.parse::<u64>() {
            Ok(ms) => Some(ms),
            Err(_) => {
                tracing::warn!(var = key, value = %raw, "Ignoring non-numeric value");
                None
            }
        }
    };

    if let Some(page_url) = env("CW_CHAT_PAGE_URL") {
        match apply_page_url(config, &page_url) {
            Ok(()) => config.source = ConfigSource::Env,
            Err(e) => tracing::warn!(error = %e, "Ignoring CW_CHAT_PAGE_URL"),
        }
    }
    if let Some(host) = env("CW_CHAT_HOST") {
        config.transport.host = host;
        config.source = ConfigSource::Env;
    }
    if let Some(secure) = env("CW_CHAT_SECURE") {
        config.transport.secure = secure != "0" && secure.to_lowercase() != "false";
        config.source = ConfigSource::Env;
    }
    if let Some(path) = env("CW_CHAT_PATH") {
        config.transport.path = path;
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_ms("CW_CHAT_RECONNECT_BASE_MS") {
        config.transport.reconnect_base_delay_ms = ms;
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_ms("CW_CHAT_RECONNECT_MAX_MS") {
        config.transport.reconnect_max_delay_ms = ms;
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_ms("CW_CHAT_CONNECT_TIMEOUT") {
        config.transport.connect_timeout_ms = ms;
        config.source = ConfigSource::Env;
    }
    if let Some(enabled) = env("CW_CHAT_HEARTBEAT") {
        config.transport.heartbeat_enabled = enabled != "0" && enabled.to_lowercase() != "false";
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_ms("CW_CHAT_HEARTBEAT_INTERVAL") {
        config.transport.heartbeat_interval_ms = ms;
        config.source = ConfigSource::Env;
    }
    if let Some(id) = env("CW_CHAT_SESSION_ID") {
        match SessionId::from_cached(&id) {
            Some(id) => {
                config.session_id = Some(id);
                config.source = ConfigSource::Env;
            }
            None => tracing::warn!("Ignoring empty or oversized CW_CHAT_SESSION_ID"),
        }
    }
    if let Some(url) = env("CW_CHAT_HISTORY_URL") {
        config.history_url = Some(url);
        config.source = ConfigSource::Env;
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Command-line settings layered over a loaded [`ClientConfig`]
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Hosting page URL override
    pub page_url: Option<String>,

    /// Host override
    pub host: Option<String>,

    /// Endpoint path override
    pub path: Option<String>,

    /// Force a secure endpoint
    pub secure: Option<bool>,

    /// `--no-heartbeat`
    pub heartbeat_enabled: Option<bool>,

    /// Session identity override
    pub session_id: Option<String>,

    /// History endpoint override
    pub history_url: Option<String>,
}

impl ConfigOverrides {
    /// No overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set hosting page URL override
    #[must_use]
    pub fn with_page_url(mut self, url: String) -> Self {
        self.page_url = Some(url);
        self
    }

    /// Set host override
    #[must_use]
    pub fn with_host(mut self, host: String) -> Self {
        self.host = Some(host);
        self
    }

    /// Set path override
    #[must_use]
    pub fn with_path(mut self, path: String) -> Self {
        self.path = Some(path);
        self
    }

    /// Set secure override
    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    /// Turn keepalive pings on or off
    #[must_use]
    pub fn with_heartbeat_enabled(mut self, enabled: bool) -> Self {
        self.heartbeat_enabled = Some(enabled);
        self
    }

    /// Set session identity override
    #[must_use]
    pub fn with_session_id(mut self, id: String) -> Self {
        self.session_id = Some(id);
        self
    }

    /// Set history endpoint override
    #[must_use]
    pub fn with_history_url(mut self, url: String) -> Self {
        self.history_url = Some(url);
        self
    }

    fn is_empty(&self) -> bool {
        self.page_url.is_none()
            && self.host.is_none()
            && self.path.is_none()
            && self.secure.is_none()
            && self.heartbeat_enabled.is_none()
            && self.session_id.is_none()
            && self.history_url.is_none()
    }

    /// Layer the overrides onto `config`, validating the result
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` for an unusable page URL or
    /// session identity.
    pub fn apply(&self, config: &mut ClientConfig) -> Result<(), ConfigError> {
        if self.is_empty() {
            return Ok(());
        }
        config.source = ConfigSource::Cli;

        if let Some(ref page_url) = self.page_url {
            apply_page_url(config, page_url)?;
        }
        if let Some(ref host) = self.host {
            config.transport.host.clone_from(host);
        }
        if let Some(secure) = self.secure {
            config.transport.secure = secure;
        }
        if let Some(ref path) = self.path {
            config.transport.path.clone_from(path);
        }
        if let Some(enabled) = self.heartbeat_enabled {
            config.transport.heartbeat_enabled = enabled;
        }
        if let Some(ref id) = self.session_id {
            config.session_id = Some(SessionId::from_cached(id).ok_or_else(|| {
                ConfigError::ValidationError(format!("session id '{id}' is empty or too long"))
            })?);
        }
        if self.history_url.is_some() {
            config.history_url.clone_from(&self.history_url);
        }

        config.validate()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn write_toml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    // =========================================================================
    // Defaults
    // =========================================================================

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.transport.endpoint_url(), "ws://localhost:8000/app/ws");
        assert!(config.session_id.is_none());
        assert!(config.history_url.is_none());
        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("cw-chat/client.toml"));
        }
    }

    // =========================================================================
    // TOML Parsing
    // =========================================================================

    #[test]
    fn test_parse_valid_toml() {
        let file = write_toml(
            r#"
[transport]
page_url = "https://chat.example.com/app/chat"
path = "/app/ws"
reconnect_base_delay_ms = 500
reconnect_max_delay_ms = 8000
connect_timeout_ms = 3000
heartbeat_enabled = false
heartbeat_interval_secs = 15

[session]
id = "abc123"

[history]
url = "https://chat.example.com/app/history"
"#,
        );

        let config = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap();

        assert_eq!(config.transport.endpoint_url(), "wss://chat.example.com/app/ws");
        assert_eq!(config.transport.reconnect_base_delay_ms, 500);
        assert_eq!(config.transport.reconnect_max_delay_ms, 8000);
        assert_eq!(config.transport.connect_timeout_ms, 3000);
        assert!(!config.transport.heartbeat_enabled);
        assert_eq!(config.transport.heartbeat_interval_ms, 15_000);
        assert_eq!(config.session_id.as_ref().map(SessionId::as_str), Some("abc123"));
        assert_eq!(
            config.history_url.as_deref(),
            Some("https://chat.example.com/app/history")
        );
        assert_eq!(config.source(), ConfigSource::File);
        assert_eq!(config.config_file_path, Some(file.path().to_path_buf()));
    }

    #[test]
    fn test_explicit_host_refines_page_url() {
        let file = write_toml(
            r#"
[transport]
page_url = "https://chat.example.com/"
host = "edge.example.com:9443"
"#,
        );

        let config = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap();
        assert_eq!(config.transport.endpoint_url(), "wss://edge.example.com:9443/app/ws");
    }

    #[test]
    fn test_parse_empty_toml() {
        let file = write_toml("");
        let config = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap();
        assert_eq!(config.transport, TransportConfig::default());
        assert_eq!(config.source(), ConfigSource::File);
    }

    #[test]
    fn test_missing_file_graceful() {
        let path = PathBuf::from("/nonexistent/path/client.toml");
        let config = load_config_with_env(Some(path), no_env).unwrap();
        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.config_file_path.is_none());
    }

    #[test]
    fn test_malformed_toml_error() {
        let file = write_toml(
            r#"
[transport
connect_timeout_ms = "not a number"
"#,
        );

        let result = load_config_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = write_toml(
            r#"
[transport]
reconnect_base_delay_ms = 20000
reconnect_max_delay_ms = 10000
"#,
        );
        let result = load_config_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        let file = write_toml("[session]\nid = \"   \"\n");
        let result = load_config_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        let file = write_toml("[transport]\npage_url = \"file:///tmp/chat.html\"\n");
        let result = load_config_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    // =========================================================================
    // Priority Ordering
    // =========================================================================

    #[test]
    fn test_env_overrides_file() {
        let file = write_toml(
            r#"
[transport]
host = "file.example.com"
connect_timeout_ms = 5000

[session]
id = "from-file"
"#,
        );
        let env = env_from(&[
            ("CW_CHAT_HOST", "env.example.com"),
            ("CW_CHAT_SECURE", "true"),
            ("CW_CHAT_CONNECT_TIMEOUT", "3000"),
            ("CW_CHAT_SESSION_ID", "from-env"),
        ]);

        let config = load_config_with_env(Some(file.path().to_path_buf()), env).unwrap();

        assert_eq!(config.transport.endpoint_url(), "wss://env.example.com/app/ws");
        assert_eq!(config.transport.connect_timeout_ms, 3000);
        assert_eq!(config.session_id.as_ref().map(SessionId::as_str), Some("from-env"));
        assert_eq!(config.source(), ConfigSource::Env);
    }

    #[test]
    fn test_env_page_url_and_bad_numbers() {
        let env = env_from(&[
            ("CW_CHAT_PAGE_URL", "http://127.0.0.1:8000/app/chat"),
            ("CW_CHAT_RECONNECT_BASE_MS", "soon"),
            ("CW_CHAT_HEARTBEAT", "0"),
        ]);

        let config = load_config_with_env(None, env).unwrap();
        assert_eq!(config.transport.endpoint_url(), "ws://127.0.0.1:8000/app/ws");
        assert_eq!(config.transport.reconnect_base_delay_ms, 1000);
        assert!(!config.transport.heartbeat_enabled);
    }

    #[test]
    fn test_invalid_env_session_id_ignored() {
        let long = "x".repeat(65);
        let env = env_from(&[("CW_CHAT_SESSION_ID", long.as_str())]);
        let config = load_config_with_env(None, env).unwrap();
        assert!(config.session_id.is_none());
    }

    #[test]
    fn test_cli_overrides_env() {
        let env = env_from(&[("CW_CHAT_HOST", "env.example.com")]);
        let mut config = load_config_with_env(None, env).unwrap();

        ConfigOverrides::new()
            .with_host("cli.example.com".to_string())
            .with_path("chat".to_string())
            .with_heartbeat_enabled(false)
            .apply(&mut config)
            .unwrap();

        assert_eq!(config.transport.endpoint_url(), "ws://cli.example.com/chat");
        assert!(!config.transport.heartbeat_enabled);
        assert_eq!(config.source(), ConfigSource::Cli);
    }

    #[test]
    fn test_config_overrides_empty_no_change() {
        let mut config = ClientConfig::default();
        ConfigOverrides::new().apply(&mut config).unwrap();
        assert_eq!(config.source(), ConfigSource::Default);
        assert_eq!(config.transport, TransportConfig::default());
    }

    #[test]
    fn test_config_overrides_reject_bad_values() {
        let mut config = ClientConfig::default();
        let result = ConfigOverrides::new()
            .with_session_id(String::new())
            .apply(&mut config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        let result = ConfigOverrides::new()
            .with_page_url("nonsense".to_string())
            .apply(&mut config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_config_source_display() {
        assert_eq!(ConfigSource::Cli.to_string(), "CLI");
        assert_eq!(ConfigSource::Env.to_string(), "environment");
        assert_eq!(ConfigSource::File.to_string(), "config file");
        assert_eq!(ConfigSource::Default.to_string(), "default");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ValidationError("host is empty".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: host is empty");
    }
}
