//! cw-chat - Terminal Chat Client
//!
//! Line-based front end for the chat backend. Every line typed on stdin is
//! sent as a user message; replies stream back onto stdout. Logs go to
//! stderr.
//!
//! # Usage
//!
//! ```bash
//! # Local backend on the default endpoint (ws://localhost:8000/app/ws)
//! cw-chat
//!
//! # Derive the endpoint from the page that would host the widget
//! cw-chat --page-url https://chat.example.com/app/chat
//!
//! # Resume a session and replay its history
//! cw-chat --session-id 4f9c2a... --history-url https://chat.example.com/app/history
//!
//! # Verbose logging
//! RUST_LOG=debug cw-chat
//! ```
//!
//! Type `/quit` or press Ctrl-C to leave.

mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tokio::sync::mpsc;
use tracing::{info, warn};

use cw_chat_core::{
    load_config, load_config_from_path, ChatSession, ClientConfig, ConfigOverrides,
    HistoryLoader, HttpHistoryLoader, Notification, SendOutcome, SessionId, WebSocketConnector,
};

use render::Renderer;

/// cw-chat - terminal client for the chat backend
#[derive(Parser, Debug)]
#[command(name = "cw-chat")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "CW_CHAT_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// URL of the page hosting the chat; the endpoint host and scheme follow it
    #[arg(long, value_name = "URL")]
    page_url: Option<String>,

    /// Backend host and optional port
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// WebSocket path on the host
    #[arg(long, value_name = "PATH")]
    path: Option<String>,

    /// Use wss
    #[arg(long)]
    secure: bool,

    /// Session identity to resume
    #[arg(long, value_name = "ID")]
    session_id: Option<String>,

    /// History endpoint to seed the session from
    #[arg(long, value_name = "URL")]
    history_url: Option<String>,

    /// Disable keepalive pings
    #[arg(long)]
    no_heartbeat: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "CW_CHAT_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(ref url) = self.page_url {
            overrides = overrides.with_page_url(url.clone());
        }
        if let Some(ref host) = self.host {
            overrides = overrides.with_host(host.clone());
        }
        if let Some(ref path) = self.path {
            overrides = overrides.with_path(path.clone());
        }
        if self.secure {
            overrides = overrides.with_secure(true);
        }
        if let Some(ref id) = self.session_id {
            overrides = overrides.with_session_id(id.clone());
        }
        if let Some(ref url) = self.history_url {
            overrides = overrides.with_history_url(url.clone());
        }
        if self.no_heartbeat {
            overrides = overrides.with_heartbeat_enabled(false);
        }
        overrides
    }
}

/// Initialize logging with the specified level
fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("cw_chat={level},cw_chat_core={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn load(args: &Args) -> Result<ClientConfig> {
    let mut config = match args.config {
        Some(ref path) => load_config_from_path(Some(path.clone())),
        None => load_config(),
    }
    .context("Failed to load configuration")?;

    args.overrides()
        .apply(&mut config)
        .context("Invalid command-line option")?;
    Ok(config)
}

async fn print(out: &mut Stdout, text: &str) {
    let written = match out.write_all(text.as_bytes()).await {
        Ok(()) => out.flush().await,
        Err(e) => Err(e),
    };
    if let Err(e) = written {
        warn!(error = %e, "stdout write failed");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = load(&args)?;
    info!(
        endpoint = %config.transport.endpoint_url(),
        source = %config.source(),
        "Configuration loaded"
    );

    let session_id = config.session_id.clone().unwrap_or_else(|| {
        let id = SessionId::generate();
        info!(session_id = %id, "Starting a new session");
        id
    });

    let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();
    let connector = WebSocketConnector::from_config(&config.transport);
    let mut session = ChatSession::new(connector, config.transport.clone(), tx, Some(session_id));
    let mut renderer = Renderer::new();

    if let Some(ref url) = config.history_url {
        let loader = HttpHistoryLoader::new(url).context("Invalid history URL")?;
        match loader.load(session.session_id()).await {
            Ok(snapshot) => session.apply_history(&snapshot),
            Err(e) => warn!(error = %e, "History unavailable, starting empty"),
        }
    }

    session.connect();

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            () = session.step() => {}

            Some(notification) = rx.recv() => {
                if let Some(text) = renderer.render(&notification) {
                    print(&mut stdout, &text).await;
                }
            }

            line = stdin.next_line() => match line {
                Ok(Some(line)) if line.trim() == "/quit" => break,
                Ok(Some(line)) => {
                    let outcome = session.send_user_message(&line, None);
                    if outcome == SendOutcome::Dropped {
                        // Show the echoed line first, then the notice
                        while let Ok(notification) = rx.try_recv() {
                            if let Some(text) = renderer.render(&notification) {
                                print(&mut stdout, &text).await;
                            }
                        }
                        print(&mut stdout, "  (offline, message not sent)\n").await;
                    }
                }
                Ok(None) => {
                    info!("stdin closed");
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "stdin read failed");
                    break;
                }
            },

            result = &mut ctrl_c => {
                if let Err(e) = result {
                    warn!(error = %e, "Ctrl-C handler failed");
                }
                break;
            }
        }
    }

    // Flush what the session already reported
    while let Ok(notification) = rx.try_recv() {
        if let Some(text) = renderer.render(&notification) {
            print(&mut stdout, &text).await;
        }
    }

    info!("Goodbye");
    Ok(())
}
