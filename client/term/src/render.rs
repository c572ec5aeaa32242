//! Line renderer
//!
//! Turns session notifications into terminal text. Streamed replies are
//! printed incrementally: each cumulative update only adds what is new.

use chrono::{DateTime, Local, TimeZone};
use cw_chat_core::{MessageRole, Notification};

/// Stateful notification printer
#[derive(Debug, Default)]
pub struct Renderer {
    /// Text of the reply currently being streamed, as printed so far
    streamed: String,
    /// Last finished stream, to avoid printing it twice when the complete
    /// message arrives afterwards
    finished: Option<String>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text to print for `notification`, if any
    pub fn render(&mut self, notification: &Notification) -> Option<String> {
        match notification {
            Notification::Render {
                role,
                content,
                timestamp,
            } => {
                if *role == MessageRole::Assistant && self.finished.as_deref() == Some(content) {
                    self.finished = None;
                    return None;
                }
                Some(format_line(*role, content, &timestamp.with_timezone(&Local)))
            }

            Notification::Typing(true) if self.streamed.is_empty() => {
                Some("  (assistant is typing...)\n".to_string())
            }
            Notification::Typing(_) => None,

            Notification::StreamStarted { text } => {
                let prefix = self.break_stream();
                self.streamed.clone_from(text);
                Some(format!("{prefix}{}: {text}", MessageRole::Assistant.as_str()))
            }

            Notification::StreamUpdated { text } => {
                let out = match text.strip_prefix(self.streamed.as_str()) {
                    Some(suffix) => suffix.to_string(),
                    None => format!("\n{}: {text}", MessageRole::Assistant.as_str()),
                };
                self.streamed.clone_from(text);
                Some(out)
            }

            Notification::StreamFinished => {
                if self.streamed.is_empty() {
                    return None;
                }
                self.finished = Some(std::mem::take(&mut self.streamed));
                Some("\n".to_string())
            }

            Notification::Error(e) => Some(format!("{}! {e}\n", self.break_stream())),

            Notification::Connected => Some(format!("{}* connected\n", self.break_stream())),

            Notification::Disconnected { retry_in } => Some(format!(
                "{}* disconnected, retrying in {:.1}s\n",
                self.break_stream(),
                retry_in.as_secs_f64()
            )),
        }
    }

    /// Abandon a half-printed stream; returns the newline that ends it
    fn break_stream(&mut self) -> &'static str {
        if self.streamed.is_empty() {
            ""
        } else {
            self.streamed.clear();
            "\n"
        }
    }
}

/// `[HH:MM:SS] role: content`
pub fn format_line<Tz>(role: MessageRole, content: &str, timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("[{}] {}: {content}\n", timestamp.format("%H:%M:%S"), role.as_str())
}
