//! Stream Assembler Implementation
//!
//! Turns a run of `token` fragments into one growing assistant reply.

// ============================================================================
// Signals
// ============================================================================

/// What the assembler tells its owner after each input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamSignal {
    /// First fragment of a new reply; carries the text so far
    Started(String),
    /// A later fragment arrived; carries the cumulative text, not the delta
    Updated(String),
    /// The reply is complete; no payload
    Finished,
}

impl StreamSignal {
    /// Cumulative text carried by the signal, if any
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Started(text) | Self::Updated(text) => Some(text),
            Self::Finished => None,
        }
    }
}

// ============================================================================
// Assembler
// ============================================================================

/// Accumulates streamed fragments of at most one reply at a time
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamAssembler {
    active: bool,
    buffer: String,
}

impl StreamAssembler {
    /// Create an idle assembler
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one fragment
    pub fn on_token(&mut self, text: &str) -> StreamSignal {
        if self.active {
            self.buffer.push_str(text);
            StreamSignal::Updated(self.buffer.clone())
        } else {
            self.active = true;
            self.buffer.clear();
            self.buffer.push_str(text);
            StreamSignal::Started(self.buffer.clone())
        }
    }

    /// End the current reply
    ///
    /// Always signals `Finished`, even with nothing in progress. The buffer
    /// is discarded rather than flushed; final content arrives separately.
    pub fn on_done(&mut self) -> StreamSignal {
        if !self.active {
            tracing::trace!("Done without an active stream");
        }
        self.clear();
        StreamSignal::Finished
    }

    /// Drop any partial reply without signalling
    pub fn reset(&mut self) {
        if self.active {
            tracing::debug!(orphaned_chars = self.buffer.chars().count(), "Discarding partial stream");
        }
        self.clear();
    }

    /// Whether a reply is in progress
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Text accumulated so far
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    fn clear(&mut self) {
        self.active = false;
        self.buffer.clear();
    }
}
