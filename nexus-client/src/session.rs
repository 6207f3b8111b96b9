//! One chat conversation: transcript plus the single in-flight request.
//!
//! A submit is split in two so callers (and tests) can observe the state
//! between sending and receiving:
//!
//! 1. [`ChatSession::begin_submit`] appends the user message and marks the
//!    session busy.
//! 2. [`ChatSession::finish`] appends exactly one reply (assistant or error)
//!    and clears the busy flag.
//!
//! [`ChatSession::submit`] runs both around the transport call. If the
//! `submit` future is dropped while waiting, the reply is discarded and the
//! session becomes idle again.

use nexus_types::Message;
use tracing::warn;

use crate::error::ClientError;
use crate::transcript::Transcript;
use crate::transport::ChatTransport;

/// Shown when no usable answer or server message came back.
pub const UNAVAILABLE_PLACEHOLDER: &str =
    "❌ KI nicht verfügbar. Bitte versuchen Sie es später erneut.";

/// A submitted message waiting for its reply.
#[derive(Debug)]
#[must_use = "a pending turn must be passed to ChatSession::finish"]
pub struct PendingTurn {
    text: String,
}

impl PendingTurn {
    /// The text to send to the relay.
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug)]
pub struct ChatSession<T> {
    transport: T,
    transcript: Transcript,
    in_flight: bool,
}

impl<T: ChatTransport> ChatSession<T> {
    pub fn new(transport: T) -> Self {
        Self::with_transcript(transport, Transcript::new())
    }

    pub fn with_transcript(transport: T, transcript: Transcript) -> Self {
        Self {
            transport,
            transcript,
            in_flight: false,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// `true` while a request is outstanding; input should be disabled.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Start a turn. Returns `None`, changing nothing, when the input is blank
    /// or a request is already outstanding.
    pub fn begin_submit(&mut self, input: &str) -> Option<PendingTurn> {
        if self.in_flight || input.trim().is_empty() {
            return None;
        }
        self.transcript.push(Message::user(input));
        self.in_flight = true;
        Some(PendingTurn {
            text: input.to_owned(),
        })
    }

    /// Complete a turn with the transport's outcome, appending one reply.
    pub fn finish(&mut self, _turn: PendingTurn, outcome: Result<String, ClientError>) -> &Message {
        self.in_flight = false;
        let reply = match outcome {
            Ok(answer) if !answer.trim().is_empty() => Message::assistant(answer),
            Ok(_) => Message::error(UNAVAILABLE_PLACEHOLDER),
            Err(ClientError::Server { status, message }) => {
                warn!(status, %message, "relay reported an error");
                Message::error(message)
            }
            Err(e) => {
                warn!(error = %e, "chat request failed");
                Message::error(UNAVAILABLE_PLACEHOLDER)
            }
        };
        self.transcript.push(reply)
    }

    /// Submit `input` and wait for the reply. Returns the appended reply, or
    /// `None` when the submit was a no-op.
    pub async fn submit(&mut self, input: &str) -> Option<&Message> {
        let turn = self.begin_submit(input)?;
        let outcome = {
            let _busy = BusyGuard(&mut self.in_flight);
            self.transport.send(turn.text()).await
        };
        Some(self.finish(turn, outcome))
    }
}

/// Clears the busy flag when dropped, including when the owning future is.
struct BusyGuard<'a>(&'a mut bool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
