//! Chat client for the NEXUS relay.
//!
//! - [`Transcript`]: append-only list of messages shown to the user.
//! - [`ChatSession`]: one conversation, at most one request in flight.
//! - [`ChatTransport`] / [`HttpTransport`]: how a message reaches `POST /api/chat`.

pub mod error;
pub mod render;
pub mod session;
pub mod transcript;
pub mod transport;

pub use error::ClientError;
pub use session::{ChatSession, PendingTurn, UNAVAILABLE_PLACEHOLDER};
pub use transcript::Transcript;
pub use transport::{ChatTransport, DEFAULT_ENDPOINT, HttpTransport};
