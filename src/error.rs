//! Transport error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Why a request to the game service did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TransportErrorKind {
    /// The request never got an answer (connection refused, timeout, ...).
    #[display("network failure: {_0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[display("server returned HTTP {_0}")]
    Status(u16),
    /// The body could not be decoded into the expected payload.
    #[display("undecodable response: {_0}")]
    Decode(String),
    /// The HTTP client could not be built.
    #[display("client setup failed: {_0}")]
    Setup(String),
    /// This role has no endpoint for the request.
    #[display("no {_0} endpoint configured")]
    MissingEndpoint(&'static str),
}

/// Transport error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Transport error: {} at {}:{}", kind, file, line)]
pub struct TransportError {
    /// What went wrong.
    pub kind: TransportErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TransportError {
    /// Creates a new transport error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: TransportErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Whether the server answered at all.
    pub fn is_status(&self) -> bool {
        matches!(self.kind, TransportErrorKind::Status(_))
    }
}

impl From<reqwest::Error> for TransportError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_decode() {
            TransportErrorKind::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            TransportErrorKind::Status(status.as_u16())
        } else if err.is_builder() {
            TransportErrorKind::Setup(err.to_string())
        } else {
            TransportErrorKind::Network(err.to_string())
        };
        Self::new(kind)
    }
}

impl From<serde_json::Error> for TransportError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(TransportErrorKind::Decode(err.to_string()))
    }
}
