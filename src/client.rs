//! HTTP client for the headset's local session telemetry API.
//!
//! Handles the GET round-trip and JSON decode, nothing more — the monitor
//! loop drives timing and decides how each error class is recovered.

use std::fmt;
use std::time::Duration;

use crate::error::FrameError;
use crate::frame::SessionFrame;

/// Port the headset serves session telemetry on.
pub const DEFAULT_PORT: u16 = 6721;

/// Per-request timeout. Frames arrive on a sub-second poll cycle; a fetch
/// slower than this counts as a transport failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Errors from a single fetch attempt.
///
/// The three classes recover differently: `Http` retries with a delay,
/// `Decode` skips the tick, `NoSession` is the ordinary no-match state.
#[derive(Debug)]
pub enum SourceError {
    /// Transport failure (connection refused, timeout).
    Http(reqwest::Error),
    /// The API answered but the payload would not decode.
    Decode(FrameError),
    /// No running session (HTTP 404 or an empty document).
    NoSession,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Http(e) => write!(f, "telemetry fetch failed: {e}"),
            SourceError::Decode(e) => write!(f, "undecodable session frame: {e}"),
            SourceError::NoSession => write!(f, "no running session"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Http(e) => Some(e),
            SourceError::Decode(e) => Some(e),
            SourceError::NoSession => None,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        SourceError::Http(e)
    }
}

impl From<FrameError> for SourceError {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::Empty => SourceError::NoSession,
            other => SourceError::Decode(other),
        }
    }
}

/// Client for one headset's session endpoint.
///
/// Synchronous, single-threaded; one [`fetch`](Self::fetch) per monitor tick.
pub struct SessionClient {
    http: reqwest::blocking::Client,
    url: String,
}

impl SessionClient {
    /// Build a client for `http://{host}:6721/session`.
    pub fn new(host: &str) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            url: format!("http://{host}:{DEFAULT_PORT}/session"),
        })
    }

    /// The endpoint URL this client polls.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and decode one session frame.
    pub fn fetch(&self) -> Result<SessionFrame, SourceError> {
        let resp = self.http.get(&self.url).send()?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NoSession);
        }
        let body = resp.text()?;
        Ok(SessionFrame::from_json(&body)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_formatting() {
        let client = SessionClient::new("10.0.1.113").unwrap();
        assert_eq!(client.url(), "http://10.0.1.113:6721/session");
    }

    #[test]
    fn empty_document_maps_to_no_session() {
        let err: SourceError = SessionFrame::from_json("").unwrap_err().into();
        assert!(matches!(err, SourceError::NoSession));
    }

    #[test]
    fn malformed_document_maps_to_decode() {
        let err: SourceError = SessionFrame::from_json("{oops").unwrap_err().into();
        assert!(matches!(err, SourceError::Decode(FrameError::Json(_))));
    }
}
