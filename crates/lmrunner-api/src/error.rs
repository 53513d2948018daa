use thiserror::Error;

/// Top-level error type for the `lmrunner-api` crate.
///
/// Covers every failure mode of the REST surface: authentication,
/// transport, structured API errors, and response decoding.
/// `lmrunner-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The portal rejected the bearer token (HTTP 401 / 403).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The token cannot be sent as an HTTP header value.
    #[error("Invalid header value for {header}: {reason}")]
    InvalidHeader { header: &'static str, reason: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success response from the portal, with the decoded error message
    /// when the body carries one.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A filter expression could not be built from the given term.
    #[error("Invalid filter: {reason}")]
    InvalidFilter { reason: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the portal rejected the credentials.
    pub fn is_auth(&self) -> bool {
        match self {
            Self::Authentication { .. } => true,
            Self::Api { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }

    /// Returns `true` if the failure happened below the HTTP layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
