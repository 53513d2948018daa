// ── Core error types ──
//
// User-facing errors from lmrunner-core. Consumers never see HTTP status
// codes or JSON parse failures directly: the `From<lmrunner_api::Error>`
// impl translates transport-layer errors into the workflow taxonomy.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Credentials ──────────────────────────────────────────────────
    #[error("Credentials are missing: no {what} configured")]
    MissingCredentials { what: &'static str },

    // ── Input ────────────────────────────────────────────────────────
    #[error("{message}")]
    Validation { message: String },

    // ── Remote ───────────────────────────────────────────────────────
    #[error("Cannot reach LogicMonitor: {reason}")]
    Network { reason: String },

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Unexpected response from LogicMonitor: {message}")]
    Protocol { message: String },

    #[error("LogicMonitor API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("No devices found matching {filter}")]
    EmptyResult { filter: String },

    // ── Run lifecycle ────────────────────────────────────────────────
    #[error("Timed out after {seconds}s waiting for script output")]
    Timeout { seconds: u64 },

    #[error("Cancelled")]
    Cancelled,

    #[error("A script is already running in this session")]
    Busy,

    // ── Host ─────────────────────────────────────────────────────────
    #[error("Secret storage error: {message}")]
    Storage { message: String },

    #[error("Prompt failed: {message}")]
    Prompt { message: String },
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns `true` if the failure is worth re-running the lookup for.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<lmrunner_api::Error> for CoreError {
    fn from(err: lmrunner_api::Error) -> Self {
        use lmrunner_api::Error as ApiError;

        match err {
            ApiError::Authentication { message } => CoreError::Auth { message },
            ApiError::InvalidHeader { header, reason } => {
                CoreError::validation(format!("stored API token is not usable as {header}: {reason}"))
            }
            ApiError::Transport(ref e) => {
                if let Some(status) = e.status().filter(|s| matches!(s.as_u16(), 401 | 403)) {
                    CoreError::Auth {
                        message: format!("HTTP {status}"),
                    }
                } else if e.is_timeout() {
                    CoreError::Network {
                        reason: format!("request timed out: {e}"),
                    }
                } else {
                    CoreError::Network {
                        reason: e.to_string(),
                    }
                }
            }
            ApiError::InvalidUrl(e) => {
                CoreError::validation(format!("portal URL is invalid (check account id and settings): {e}"))
            }
            ApiError::Api {
                status: status @ (401 | 403),
                message,
            } => CoreError::Auth {
                message: format!("HTTP {status}: {message}"),
            },
            ApiError::Api { status, message } => CoreError::Api { status, message },
            ApiError::InvalidFilter { reason } => CoreError::Validation { message: reason },
            ApiError::Deserialization { message, body: _ } => CoreError::Protocol { message },
        }
    }
}
