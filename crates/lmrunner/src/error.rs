//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use lmrunner_config::ConfigError;
use lmrunner_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const CANCELLED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Credentials ──────────────────────────────────────────────────
    #[error("No {what} configured")]
    #[diagnostic(
        code(lmrunner::no_credentials),
        help(
            "Store credentials with: lmrunner credentials configure\n\
             Or set LMRUNNER_ACCOUNT and LMRUNNER_API_TOKEN."
        )
    )]
    NoCredentials { what: String },

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(lmrunner::auth_failed),
        help(
            "Check that the account name is right and the API token is a valid \
             Bearer token with collector debug permission.\n\
             Replace it with: lmrunner credentials set-token"
        )
    )]
    AuthFailed { message: String },

    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach LogicMonitor: {reason}")]
    #[diagnostic(
        code(lmrunner::connection_failed),
        help("Check the account name, network access and the protocol/domain settings.")
    )]
    ConnectionFailed { reason: String },

    #[error("Unexpected response from LogicMonitor: {message}")]
    #[diagnostic(code(lmrunner::protocol))]
    Protocol { message: String },

    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(lmrunner::api_error))]
    ApiError { status: u16, message: String },

    // ── Devices ──────────────────────────────────────────────────────
    #[error("No devices found matching {filter}")]
    #[diagnostic(
        code(lmrunner::not_found),
        help("Try a shorter search term, or search by IP instead of by name.")
    )]
    NoDevices { filter: String },

    #[error("No device selected")]
    #[diagnostic(
        code(lmrunner::no_device),
        help("Pick one with: lmrunner devices select")
    )]
    NoDeviceSelected,

    // ── Run lifecycle ────────────────────────────────────────────────
    #[error("Timed out after {seconds}s waiting for script output")]
    #[diagnostic(
        code(lmrunner::timeout),
        help("Raise poll_timeout_secs in config.toml, or set it to 0 to wait indefinitely.")
    )]
    Timeout { seconds: u64 },

    #[error("Cancelled")]
    #[diagnostic(code(lmrunner::cancelled))]
    Cancelled,

    #[error("A script is already running")]
    #[diagnostic(code(lmrunner::busy), help("Wait for the current run to finish."))]
    Busy,

    // ── Validation ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(lmrunner::validation))]
    Validation { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code(lmrunner::config),
        help("Check {path}")
    )]
    Config { message: String, path: String },

    #[error("Secret storage failed: {message}")]
    #[diagnostic(
        code(lmrunner::storage),
        help("Without a keyring, pass --account and --api-token (or the LMRUNNER_* variables).")
    )]
    Storage { message: String },

    #[error("Prompt failed: {message}")]
    #[diagnostic(code(lmrunner::prompt))]
    Prompt { message: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error("Cannot read {}", path.display())]
    #[diagnostic(code(lmrunner::io))]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(lmrunner::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoCredentials { .. } | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NoDevices { .. } | Self::NoDeviceSelected => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Busy => exit_code::CONFLICT,
            Self::Cancelled => exit_code::CANCELLED,
            Self::Validation { .. } | Self::Config { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingCredentials { what } => CliError::NoCredentials { what: what.into() },
            CoreError::Auth { message } => CliError::AuthFailed { message },
            CoreError::Network { reason } => CliError::ConnectionFailed { reason },
            CoreError::Protocol { message } => CliError::Protocol { message },
            CoreError::Api { status, message } => CliError::ApiError { status, message },
            CoreError::EmptyResult { filter } => CliError::NoDevices { filter },
            CoreError::Timeout { seconds } => CliError::Timeout { seconds },
            CoreError::Cancelled => CliError::Cancelled,
            CoreError::Busy => CliError::Busy,
            CoreError::Validation { message } => CliError::Validation { message },
            CoreError::Storage { message } => CliError::Storage { message },
            CoreError::Prompt { message } => CliError::Prompt { message },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config {
            message: err.to_string(),
            path: lmrunner_config::config_path().display().to_string(),
        }
    }
}
