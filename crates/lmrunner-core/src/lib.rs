//! Workflow layer between `lmrunner-api` and the host surface (CLI).
//!
//! This crate owns the script-execution workflow and everything it needs
//! from the outside world, expressed as narrow traits:
//!
//! - **[`lookup`]**: builds a device filter from a [`SearchMode`] and term,
//!   searches the portal, and lets the user pick one [`Device`], which
//!   becomes the selected device in [`SessionState`].
//!
//! - **[`submit`]**: posts a Groovy script against the selected device's
//!   collector and returns an [`ExecutionSession`].
//!
//! - **[`poller`]**: [`OutputPoller`] fetches a session's output at a fixed
//!   interval until it is non-empty, the request fails, the timeout expires
//!   or the run is cancelled.
//!
//! - **[`runner`]**: [`ScriptRunner`] ties the three together behind the
//!   "run on current device" / "run on new device" entry points.
//!
//! - **Host seams** ([`host`]): [`Prompter`] for prompts, picks and
//!   notifications; [`SecretStore`] for credentials. [`backend`] abstracts
//!   the portal itself so the workflow can run against a scripted fake.
//!
//! Core never reads config files or touches the terminal: the CLI builds a
//! [`Settings`] snapshot and hands in its host implementations.

pub mod backend;
pub mod credentials;
pub mod error;
pub mod host;
pub mod lookup;
pub mod model;
pub mod poller;
pub mod render;
pub mod runner;
pub mod settings;
pub mod state;
pub mod submit;

#[cfg(test)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::ScriptBackend;
pub use lmrunner_api::LmClient;
pub use credentials::{API_TOKEN_KEY, ACCOUNT_ID_KEY, Credentials};
pub use error::CoreError;
pub use host::{InputRequest, LayeredStore, MemorySecretStore, Notice, Prompter, SecretStore};
pub use model::{Device, ExecutionSession, PollResult, SearchMode};
pub use poller::OutputPoller;
pub use runner::{PendingRun, RunTarget, ScriptOutcome, ScriptRunner};
pub use settings::Settings;
pub use state::{RunGuard, SessionState, StartupReset};
