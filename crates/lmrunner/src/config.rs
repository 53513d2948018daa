//! CLI-owned session context: settings, secrets and the selected device.
//!
//! Core never sees files or flags. It receives a `Settings` snapshot, a
//! `SecretStore` with flag overrides layered over the keyring, and a
//! `SessionState` restored from the state file.

use std::path::PathBuf;

use tracing::debug;

use lmrunner_config::{self as config, ConfigError, KeyringStore};
use lmrunner_core::{
    ACCOUNT_ID_KEY, API_TOKEN_KEY, LayeredStore, LmClient, MemorySecretStore, Prompter,
    SessionState, Settings, StartupReset, backend, credentials, state,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub type Secrets = LayeredStore<MemorySecretStore, KeyringStore>;

/// Everything a command needs, built once per process.
pub struct AppContext {
    pub settings: Settings,
    pub state: SessionState,
    pub secrets: Secrets,
    pub config_path: PathBuf,
    pub state_path: PathBuf,
    pub reset: StartupReset,
}

impl AppContext {
    /// Load config, restore the selected device and apply the startup reset.
    pub fn load(global: &GlobalOpts) -> Result<Self, CliError> {
        let config_path = global.config.clone().unwrap_or_else(config::config_path);
        let settings = config::load_config_from(&config_path)?.to_settings()?;
        let state_path = config::state_path();

        let state = SessionState::with_selected(config::load_selected_device(&state_path)?);
        let secrets = LayeredStore::new(overrides(global), KeyringStore::new());

        let reset = state::startup_reset(&settings, &state, secrets.base())?;
        if reset.device_cleared {
            config::save_selected_device(&state_path, None)?;
        }
        debug!(config = %config_path.display(), ?reset, "context loaded");

        Ok(Self {
            settings,
            state,
            secrets,
            config_path,
            state_path,
            reset,
        })
    }

    /// Build a portal client, prompting for any missing credential.
    pub fn client<P: Prompter + ?Sized>(&self, prompter: &P) -> Result<LmClient, CliError> {
        let creds = credentials::ensure(&self.secrets, prompter)?;
        Ok(backend::connect(&self.settings, &creds)?)
    }

    /// Write the current selection to the state file.
    pub fn persist_selection(&self) -> Result<(), ConfigError> {
        config::save_selected_device(&self.state_path, self.state.selected().as_ref())
    }
}

fn overrides(global: &GlobalOpts) -> MemorySecretStore {
    let entries = [
        (ACCOUNT_ID_KEY, global.account.as_deref()),
        (API_TOKEN_KEY, global.api_token.as_deref()),
    ];
    MemorySecretStore::with_entries(
        entries
            .into_iter()
            .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v))),
    )
}
