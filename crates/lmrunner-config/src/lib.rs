//! Configuration for the lmrunner CLI.
//!
//! TOML settings file merged over defaults and `LMRUNNER_` environment
//! variables, the persisted "selected device" state file, and the system
//! keyring as a [`SecretStore`]. Translates the file format into
//! `lmrunner_core::Settings`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use lmrunner_core::{CoreError, Device, SecretStore, Settings};

/// Keyring service name all secrets are filed under.
pub const KEYRING_SERVICE: &str = "lmrunner";

/// Prefix for environment overrides of config keys.
pub const ENV_PREFIX: &str = "LMRUNNER_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl From<ConfigError> for CoreError {
    fn from(err: ConfigError) -> Self {
        CoreError::Storage {
            message: err.to_string(),
        }
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// On-disk settings. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub protocol: String,
    pub domain: String,
    pub api_path: String,
    pub api_version: String,
    pub page_size: u32,
    pub poll_interval_ms: u64,
    /// `0` waits forever.
    pub poll_timeout_secs: u64,
    /// `0` keeps asking.
    pub max_search_attempts: u32,
    pub request_timeout_secs: u64,
    pub clear_device_on_restart: bool,
    pub clear_token_on_restart: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: "https".into(),
            domain: "logicmonitor.com".into(),
            api_path: "santaba/rest".into(),
            api_version: "3".into(),
            page_size: 50,
            poll_interval_ms: 2000,
            poll_timeout_secs: 600,
            max_search_attempts: 5,
            request_timeout_secs: 30,
            clear_device_on_restart: false,
            clear_token_on_restart: false,
        }
    }
}

impl Config {
    /// Validate and convert into the runtime settings snapshot.
    pub fn to_settings(&self) -> Result<Settings, ConfigError> {
        if !matches!(self.protocol.as_str(), "http" | "https") {
            return Err(invalid(
                "protocol",
                format!("expected 'http' or 'https', got '{}'", self.protocol),
            ));
        }
        if self.domain.trim().is_empty() {
            return Err(invalid("domain", "cannot be empty"));
        }
        if self.page_size == 0 {
            return Err(invalid("page_size", "must be at least 1"));
        }
        if self.poll_interval_ms == 0 {
            return Err(invalid("poll_interval_ms", "must be at least 1"));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs", "must be at least 1"));
        }

        Ok(Settings {
            protocol: self.protocol.clone(),
            domain: self.domain.trim().to_owned(),
            api_path: self.api_path.clone(),
            api_version: self.api_version.clone(),
            page_size: self.page_size,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            poll_timeout: (self.poll_timeout_secs > 0)
                .then(|| Duration::from_secs(self.poll_timeout_secs)),
            max_search_attempts: (self.max_search_attempts > 0).then_some(self.max_search_attempts),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            clear_device_on_restart: self.clear_device_on_restart,
            clear_token_on_restart: self.clear_token_on_restart,
        })
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "lmrunner", "lmrunner")
}

fn dirs_fallback(kind: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(kind);
    p.push("lmrunner");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Where the selected device is remembered between runs.
pub fn state_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".local/share").join("state.toml"),
        |dirs| dirs.data_dir().join("state.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load defaults, then `path` (if it exists), then `LMRUNNER_*` variables.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Persisted state ─────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, Serialize)]
struct StateFile {
    selected_device: Option<Device>,
}

/// Read the remembered device. A missing file means none.
pub fn load_selected_device(path: &Path) -> Result<Option<Device>, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let state: StateFile = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })?;
    Ok(state.selected_device)
}

/// Remember `device`, or forget the selection when `None`.
pub fn save_selected_device(path: &Path, device: Option<&Device>) -> Result<(), ConfigError> {
    let Some(device) = device else {
        return match std::fs::remove_file(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        };
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let state = StateFile {
        selected_device: Some(device.clone()),
    };
    std::fs::write(path, toml::to_string_pretty(&state)?)?;
    Ok(())
}

// ── Keyring ─────────────────────────────────────────────────────────

/// [`SecretStore`] backed by the platform keyring.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new() -> Self {
        Self::with_service(KEYRING_SERVICE)
    }

    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, CoreError> {
        keyring::Entry::new(&self.service, key).map_err(storage)
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match self.entry(key)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(storage(e)),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entry(key)?.set_password(value).map_err(storage)?;
        debug!(key, "secret stored in keyring");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CoreError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(storage(e)),
        }
    }
}

fn storage(err: keyring::Error) -> CoreError {
    ConfigError::from(err).into()
}
