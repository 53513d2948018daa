// ── Host seams ──
//
// Everything the workflow needs from its surroundings: a way to ask the
// user things and a place to keep secrets. The CLI implements these with
// terminal prompts and the system keyring; tests use scripted fakes.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::error::CoreError;

// ── Prompter ────────────────────────────────────────────────────────

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info,
    Warning,
    Error,
}

/// A free-text prompt.
#[derive(Debug, Clone, Copy)]
pub struct InputRequest<'a> {
    pub prompt: &'a str,
    pub placeholder: &'a str,
    /// Hide the typed value (tokens).
    pub secret: bool,
}

/// Interactive UI primitives provided by the host.
///
/// Every prompt returns `Ok(None)` when the user dismisses it; that is not
/// an error at this layer.
pub trait Prompter: Send + Sync {
    /// Single selection from a list. Returns the chosen index.
    fn pick(&self, prompt: &str, items: &[String]) -> Result<Option<usize>, CoreError>;

    /// Free-text input.
    fn input(&self, request: &InputRequest<'_>) -> Result<Option<String>, CoreError>;

    /// Yes / no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CoreError>;

    /// Toast-style message.
    fn notify(&self, level: Notice, message: &str);
}

// ── Secret storage ──────────────────────────────────────────────────

/// Secure key-value storage for credentials.
pub trait SecretStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn store(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn delete(&self, key: &str) -> Result<(), CoreError>;
}

/// Process-local secret store.
///
/// Backs tests and holds flag/env overrides on top of the keyring (see
/// [`LayeredStore`]).
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self {
            entries: Mutex::new(map),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Reads from `overlay` first, then `base`. Writes and deletes go to both
/// so an override never shadows a value the user just changed.
#[derive(Debug)]
pub struct LayeredStore<O, B> {
    overlay: O,
    base: B,
}

impl<O, B> LayeredStore<O, B> {
    pub fn new(overlay: O, base: B) -> Self {
        Self { overlay, base }
    }

    pub fn base(&self) -> &B {
        &self.base
    }
}

impl<O: SecretStore, B: SecretStore> SecretStore for LayeredStore<O, B> {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match self.overlay.get(key)? {
            Some(value) => Ok(Some(value)),
            None => self.base.get(key),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.overlay.delete(key)?;
        self.base.store(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CoreError> {
        self.overlay.delete(key)?;
        self.base.delete(key)
    }
}
