// ── Session state ──
//
// Owns the single "selected device" slot and the one-run-at-a-time flag.
// Created at startup, passed by reference into every command.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::credentials::API_TOKEN_KEY;
use crate::error::CoreError;
use crate::host::SecretStore;
use crate::model::Device;
use crate::settings::Settings;

/// State shared by all commands in one session.
#[derive(Debug, Default)]
pub struct SessionState {
    selected: Mutex<Option<Device>>,
    busy: AtomicBool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously persisted selection.
    pub fn with_selected(device: Option<Device>) -> Self {
        Self {
            selected: Mutex::new(device),
            busy: AtomicBool::new(false),
        }
    }

    /// The currently selected device, if any.
    pub fn selected(&self) -> Option<Device> {
        self.slot().clone()
    }

    /// Make `device` the selected device, returning the one it replaces.
    pub fn select(&self, device: Device) -> Option<Device> {
        debug!(device = %device.label, id = %device.id, "device selected");
        self.slot().replace(device)
    }

    /// Forget the selected device, returning it.
    pub fn clear(&self) -> Option<Device> {
        self.slot().take()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claim the session for one script run.
    ///
    /// Fails with [`CoreError::Busy`] while another run holds its guard.
    pub fn begin_run(&self) -> Result<RunGuard<'_>, CoreError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CoreError::Busy)?;
        Ok(RunGuard { state: self })
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Device>> {
        self.selected.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the session's busy flag on drop.
#[derive(Debug)]
pub struct RunGuard<'a> {
    state: &'a SessionState,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.state.busy.store(false, Ordering::Release);
    }
}

/// What the startup reset removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartupReset {
    pub device_cleared: bool,
    pub token_cleared: bool,
}

/// Apply the `clear_*_on_restart` settings at the start of a session.
pub fn startup_reset<S: SecretStore + ?Sized>(
    settings: &Settings,
    state: &SessionState,
    store: &S,
) -> Result<StartupReset, CoreError> {
    let mut reset = StartupReset::default();

    if settings.clear_device_on_restart {
        state.clear();
        reset.device_cleared = true;
        info!("cleared selected device on startup");
    }

    if settings.clear_token_on_restart {
        store.delete(API_TOKEN_KEY)?;
        reset.token_cleared = true;
        info!("cleared API token on startup");
    }

    Ok(reset)
}
