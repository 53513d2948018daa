// ── Script runner ──
//
// The two run entry points ("current device" and "new device") converge on
// one path: resolve the device, submit, then poll. A run holds the session's
// busy guard from the moment it starts until the poll is over.

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::backend::ScriptBackend;
use crate::error::CoreError;
use crate::host::{Notice, Prompter};
use crate::lookup::select_device;
use crate::model::{Device, ExecutionSession};
use crate::poller::OutputPoller;
use crate::settings::Settings;
use crate::state::{RunGuard, SessionState};
use crate::submit::submit_script;

/// Which device a run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTarget {
    /// The selected device; falls back to the interactive lookup if none.
    CurrentDevice,
    /// Always run the lookup first, replacing the selection.
    NewDevice,
}

/// A finished run.
#[derive(Debug, Clone)]
pub struct ScriptOutcome {
    pub device: Device,
    pub session: ExecutionSession,
    pub output: String,
}

/// A submitted run whose output has not been collected yet.
#[derive(Debug)]
pub struct PendingRun<'s> {
    pub device: Device,
    pub session: ExecutionSession,
    _guard: RunGuard<'s>,
}

pub struct ScriptRunner<'a, B, P: ?Sized> {
    backend: &'a B,
    prompter: &'a P,
    settings: &'a Settings,
    state: &'a SessionState,
    cancel: CancellationToken,
}

impl<'a, B, P> ScriptRunner<'a, B, P>
where
    B: ScriptBackend,
    P: Prompter + ?Sized,
{
    pub fn new(backend: &'a B, prompter: &'a P, settings: &'a Settings, state: &'a SessionState) -> Self {
        Self {
            backend,
            prompter,
            settings,
            state,
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Submit and wait for the output.
    pub async fn run(&self, target: RunTarget, script: &str) -> Result<ScriptOutcome, CoreError> {
        let pending = self.start(target, script).await?;
        self.wait(pending).await
    }

    /// Resolve the target device and submit `script` to it.
    #[instrument(skip(self, script))]
    pub async fn start(&self, target: RunTarget, script: &str) -> Result<PendingRun<'a>, CoreError> {
        if script.trim().is_empty() {
            return Err(CoreError::validation("Script is empty"));
        }

        let guard = self.state.begin_run()?;
        let device = self.resolve(target).await?;
        // A cancel during the device prompts must not reach the collector.
        if self.cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }
        let session = submit_script(self.backend, &device, script).await?;

        self.prompter
            .notify(Notice::Info, "Script is running... Waiting for output...");
        Ok(PendingRun {
            device,
            session,
            _guard: guard,
        })
    }

    /// Poll a submitted run to completion.
    pub async fn wait(&self, pending: PendingRun<'_>) -> Result<ScriptOutcome, CoreError> {
        let output = OutputPoller::new(self.backend, self.settings)
            .with_cancel(self.cancel.clone())
            .poll(&pending.session)
            .await
            .into_output()?;

        info!(device = %pending.device.label, bytes = output.len(), "script finished");
        Ok(ScriptOutcome {
            device: pending.device,
            session: pending.session,
            output,
        })
    }

    async fn resolve(&self, target: RunTarget) -> Result<Device, CoreError> {
        if target == RunTarget::CurrentDevice {
            if let Some(device) = self.state.selected() {
                return Ok(device);
            }
        }
        select_device(self.backend, self.prompter, self.settings, self.state).await
    }
}
