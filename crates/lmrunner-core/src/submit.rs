// ── Script submission ──
//
// Wraps the script in a `!groovy` debug command and opens a debug session on
// the device's collector. The returned handle is what the poller consumes.

use tracing::{info, instrument};

use lmrunner_api::models::DebugCommand;

use crate::backend::ScriptBackend;
use crate::error::CoreError;
use crate::model::{Device, ExecutionSession};

/// Submit `script` to run on `device`.
///
/// The script is sent verbatim. A blank script fails before any request is
/// made.
#[instrument(skip(backend, script), fields(device = %device.label, bytes = script.len()))]
pub async fn submit_script<B: ScriptBackend>(
    backend: &B,
    device: &Device,
    script: &str,
) -> Result<ExecutionSession, CoreError> {
    if script.trim().is_empty() {
        return Err(CoreError::validation("Script is empty"));
    }
    if device.collector_id.is_empty() {
        return Err(CoreError::validation(format!(
            "Device {} has no collector assigned",
            device.label
        )));
    }

    let command = DebugCommand::groovy(&device.id, script);
    let session = backend
        .start_debug_session(&device.collector_id, &command)
        .await?;

    let session_id = session
        .session_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CoreError::Protocol {
            message: "debug session response has no sessionId".into(),
        })?;

    info!(session = %session_id, collector = %device.collector_id, "script submitted");
    Ok(ExecutionSession {
        session_id,
        collector_id: device.collector_id.clone(),
        target_device_id: device.id.clone(),
    })
}
