// ── Portal backend ──
//
// The three portal calls the workflow makes, behind a trait so lookup,
// submission and polling can run against a scripted fake in tests. The real
// implementation is `LmClient`.

use std::future::Future;

use lmrunner_api::models::DebugCommand;
use lmrunner_api::{DebugOutput, DebugSession, DeviceFilter, DeviceItem, LmClient};

use crate::credentials::Credentials;
use crate::error::CoreError;
use crate::settings::Settings;

/// The remote operations behind a script run.
pub trait ScriptBackend: Send + Sync {
    fn search_devices(
        &self,
        filter: &DeviceFilter,
        page_size: u32,
    ) -> impl Future<Output = Result<Vec<DeviceItem>, CoreError>> + Send;

    fn start_debug_session(
        &self,
        collector_id: &str,
        command: &DebugCommand,
    ) -> impl Future<Output = Result<DebugSession, CoreError>> + Send;

    fn get_debug_output(
        &self,
        session_id: &str,
        collector_id: &str,
    ) -> impl Future<Output = Result<DebugOutput, CoreError>> + Send;
}

impl ScriptBackend for LmClient {
    async fn search_devices(
        &self,
        filter: &DeviceFilter,
        page_size: u32,
    ) -> Result<Vec<DeviceItem>, CoreError> {
        Ok(LmClient::search_devices(self, filter, page_size).await?)
    }

    async fn start_debug_session(
        &self,
        collector_id: &str,
        command: &DebugCommand,
    ) -> Result<DebugSession, CoreError> {
        Ok(LmClient::start_debug_session(self, collector_id, command).await?)
    }

    async fn get_debug_output(
        &self,
        session_id: &str,
        collector_id: &str,
    ) -> Result<DebugOutput, CoreError> {
        Ok(LmClient::get_debug_output(self, session_id, collector_id).await?)
    }
}

/// Build an authenticated client for the configured portal.
pub fn connect(settings: &Settings, credentials: &Credentials) -> Result<LmClient, CoreError> {
    let target = settings.target(&credentials.account_id);
    Ok(LmClient::new(
        &target,
        &credentials.api_token,
        &settings.api_version,
        &settings.transport(),
    )?)
}
