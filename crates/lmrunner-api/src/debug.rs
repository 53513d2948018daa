// Collector debug-session endpoints
//
// A debug command is posted to a collector and answered with a session id;
// the command's output is then fetched from that session until the
// collector has finished running it.

use tracing::debug;

use crate::client::LmClient;
use crate::error::Error;
use crate::models::{DebugCommand, DebugOutput, DebugSession};

impl LmClient {
    /// Start a debug command on a collector.
    ///
    /// `POST /debug/?collectorId=<id>` with `{"cmdline": "..."}`
    ///
    /// The returned session may lack an id; callers decide how to treat that.
    pub async fn start_debug_session(
        &self,
        collector_id: &str,
        command: &DebugCommand,
    ) -> Result<DebugSession, Error> {
        debug!(collector_id, bytes = command.cmdline.len(), "starting debug session");
        self.post_with_params("debug/", &[("collectorId", collector_id.to_owned())], command)
            .await
    }

    /// Fetch the current output of a debug session.
    ///
    /// `GET /debug/{sessionId}?collectorId=<id>`
    pub async fn get_debug_output(
        &self,
        session_id: &str,
        collector_id: &str,
    ) -> Result<DebugOutput, Error> {
        let path = format!("debug/{session_id}");
        self.get_with_params(&path, &[("collectorId", collector_id.to_owned())])
            .await
    }
}
