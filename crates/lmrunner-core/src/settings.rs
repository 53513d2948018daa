// ── Runtime settings ──
//
// A read-only snapshot describing how to reach the portal and how the
// workflow behaves. Built by the CLI from the config file; core never reads
// files itself.

use std::time::Duration;

use lmrunner_api::{ApiTarget, TransportConfig};

/// Settings snapshot for one process (or one `shell` session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// URL scheme, normally `https`.
    pub protocol: String,
    /// Portal domain, normally `logicmonitor.com`.
    pub domain: String,
    /// REST path prefix below the portal host, normally `santaba/rest`.
    pub api_path: String,
    /// Value of the `X-Version` header.
    pub api_version: String,
    /// `size` parameter for device searches.
    pub page_size: u32,
    /// Delay between output polls.
    pub poll_interval: Duration,
    /// Give up waiting for output after this long. `None` polls forever.
    pub poll_timeout: Option<Duration>,
    /// How many searches the interactive lookup may run before giving up on
    /// empty results. `None` keeps asking.
    pub max_search_attempts: Option<u32>,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Forget the selected device when a session starts.
    pub clear_device_on_restart: bool,
    /// Delete the stored API token when a session starts.
    pub clear_token_on_restart: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            protocol: "https".into(),
            domain: "logicmonitor.com".into(),
            api_path: "santaba/rest".into(),
            api_version: "3".into(),
            page_size: 50,
            poll_interval: Duration::from_millis(2000),
            poll_timeout: Some(Duration::from_secs(600)),
            max_search_attempts: Some(5),
            request_timeout: Duration::from_secs(30),
            clear_device_on_restart: false,
            clear_token_on_restart: false,
        }
    }
}

impl Settings {
    /// The portal target for an account.
    pub fn target(&self, account_id: &str) -> ApiTarget {
        ApiTarget {
            protocol: self.protocol.clone(),
            account_id: account_id.to_owned(),
            domain: self.domain.clone(),
            api_path: self.api_path.clone(),
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.request_timeout,
        }
    }
}
