// LogicMonitor REST client
//
// Wraps `reqwest::Client` with portal URL construction and response/error
// decoding. Endpoint groups (devices, debug sessions) are implemented as
// inherent methods in separate files to keep this module focused on
// transport mechanics.

use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::ApiTarget;
use crate::error::Error;
use crate::models::ErrorBody;
use crate::transport::TransportConfig;

/// Async client for one LogicMonitor portal.
///
/// Every request carries the bearer token, `Content-Type` and `X-Version`
/// headers installed on the underlying `reqwest::Client`.
pub struct LmClient {
    http: reqwest::Client,
    base_url: Url,
}

impl LmClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a portal target and bearer token.
    pub fn new(
        target: &ApiTarget,
        api_token: &SecretString,
        api_version: &str,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_bearer_client(api_token, api_version)?;
        let base_url = target.base_url()?;
        debug!(base_url = %base_url, "LogicMonitor client ready");
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    ///
    /// `base_url` gets a trailing slash if it lacks one so relative endpoint
    /// paths join below it.
    pub fn with_client(http: reqwest::Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative endpoint path (e.g. `"device/devices"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        handle_response(resp).await
    }

    pub(crate) async fn post_with_params<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        params: &[(&str, String)],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url} params={params:?}");

        let resp = self.http.post(url).query(params).json(body).send().await?;
        handle_response(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    trace!(%status, url = %resp.url(), "response");

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        let body = resp.text().await.unwrap_or_default();
        let detail = parse_error_message(&body)
            .unwrap_or_else(|| format!("portal rejected the API token (HTTP {status})"));
        return Err(Error::Authentication { message: detail });
    }

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = parse_error_message(&body).unwrap_or_else(|| preview(&body));
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }

    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body: body.clone(),
    })
}

fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.error_message)
        .filter(|m| !m.is_empty())
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
