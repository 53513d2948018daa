// Shared transport configuration for building reqwest::Client instances.
//
// Every request to the portal carries the same bearer token, version and
// content-type headers, so they are installed once as client defaults.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

const USER_AGENT: &str = concat!("lmrunner/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }

    /// Build a client that authenticates every request with a bearer token.
    ///
    /// Installs `Authorization: Bearer <token>` (marked sensitive so it never
    /// shows up in debug output), `Content-Type: application/json` and
    /// `X-Version: <api_version>`.
    pub fn build_bearer_client(
        &self,
        api_token: &SecretString,
        api_version: &str,
    ) -> Result<reqwest::Client, Error> {
        self.build_client_with_headers(bearer_headers(api_token, api_version)?)
    }
}

/// Default headers for an authenticated portal request.
pub fn bearer_headers(api_token: &SecretString, api_version: &str) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_token.expose_secret()))
        .map_err(|e| Error::InvalidHeader {
            header: "Authorization",
            reason: e.to_string(),
        })?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let version = HeaderValue::from_str(api_version).map_err(|e| Error::InvalidHeader {
        header: "X-Version",
        reason: e.to_string(),
    })?;
    headers.insert("X-Version", version);

    Ok(headers)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bearer_headers_mark_token_sensitive() {
        let token = SecretString::from("tok".to_string());
        let headers = bearer_headers(&token, "3").unwrap();

        let auth = &headers[AUTHORIZATION];
        assert!(auth.is_sensitive());
        assert_eq!(auth.to_str().unwrap(), "Bearer tok");
        assert_eq!(headers["X-Version"], "3");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn bearer_headers_reject_control_characters() {
        let token = SecretString::from("bad\ntoken".to_string());
        let err = bearer_headers(&token, "3").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidHeader {
                header: "Authorization",
                ..
            }
        ));
    }
}
