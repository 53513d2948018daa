use url::Url;

use crate::error::Error;

/// Where a LogicMonitor portal lives.
///
/// Portals are addressed per account: `{protocol}://{account}.{domain}/{api_path}/`.
/// The account identifier is the portal's company name (e.g. `acme` for
/// `acme.logicmonitor.com`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiTarget {
    pub protocol: String,
    pub account_id: String,
    pub domain: String,
    pub api_path: String,
}

impl ApiTarget {
    /// The REST base URL, always ending in `/` so relative paths join below it.
    pub fn base_url(&self) -> Result<Url, Error> {
        let protocol = self.protocol.trim_end_matches("://");
        let domain = self.domain.trim_matches('/');
        let path = self.api_path.trim_matches('/');

        let raw = if path.is_empty() {
            format!("{protocol}://{}.{domain}/", self.account_id)
        } else {
            format!("{protocol}://{}.{domain}/{path}/", self.account_id)
        };
        Ok(Url::parse(&raw)?)
    }
}
