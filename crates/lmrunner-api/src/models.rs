// Wire types for the LogicMonitor REST API (v3).
//
// Field names follow the portal's camelCase JSON. Identifiers arrive as JSON
// numbers from real portals but some proxies and fixtures send strings, so
// both are accepted and normalized to `String`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

// ── Devices ─────────────────────────────────────────────────────────

/// One entry from `GET /device/devices`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub current_collector_id: String,
}

/// Paged device list envelope.
#[derive(Debug, Deserialize)]
pub struct DeviceList {
    #[serde(default)]
    pub items: Vec<DeviceItem>,
    #[serde(default)]
    pub total: Option<i64>,
}

/// Which device field a search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// `name` -- the host name / IP address the collector polls.
    Name,
    /// `displayName` -- the label shown in the portal.
    DisplayName,
}

impl FilterField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DisplayName => "displayName",
        }
    }
}

/// A substring-match filter on one device field.
///
/// Serializes as `field~"term"`. API v3 requires string literals in double
/// quotes and has no escape syntax for an embedded quote, so such terms are
/// rejected at construction instead of producing a malformed filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFilter {
    field: FilterField,
    term: String,
}

impl DeviceFilter {
    pub fn contains(field: FilterField, term: impl Into<String>) -> Result<Self, Error> {
        let term = term.into();
        if term.is_empty() {
            return Err(Error::InvalidFilter {
                reason: "search term cannot be empty".into(),
            });
        }
        if term.contains('"') {
            return Err(Error::InvalidFilter {
                reason: format!("search term cannot contain a double quote: {term}"),
            });
        }
        Ok(Self { field, term })
    }
}

impl fmt::Display for DeviceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~\"{}\"", self.field.as_str(), self.term)
    }
}

// ── Collector debug sessions ────────────────────────────────────────

/// Body of `POST /debug/`.
#[derive(Debug, Serialize)]
pub struct DebugCommand {
    pub cmdline: String,
}

impl DebugCommand {
    /// A `!groovy` debug command targeting one host.
    pub fn groovy(host_id: &str, script: &str) -> Self {
        Self {
            cmdline: format!("!groovy hostId={host_id} \n {script}"),
        }
    }
}

/// Response of `POST /debug/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugSession {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response of `GET /debug/{sessionId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DebugOutput {
    #[serde(default)]
    pub output: Option<String>,
}

impl DebugOutput {
    /// The output text, if the collector has produced anything yet.
    pub fn ready(&self) -> Option<&str> {
        self.output.as_deref().filter(|o| !o.trim().is_empty())
    }
}

// ── Error body ──────────────────────────────────────────────────────

/// Error shape returned by the portal on non-2xx responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error_message: Option<String>,
}

// ── Helpers ─────────────────────────────────────────────────────────

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}
