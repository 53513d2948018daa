// ── Domain model ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use lmrunner_api::{DeviceItem, FilterField};

use crate::error::CoreError;

/// A monitored device a script can run against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Display name shown in the portal.
    pub label: String,
    pub id: String,
    /// Collector currently responsible for the device.
    pub collector_id: String,
}

impl From<DeviceItem> for Device {
    fn from(item: DeviceItem) -> Self {
        Self {
            label: item.display_name,
            id: item.id,
            collector_id: item.current_collector_id,
        }
    }
}

/// How the user wants to search for devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum SearchMode {
    #[strum(to_string = "By IP")]
    ByAddress,
    #[strum(to_string = "By Name")]
    ByName,
}

impl SearchMode {
    /// The device field this mode filters on.
    pub fn field(self) -> FilterField {
        match self {
            Self::ByAddress => FilterField::Name,
            Self::ByName => FilterField::DisplayName,
        }
    }

    /// Noun used in the search-term prompt.
    pub fn term_noun(self) -> &'static str {
        match self {
            Self::ByAddress => "IP address",
            Self::ByName => "device name",
        }
    }
}

/// Handle for one submitted script, consumed by the poller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionSession {
    pub session_id: String,
    pub collector_id: String,
    pub target_device_id: String,
}

/// Outcome of a single output check (or, from [`OutputPoller::poll`], the
/// terminal outcome of a whole poll).
///
/// [`OutputPoller::poll`]: crate::OutputPoller::poll
#[derive(Debug)]
pub enum PollResult {
    /// No output yet.
    Pending,
    Ready(String),
    Failed(CoreError),
}

impl PollResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Convert a terminal result into the script output.
    pub fn into_output(self) -> Result<String, CoreError> {
        match self {
            Self::Ready(output) => Ok(output),
            Self::Failed(err) => Err(err),
            Self::Pending => Err(CoreError::Protocol {
                message: "poll ended without output".into(),
            }),
        }
    }
}
