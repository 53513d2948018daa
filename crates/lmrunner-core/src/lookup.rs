// ── Device lookup ──
//
// One search request per attempt. The interactive flow re-prompts for the
// search mode and term when a search comes back empty, bounded by
// `Settings::max_search_attempts` and by the user declining to retry.

use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use lmrunner_api::DeviceFilter;

use crate::backend::ScriptBackend;
use crate::error::CoreError;
use crate::host::{InputRequest, Notice, Prompter};
use crate::model::{Device, SearchMode};
use crate::settings::Settings;
use crate::state::SessionState;

/// Search the portal and map the results, preserving portal order.
///
/// Fails with [`CoreError::EmptyResult`] when nothing matches.
#[instrument(skip(backend, settings), fields(page_size = settings.page_size))]
pub async fn lookup_devices<B: ScriptBackend>(
    backend: &B,
    settings: &Settings,
    mode: SearchMode,
    term: &str,
) -> Result<Vec<Device>, CoreError> {
    if term.trim().is_empty() {
        return Err(CoreError::validation("Search term is required"));
    }

    let filter = DeviceFilter::contains(mode.field(), term)?;
    let items = backend.search_devices(&filter, settings.page_size).await?;
    if items.is_empty() {
        return Err(CoreError::EmptyResult {
            filter: filter.to_string(),
        });
    }

    debug!(count = items.len(), "devices found");
    Ok(items.into_iter().map(Device::from).collect())
}

/// Run the interactive search and make the picked device the selection.
pub async fn select_device<B, P>(
    backend: &B,
    prompter: &P,
    settings: &Settings,
    state: &SessionState,
) -> Result<Device, CoreError>
where
    B: ScriptBackend,
    P: Prompter + ?Sized,
{
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        let (mode, term) = prompt_search(prompter)?;

        let devices = match lookup_devices(backend, settings, mode, &term).await {
            Ok(devices) => devices,
            Err(err) if err.is_empty_result() => {
                if settings.max_search_attempts.is_some_and(|max| attempt >= max) {
                    info!(attempt, "giving up after empty searches");
                    return Err(err);
                }
                prompter.notify(
                    Notice::Info,
                    "No devices found matching your criteria. Please try again.",
                );
                if !prompter.confirm("Search again?", true)? {
                    return Err(CoreError::Cancelled);
                }
                continue;
            }
            Err(err) => return Err(err),
        };

        let labels: Vec<String> = devices.iter().map(|d| d.label.clone()).collect();
        let picked = prompter
            .pick("Select a device to run the script on", &labels)?
            .and_then(|idx| devices.into_iter().nth(idx))
            .ok_or_else(|| CoreError::validation("No device selected"))?;

        prompter.notify(Notice::Info, &format!("You selected: {}", picked.label));
        state.select(picked.clone());
        return Ok(picked);
    }
}

fn prompt_search<P: Prompter + ?Sized>(prompter: &P) -> Result<(SearchMode, String), CoreError> {
    let modes: Vec<SearchMode> = SearchMode::iter().collect();
    let labels: Vec<String> = modes.iter().map(ToString::to_string).collect();

    let mode = prompter
        .pick("Select how you want to search devices", &labels)?
        .and_then(|idx| modes.get(idx).copied())
        .ok_or_else(|| CoreError::validation("Search method not selected"))?;

    let prompt = format!("Enter the {} to search", mode.term_noun());
    let placeholder = match mode {
        SearchMode::ByAddress => "Search by IP",
        SearchMode::ByName => "Search by name",
    };
    let term = prompter
        .input(&InputRequest {
            prompt: &prompt,
            placeholder,
            secret: false,
        })?
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| CoreError::validation("Search term is required"))?;

    Ok((mode, term))
}
