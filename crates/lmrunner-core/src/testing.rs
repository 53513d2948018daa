// Scripted fakes for the host and backend seams.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use lmrunner_api::models::DebugCommand;
use lmrunner_api::{DebugOutput, DebugSession, DeviceFilter, DeviceItem};

use crate::backend::ScriptBackend;
use crate::error::CoreError;
use crate::host::{InputRequest, Notice, Prompter};

pub fn item(label: &str, id: &str, collector: &str) -> DeviceItem {
    DeviceItem {
        id: id.into(),
        display_name: label.into(),
        name: None,
        current_collector_id: collector.into(),
    }
}

pub fn output(text: &str) -> Result<DebugOutput, CoreError> {
    Ok(DebugOutput {
        output: Some(text.into()),
    })
}

fn unexpected(what: &str) -> CoreError {
    CoreError::Protocol {
        message: format!("unexpected {what} call"),
    }
}

// ── Backend ─────────────────────────────────────────────────────────

/// Replays queued responses and records every call.
///
/// An exhausted output queue keeps answering "no output yet".
#[derive(Default)]
pub struct ScriptedBackend {
    search_queue: Mutex<VecDeque<Result<Vec<DeviceItem>, CoreError>>>,
    session_queue: Mutex<VecDeque<Result<DebugSession, CoreError>>>,
    output_queue: Mutex<VecDeque<Result<DebugOutput, CoreError>>>,
    search_log: Mutex<Vec<(String, u32)>>,
    submit_log: Mutex<Vec<(String, String)>>,
    output_calls: AtomicUsize,
    stall_outputs: AtomicBool,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_searches(
        self,
        responses: impl IntoIterator<Item = Result<Vec<DeviceItem>, CoreError>>,
    ) -> Self {
        self.search_queue.lock().unwrap().extend(responses);
        self
    }

    pub fn with_sessions(
        self,
        responses: impl IntoIterator<Item = Result<DebugSession, CoreError>>,
    ) -> Self {
        self.session_queue.lock().unwrap().extend(responses);
        self
    }

    pub fn with_outputs(
        self,
        responses: impl IntoIterator<Item = Result<DebugOutput, CoreError>>,
    ) -> Self {
        self.output_queue.lock().unwrap().extend(responses);
        self
    }

    /// Output requests never complete.
    pub fn with_stalled_outputs(self) -> Self {
        self.stall_outputs.store(true, Ordering::SeqCst);
        self
    }

    /// `(filter, page_size)` per search call.
    pub fn searches(&self) -> Vec<(String, u32)> {
        self.search_log.lock().unwrap().clone()
    }

    /// `(collector_id, cmdline)` per submission.
    pub fn submissions(&self) -> Vec<(String, String)> {
        self.submit_log.lock().unwrap().clone()
    }

    pub fn output_calls(&self) -> usize {
        self.output_calls.load(Ordering::SeqCst)
    }
}

impl ScriptBackend for ScriptedBackend {
    async fn search_devices(
        &self,
        filter: &DeviceFilter,
        page_size: u32,
    ) -> Result<Vec<DeviceItem>, CoreError> {
        self.search_log
            .lock()
            .unwrap()
            .push((filter.to_string(), page_size));
        let next = self.search_queue.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(unexpected("search")))
    }

    async fn start_debug_session(
        &self,
        collector_id: &str,
        command: &DebugCommand,
    ) -> Result<DebugSession, CoreError> {
        self.submit_log
            .lock()
            .unwrap()
            .push((collector_id.to_owned(), command.cmdline.clone()));
        let next = self.session_queue.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(unexpected("submit")))
    }

    async fn get_debug_output(
        &self,
        _session_id: &str,
        _collector_id: &str,
    ) -> Result<DebugOutput, CoreError> {
        self.output_calls.fetch_add(1, Ordering::SeqCst);
        if self.stall_outputs.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        let next = self.output_queue.lock().unwrap().pop_front();
        next.unwrap_or(Ok(DebugOutput { output: None }))
    }
}

// ── Prompter ────────────────────────────────────────────────────────

/// Answers prompts from queues; a dismissed prompt is `None`.
#[derive(Default)]
pub struct ScriptedPrompter {
    picks: Mutex<VecDeque<Option<usize>>>,
    inputs: Mutex<VecDeque<Option<String>>>,
    confirms: Mutex<VecDeque<bool>>,
    input_prompts: Mutex<Vec<String>>,
    notices: Mutex<Vec<(Notice, String)>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_picks(self, picks: impl IntoIterator<Item = Option<usize>>) -> Self {
        self.picks.lock().unwrap().extend(picks);
        self
    }

    pub fn with_inputs<'a>(self, inputs: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        self.inputs
            .lock()
            .unwrap()
            .extend(inputs.into_iter().map(|i| i.map(str::to_owned)));
        self
    }

    pub fn with_confirms(self, confirms: impl IntoIterator<Item = bool>) -> Self {
        self.confirms.lock().unwrap().extend(confirms);
        self
    }

    pub fn input_prompts(&self) -> Vec<String> {
        self.input_prompts.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<(Notice, String)> {
        self.notices.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn pick(&self, _prompt: &str, _items: &[String]) -> Result<Option<usize>, CoreError> {
        self.picks
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| unexpected("pick"))
    }

    fn input(&self, request: &InputRequest<'_>) -> Result<Option<String>, CoreError> {
        self.input_prompts
            .lock()
            .unwrap()
            .push(request.prompt.to_owned());
        self.inputs
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| unexpected("input"))
    }

    fn confirm(&self, _prompt: &str, _default: bool) -> Result<bool, CoreError> {
        self.confirms
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| unexpected("confirm"))
    }

    fn notify(&self, level: Notice, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((level, message.to_owned()));
    }
}
