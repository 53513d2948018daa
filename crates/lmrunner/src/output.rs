//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use lmrunner_core::render;
use lmrunner_core::{Device, ScriptOutcome};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Rows & reports ───────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow<'a> {
    #[tabled(rename = "Device Name")]
    name: &'a str,
    #[tabled(rename = "Device ID")]
    id: &'a str,
    #[tabled(rename = "Collector ID")]
    collector: &'a str,
}

impl<'a> From<&'a Device> for DeviceRow<'a> {
    fn from(d: &'a Device) -> Self {
        Self {
            name: &d.label,
            id: &d.id,
            collector: &d.collector_id,
        }
    }
}

/// Structured form of a finished run.
#[derive(Serialize)]
struct RunReport<'a> {
    device: &'a Device,
    session_id: &'a str,
    output: &'a str,
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render one device in the chosen format.
pub fn render_device(format: OutputFormat, device: &Device) -> Result<String, CliError> {
    render_single(
        format,
        device,
        |d| render_table(&[DeviceRow::from(d)]),
        render::device_text,
    )
}

/// Render a finished run. Table and plain both print the console output
/// under a one-line device header.
pub fn render_outcome(format: OutputFormat, outcome: &ScriptOutcome) -> Result<String, CliError> {
    let report = RunReport {
        device: &outcome.device,
        session_id: &outcome.session.session_id,
        output: &outcome.output,
    };
    let text = |r: &RunReport<'_>| render::output_text(r.device, r.output);
    render_single(format, &report, text, text)
}

fn render_single<T: Serialize>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    plain_fn: impl Fn(&T) -> String,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => serde_json::to_string_pretty(data).map_err(serialize_err),
        OutputFormat::JsonCompact => serde_json::to_string(data).map_err(serialize_err),
        OutputFormat::Yaml => serde_yaml::to_string(data).map_err(serialize_err),
        OutputFormat::Plain => Ok(plain_fn(data)),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", output.trim_end_matches('\n'));
}

/// Write an HTML document next to the terminal output.
pub fn write_html(path: &Path, document: &str) -> Result<(), CliError> {
    std::fs::write(path, document)?;
    tracing::info!(path = %path.display(), "wrote HTML report");
    Ok(())
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn serialize_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        message: format!("cannot serialize output: {e}"),
    }
}
