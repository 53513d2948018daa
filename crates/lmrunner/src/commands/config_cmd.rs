//! `config` subcommand handlers.

use std::fmt::Write as _;

use serde::Serialize;

use lmrunner_config::{self as config, Config};
use lmrunner_core::credentials;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::AppContext;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct ConfigReport<'a> {
    config_file: String,
    state_file: String,
    settings: &'a Config,
    credentials: CredentialReport,
}

/// `None` when the keyring could not be queried.
#[derive(Serialize)]
struct CredentialReport {
    account_id: Option<bool>,
    api_token: Option<bool>,
}

pub fn handle(args: &ConfigArgs, ctx: &AppContext, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load_config_from(&ctx.config_path)?;
            let report = ConfigReport {
                config_file: ctx.config_path.display().to_string(),
                state_file: ctx.state_path.display().to_string(),
                settings: &cfg,
                credentials: credential_report(ctx),
            };
            output::print_output(&render_report(global.output, &report)?, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            let text = format!(
                "config: {}\nstate:  {}",
                ctx.config_path.display(),
                ctx.state_path.display()
            );
            output::print_output(&text, global.quiet);
            Ok(())
        }
    }
}

fn credential_report(ctx: &AppContext) -> CredentialReport {
    match credentials::status(&ctx.secrets) {
        Ok(status) => CredentialReport {
            account_id: Some(status.account_id),
            api_token: Some(status.api_token),
        },
        Err(e) => {
            tracing::warn!(error = %e, "cannot read credential status");
            CredentialReport {
                account_id: None,
                api_token: None,
            }
        }
    }
}

fn render_report(format: OutputFormat, report: &ConfigReport<'_>) -> Result<String, CliError> {
    let to_err = |e: &dyn std::fmt::Display| CliError::Validation {
        message: format!("cannot serialize config: {e}"),
    };
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report).map_err(|e| to_err(&e)),
        OutputFormat::JsonCompact => serde_json::to_string(report).map_err(|e| to_err(&e)),
        OutputFormat::Yaml => serde_yaml::to_string(report).map_err(|e| to_err(&e)),
        OutputFormat::Table | OutputFormat::Plain => {
            let settings = toml::to_string_pretty(report.settings).map_err(|e| to_err(&e))?;
            let mut out = format!("# {}\n{settings}\n", report.config_file);
            let _ = writeln!(out, "# credentials");
            let _ = writeln!(out, "account_id = {}", presence(report.credentials.account_id));
            let _ = writeln!(out, "api_token = {}", presence(report.credentials.api_token));
            Ok(out)
        }
    }
}

fn presence(stored: Option<bool>) -> &'static str {
    match stored {
        Some(true) => "\"****\"",
        Some(false) => "\"(not set)\"",
        None => "\"(keyring unavailable)\"",
    }
}
