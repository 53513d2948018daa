//! `devices` subcommand handlers.

use lmrunner_core::lookup::select_device;
use lmrunner_core::{Notice, Prompter, render};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::config::AppContext;
use crate::error::CliError;
use crate::output;
use crate::prompt::TerminalPrompter;

pub async fn handle(
    args: DevicesArgs,
    ctx: &AppContext,
    prompter: &TerminalPrompter,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::Select => {
            let client = ctx.client(prompter)?;
            let device = select_device(&client, prompter, &ctx.settings, &ctx.state).await?;
            ctx.persist_selection()?;
            output::print_output(&output::render_device(global.output, &device)?, global.quiet);
            Ok(())
        }

        DevicesCommand::Show { html } => {
            let device = ctx.state.selected().ok_or(CliError::NoDeviceSelected)?;
            output::print_output(&output::render_device(global.output, &device)?, global.quiet);
            if let Some(path) = html {
                output::write_html(&path, &render::device_document(&device))?;
            }
            Ok(())
        }

        DevicesCommand::Clear => {
            let message = match ctx.state.clear() {
                Some(device) => format!("Forgot selected device {}", device.label),
                None => "No device was selected".to_owned(),
            };
            ctx.persist_selection()?;
            prompter.notify(Notice::Info, &message);
            Ok(())
        }
    }
}
